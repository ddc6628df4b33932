//! Line-level record parsing.
//!
//! Input lines have the shape `key;value` with exactly one `;` delimiter and a
//! decimal value with one fractional digit (possibly negative). Values are
//! normalized to tenths as a scaled integer (`value * 10`, ties away from zero)
//! so that min/max comparisons during aggregation stay exact; only the running
//! mean is kept in floating point.
//!
//! A line that does not parse is a [`MalformedRecord`], which is always
//! recoverable: callers skip the line and keep aggregating. Fatal conditions
//! live in [`crate::errors::TallyError`] instead.

use memchr::memchr;

/// The field delimiter. No escaping or quoting is supported.
pub const DELIMITER: u8 = b';';

/// Factor between the source unit and the internal scaled-integer unit.
pub const SCALE: f64 = 10.0;

/// A parsed record borrowing its key from the input line.
///
/// Records are ephemeral: they exist only long enough to be folded into an
/// accumulator entry, which clones the key on first sight of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// The grouping key (e.g. a station name).
    pub key: &'a str,
    /// The measurement in tenths (input value × 10, rounded ties-away-from-zero).
    pub value: i64,
}

/// Why a line failed to parse. Never propagated as an error; skipped and counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedRecord {
    /// Zero or more than one delimiter on the line
    FieldCount,
    /// The key field is empty
    EmptyKey,
    /// The key field is not valid UTF-8
    NonUtf8Key,
    /// The value field is not a finite decimal number representable in tenths
    InvalidValue,
}

/// Parse one raw line into a [`Record`].
///
/// The line must not include its terminating newline. The key is borrowed from
/// the input; the value is parsed in place with no intermediate allocation.
pub fn parse_line(line: &[u8]) -> std::result::Result<Record<'_>, MalformedRecord> {
    let delim = memchr(DELIMITER, line).ok_or(MalformedRecord::FieldCount)?;
    let (key_bytes, rest) = (&line[..delim], &line[delim + 1..]);
    if memchr(DELIMITER, rest).is_some() {
        return Err(MalformedRecord::FieldCount);
    }
    if key_bytes.is_empty() {
        return Err(MalformedRecord::EmptyKey);
    }
    let key = std::str::from_utf8(key_bytes).map_err(|_| MalformedRecord::NonUtf8Key)?;
    let parsed: f64 = fast_float::parse(rest).map_err(|_| MalformedRecord::InvalidValue)?;
    let value = scale_value(parsed).ok_or(MalformedRecord::InvalidValue)?;
    Ok(Record { key, value })
}

/// Normalize a parsed value to tenths, rejecting non-finite inputs and values
/// whose scaled form does not fit in an `i64`.
fn scale_value(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let scaled = (value * SCALE).round();
    if scaled < i64::MIN as f64 || scaled > i64::MAX as f64 {
        return None;
    }
    Some(scaled as i64)
}
