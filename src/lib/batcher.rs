//! Batched line reading.
//!
//! Groups raw lines into fixed-size batches so the pipeline pays one queue
//! handoff per `batch_size` lines instead of one per line. The final partial
//! batch is always emitted; every line reaches exactly one batch exactly once.
//!
//! Lines stay raw bytes here: a non-UTF-8 line is a skippable record for the
//! parser, not a read error. Only a genuine `io::Error` from the underlying
//! reader ends the stream early, after which the iterator is fused.

use std::io::BufRead;

/// One unit of work: a group of raw lines without their terminators.
pub type Batch = Vec<Box<[u8]>>;

/// Default lines per batch. Large enough to amortize queue handoff, small
/// enough that queue capacity × batch size bounds peak memory.
pub const DEFAULT_BATCH_SIZE: usize = 65_536;

/// Iterator over line batches from a buffered reader.
pub struct Batcher<R: BufRead> {
    reader: R,
    batch_size: usize,
    done: bool,
}

impl<R: BufRead> Batcher<R> {
    /// Create a batcher emitting `batch_size` lines per batch.
    #[must_use]
    pub fn new(reader: R, batch_size: usize) -> Self {
        Self { reader, batch_size: batch_size.max(1), done: false }
    }

    /// Read one line into `buf`, trimming the trailing `\n` (and `\r`).
    /// Returns `Ok(false)` at end of input.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> std::io::Result<bool> {
        buf.clear();
        let n = self.reader.read_until(b'\n', buf)?;
        if n == 0 {
            return Ok(false);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(true)
    }
}

impl<R: BufRead> Iterator for Batcher<R> {
    type Item = std::io::Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut batch = Vec::with_capacity(self.batch_size);
        let mut line = Vec::new();
        loop {
            match self.read_line(&mut line) {
                Ok(true) => {
                    batch.push(line.clone().into_boxed_slice());
                    if batch.len() == self.batch_size {
                        return Some(Ok(batch));
                    }
                }
                Ok(false) => {
                    self.done = true;
                    return if batch.is_empty() { None } else { Some(Ok(batch)) };
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
