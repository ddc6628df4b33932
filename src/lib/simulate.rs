//! Synthetic measurement-file generation.
//!
//! Writes `key;value` lines with one fractional digit, drawing each station's
//! values from a normal distribution around a per-station base mean. Seeded
//! runs are fully deterministic, which the integration tests and benchmarks
//! rely on.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::io::Write;

/// Standard deviation of the per-station value distribution.
const SIGMA: f64 = 10.0;

/// Output values are clamped to one-decimal range limits.
const VALUE_RANGE: (f64, f64) = (-99.9, 99.9);

/// Built-in station table: name and base mean value.
const STATIONS: &[(&str, f64)] = &[
    ("Abha", 18.0),
    ("Accra", 26.4),
    ("Amsterdam", 10.2),
    ("Athens", 19.2),
    ("Baghdad", 22.77),
    ("Bangkok", 28.6),
    ("Berlin", 10.3),
    ("Bogotá", 14.0),
    ("Brussels", 10.5),
    ("Bucharest", 10.8),
    ("Cairo", 21.4),
    ("Cape Town", 16.2),
    ("Chicago", 9.8),
    ("Copenhagen", 9.1),
    ("Dakar", 24.0),
    ("Dublin", 9.8),
    ("Hamburg", 9.7),
    ("Helsinki", 5.9),
    ("Istanbul", 13.9),
    ("Jakarta", 26.7),
    ("Lagos", 26.8),
    ("Lisbon", 17.5),
    ("London", 11.3),
    ("Madrid", 15.0),
    ("Melbourne", 15.1),
    ("Mexico City", 17.5),
    ("Moscow", 5.8),
    ("Nairobi", 17.8),
    ("New York", 12.9),
    ("Oslo", 5.7),
    ("Paris", 12.3),
    ("Prague", 8.4),
    ("Reykjavík", 4.3),
    ("Rome", 15.2),
    ("San Francisco", 14.6),
    ("São Paulo", 19.2),
    ("Singapore", 27.0),
    ("Stockholm", 6.6),
    ("Tokyo", 15.4),
    ("Toronto", 9.4),
    ("Vienna", 10.4),
    ("Warsaw", 8.5),
    ("Wellington", 12.9),
    ("Zürich", 9.3),
];

/// Create a random number generator, optionally seeded for reproducibility.
#[must_use]
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Generator for synthetic measurement files.
pub struct MeasurementGenerator {
    stations: Vec<(String, Normal<f64>)>,
    rng: StdRng,
}

impl MeasurementGenerator {
    /// Create a generator over `stations` distinct keys.
    ///
    /// The first keys come from the built-in station table; requests beyond
    /// the table are synthesized deterministically.
    #[must_use]
    pub fn new(stations: usize, seed: Option<u64>) -> Self {
        let stations = stations.max(1);
        let stations = (0..stations)
            .map(|i| match STATIONS.get(i) {
                Some(&(name, base)) => (name.to_string(), base),
                None => (format!("Station-{i}"), (i % 60) as f64 - 10.0),
            })
            .map(|(name, base)| {
                let dist = Normal::new(base, SIGMA).expect("valid distribution parameters");
                (name, dist)
            })
            .collect();
        Self { stations, rng: create_rng(seed) }
    }

    /// Number of distinct keys this generator draws from.
    #[must_use]
    pub fn stations(&self) -> usize {
        self.stations.len()
    }

    /// Draw one `(key, value)` pair.
    pub fn sample(&mut self) -> (&str, f64) {
        let idx = self.rng.gen_range(0..self.stations.len());
        let (name, dist) = &self.stations[idx];
        let value = dist.sample(&mut self.rng).clamp(VALUE_RANGE.0, VALUE_RANGE.1);
        (name, value)
    }

    /// Write `records` measurement lines to `writer`.
    pub fn write_measurements<W: Write>(
        &mut self,
        writer: &mut W,
        records: u64,
    ) -> std::io::Result<u64> {
        for _ in 0..records {
            let (name, value) = self.sample();
            let line = format!("{name};{value:.1}\n");
            writer.write_all(line.as_bytes())?;
        }
        Ok(records)
    }
}
