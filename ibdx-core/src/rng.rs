//! Seeded pseudo-random sources
//!
//! Every draw in IBDx is keyed by the entity or cell it belongs to, so the
//! value of a cell never depends on the order tables are built in. Two
//! strategies are available:
//!
//! - [`SeedStrategy::Session`]: one named seed per session, hashed together
//!   with the key (xxh64) to seed a `StdRng`.
//! - [`SeedStrategy::CharSum`]: the key's UTF-16 code units are summed and
//!   fed to the classic `seed * 9301 + 49297 mod 233280` recurrence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh64::xxh64;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

/// Default session seed
pub const DEFAULT_SESSION_SEED: &str = "rna-seq-seed";

/// A reproducible, infinite stream of floats in `[0, 1)`
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform draw in `[lo, hi)`
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Symmetric additive noise in `[-amplitude, amplitude)`
    fn jitter(&mut self, amplitude: f64) -> f64 {
        self.next_f64() * 2.0 * amplitude - amplitude
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Lazily walk any source as an iterator
pub struct Draws<R>(R);

impl<R: RandomSource> Iterator for Draws<R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.0.next_f64())
    }
}

pub fn draws<R: RandomSource>(source: R) -> Draws<R> {
    Draws(source)
}

/// Linear congruential generator seeded from a name's character codes
#[derive(Debug, Clone)]
pub struct CharSumLcg {
    state: u64,
}

impl CharSumLcg {
    pub fn with_state(seed: u64) -> Self {
        // (s mod m) * a + c == s * a + c (mod m), so reduce up front
        Self { state: seed % LCG_MODULUS }
    }

    /// Seed from the sum of UTF-16 code units, matching browser `charCodeAt`
    pub fn from_name(name: &str) -> Self {
        let seed: u64 = name.encode_utf16().map(u64::from).sum();
        Self::with_state(seed)
    }
}

impl RandomSource for CharSumLcg {
    fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }
}

/// `StdRng` seeded from a session seed and a cell key
pub struct KeyedRng {
    rng: StdRng,
}

impl KeyedRng {
    pub fn new(session_seed: &str, key: &str) -> Self {
        let session_hash = xxh64(session_seed.as_bytes(), 0);
        let seed = xxh64(key.as_bytes(), session_hash);
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for KeyedRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    Session,
    CharSum,
}

impl Default for SeedStrategy {
    fn default() -> Self {
        SeedStrategy::Session
    }
}

/// Hands out keyed random sources for one session
#[derive(Debug, Clone)]
pub struct Seeder {
    strategy: SeedStrategy,
    session_seed: String,
}

impl Seeder {
    pub fn new<S: Into<String>>(strategy: SeedStrategy, session_seed: S) -> Self {
        Self {
            strategy,
            session_seed: session_seed.into(),
        }
    }

    pub fn strategy(&self) -> SeedStrategy {
        self.strategy
    }

    pub fn session_seed(&self) -> &str {
        &self.session_seed
    }

    /// Source for one entity or cell. The same key always yields the same stream.
    pub fn for_key(&self, key: &str) -> Box<dyn RandomSource> {
        match self.strategy {
            SeedStrategy::Session => Box::new(KeyedRng::new(&self.session_seed, key)),
            SeedStrategy::CharSum => Box::new(CharSumLcg::from_name(key)),
        }
    }

    /// Source for a cell addressed by several parts, joined with ':'
    pub fn for_parts(&self, parts: &[&str]) -> Box<dyn RandomSource> {
        self.for_key(&parts.join(":"))
    }
}

impl Default for Seeder {
    fn default() -> Self {
        Self::new(SeedStrategy::Session, DEFAULT_SESSION_SEED)
    }
}
