//! Random primitives for `#[ensayo(random)]` fields.
//!
//! Strings look like `test_AbCdEfGhIj`: build-server identifiers must start
//! with a letter and contain only Latin letters, digits and underscores.
//!
//! # Example
//!
//! ```ignore
//! let mut random = RandomData::new(Seed::from_u64(12345));
//! let id = random.string();      // same value on every run with this seed
//! let port = random.integer();   // 0..=i32::MAX
//! ```

use uuid::Uuid;

/// Prefix of every random string, so leftovers are easy to spot and clean up
pub const TEST_PREFIX: &str = "test_";

/// Number of random letters after [`TEST_PREFIX`]
pub const RANDOM_LENGTH: usize = 10;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Source of random scalars for generated fields.
pub trait RandomSource {
    /// A fresh random string
    fn string(&mut self) -> String;

    /// A fresh random non-negative integer
    fn integer(&mut self) -> i64;
}

/// Deterministic seed for reproducible test data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Seed(u64);

impl Seed {
    /// Create a seed from a u64 value
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Seed from a v4 UUID
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(Uuid::new_v4().as_u64_pair().0)
    }

    /// Get the raw seed value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Simple xorshift64 PRNG
#[derive(Debug, Clone)]
struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const fn new(seed: Seed) -> Self {
        // xorshift is stuck at zero
        let state = if seed.0 == 0 { 1 } else { seed.0 };
        Self { state }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Default random provider.
#[derive(Debug, Clone)]
pub struct RandomData {
    rng: Xorshift64,
    seed: Seed,
}

impl RandomData {
    /// Provider with a fixed seed
    #[must_use]
    pub const fn new(seed: Seed) -> Self {
        Self {
            rng: Xorshift64::new(seed),
            seed,
        }
    }

    /// Provider seeded from a v4 UUID, different on every run
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(Seed::from_entropy())
    }

    /// The seed this provider started from
    #[must_use]
    pub const fn seed(&self) -> Seed {
        self.seed
    }
}

impl Default for RandomData {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for RandomData {
    fn string(&mut self) -> String {
        let mut value = String::with_capacity(TEST_PREFIX.len() + RANDOM_LENGTH);
        value.push_str(TEST_PREFIX);
        for _ in 0..RANDOM_LENGTH {
            let index = self.rng.next_below(ALPHABET.len() as u64) as usize;
            value.push(char::from(ALPHABET[index]));
        }
        value
    }

    fn integer(&mut self) -> i64 {
        self.rng.next_below(i32::MAX as u64 + 1) as i64
    }
}
