//! Identifier generation
//!
//! Every article and newsletter issue gets an opaque string id at creation.
//! The preferred path draws 128 bits from the operating system CSPRNG and
//! hex-encodes them. When the secure source is unavailable, the id is a
//! clock-seeded pseudo-random value followed by the current timestamp, both
//! in hex.
//!
//! Uniqueness is probabilistic only. Nothing downstream enforces it.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Source of random bytes for id generation
pub trait EntropySource {
    /// Fill `buf` with random bytes
    fn fill(&self, buf: &mut [u8]) -> Result<(), getrandom::Error>;
}

/// Operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), getrandom::Error> {
        getrandom::getrandom(buf)
    }
}

/// Generates ids from an entropy source, falling back to a weak composite
/// when the source fails
#[derive(Debug, Clone, Default)]
pub struct IdGenerator<E = OsEntropy> {
    source: E,
}

impl IdGenerator<OsEntropy> {
    /// Generator backed by the OS CSPRNG
    pub fn new() -> Self {
        Self { source: OsEntropy }
    }
}

impl<E: EntropySource> IdGenerator<E> {
    /// Generator backed by a specific entropy source
    pub fn with_source(source: E) -> Self {
        Self { source }
    }

    /// Produce a new id. Always succeeds.
    pub fn generate(&self) -> String {
        let mut bytes = [0u8; 16];
        match self.source.fill(&mut bytes) {
            Ok(()) => format!("{:032x}", u128::from_be_bytes(bytes)),
            Err(e) => {
                tracing::debug!("Secure random source unavailable ({}), using fallback id", e);
                fallback_id()
            }
        }
    }
}

/// Generate an id using the OS CSPRNG
pub fn generate_id() -> String {
    IdGenerator::new().generate()
}

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Pseudo-random fraction digits followed by the millisecond timestamp
fn fallback_id() -> String {
    let now = Utc::now();
    let nanos = now.timestamp_nanos_opt().unwrap_or_default() as u64;
    let counter = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);

    // 52 bits, the mantissa width of a double in [0, 1)
    let fraction = splitmix64(nanos ^ counter.rotate_left(32)) >> 12;
    let millis = now.timestamp_millis().max(0) as u64;

    format!("{:x}{:x}", fraction, millis)
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Unavailable;

    impl EntropySource for Unavailable {
        fn fill(&self, _buf: &mut [u8]) -> Result<(), getrandom::Error> {
            Err(getrandom::Error::UNSUPPORTED)
        }
    }

    struct Fixed(u8);

    impl EntropySource for Fixed {
        fn fill(&self, buf: &mut [u8]) -> Result<(), getrandom::Error> {
            buf.fill(self.0);
            Ok(())
        }
    }

    #[test]
    fn test_secure_id_is_32_hex_chars() {
        let id = generate_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_secure_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_fixed_source_encodes_all_bytes() {
        let id = IdGenerator::with_source(Fixed(0xab)).generate();
        assert_eq!(id, "ab".repeat(16));

        // Leading zero bytes are kept
        let id = IdGenerator::with_source(Fixed(0x00)).generate();
        assert_eq!(id, "0".repeat(32));
    }

    #[test]
    fn test_fallback_when_source_unavailable() {
        let generator = IdGenerator::with_source(Unavailable);
        let id = generator.generate();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

        let millis = format!("{:x}", Utc::now().timestamp_millis());
        // Timestamp hex is the suffix (same length for the next few centuries)
        assert!(id.len() > millis.len());
    }

    #[test]
    fn test_fallback_ids_differ() {
        let generator = IdGenerator::with_source(Unavailable);
        let ids: HashSet<String> = (0..100).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 100);
    }
}
