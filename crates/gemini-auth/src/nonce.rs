//! Monotonic nonce generation
//!
//! Gemini rejects any private request whose nonce is not strictly greater
//! than the last nonce seen for the same API key. A raw wall-clock read is
//! not enough: two requests inside the same clock tick would sign equal
//! nonces and one would be rejected as a replay. The generator below is the
//! only shared mutable state in the signing core.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Strictly increasing nonce source for one credential set
///
/// Seeded from wall-clock milliseconds so nonces stay in a range the
/// exchange accepts across process restarts, then advanced with a CAS loop
/// so concurrent callers always observe distinct, increasing values.
///
/// One generator per credential set; holding it on the client (rather than
/// in a process-wide static) keeps multiple accounts in the same process
/// independent.
#[derive(Debug)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    /// Create a generator seeded from the current wall-clock time
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(unix_millis()),
        }
    }

    /// Produce the next nonce
    ///
    /// Returns `max(now_ms, last + 1)`: tracks the wall clock when it moves
    /// forward, and falls back to a plain increment when calls land inside
    /// the same millisecond or the clock steps backwards.
    pub fn next(&self) -> u64 {
        let now = unix_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_nonces_strictly_increase() {
        let gen = NonceGenerator::new();
        let mut prev = gen.next();
        for _ in 0..1000 {
            let next = gen.next();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn test_nonce_near_wall_clock() {
        let gen = NonceGenerator::new();
        let nonce = gen.next();
        let now = unix_millis();
        // Within a generous window of the current time
        assert!(nonce >= now.saturating_sub(1000));
        assert!(nonce <= now + 2000);
    }

    #[test]
    fn test_concurrent_nonces_distinct() {
        let gen = Arc::new(NonceGenerator::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let gen = Arc::clone(&gen);
            handles.push(std::thread::spawn(move || {
                (0..500).map(|_| gen.next()).collect::<Vec<u64>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            let nonces = handle.join().unwrap();
            // Per-thread sequences are increasing
            assert!(nonces.windows(2).all(|w| w[0] < w[1]));
            for nonce in nonces {
                assert!(seen.insert(nonce), "duplicate nonce {}", nonce);
            }
        }
        assert_eq!(seen.len(), 8 * 500);
    }

    #[test]
    fn test_generators_are_independent() {
        // Two generators (two accounts) may overlap freely; neither should
        // disturb the other's sequence.
        let a = NonceGenerator::new();
        let b = NonceGenerator::new();
        let a1 = a.next();
        let _ = b.next();
        let a2 = a.next();
        assert!(a2 > a1);
    }
}
