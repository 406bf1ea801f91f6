//! Injectable sources of time and randomness for payload builders.

use std::fmt;
use std::sync::Arc;

use rand::RngExt;

use crate::timestamp::UnixTimestamp;

/// Returns the current time.
pub type NowFn = Arc<dyn Fn() -> UnixTimestamp + Send + Sync>;

/// Returns 32 fresh bytes for an authorization nonce.
pub type NonceFn = Arc<dyn Fn() -> [u8; 32] + Send + Sync>;

/// Options shared by payload builders.
///
/// Defaults read the system clock and draw nonces from the thread-local
/// CSPRNG. Tests replace both to get byte-for-byte reproducible payloads.
#[derive(Clone)]
pub struct PayerOptions {
    now: NowFn,
    nonce: NonceFn,
}

impl Default for PayerOptions {
    fn default() -> Self {
        Self {
            now: Arc::new(UnixTimestamp::now),
            nonce: Arc::new(|| rand::rng().random::<[u8; 32]>()),
        }
    }
}

impl fmt::Debug for PayerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayerOptions").finish_non_exhaustive()
    }
}

impl PayerOptions {
    /// Creates options with the system clock and random nonces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_now_fn<F>(mut self, now: F) -> Self
    where
        F: Fn() -> UnixTimestamp + Send + Sync + 'static,
    {
        self.now = Arc::new(now);
        self
    }

    /// Replaces the nonce source.
    #[must_use]
    pub fn with_nonce_fn<F>(mut self, nonce: F) -> Self
    where
        F: Fn() -> [u8; 32] + Send + Sync + 'static,
    {
        self.nonce = Arc::new(nonce);
        self
    }

    /// Reads the configured clock.
    #[must_use]
    pub fn now(&self) -> UnixTimestamp {
        (self.now)()
    }

    /// Draws a nonce from the configured source.
    #[must_use]
    pub fn nonce(&self) -> [u8; 32] {
        (self.nonce)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_are_used() {
        let options = PayerOptions::new()
            .with_now_fn(|| UnixTimestamp::from_secs(42))
            .with_nonce_fn(|| [7u8; 32]);
        assert_eq!(options.now(), UnixTimestamp::from_secs(42));
        assert_eq!(options.nonce(), [7u8; 32]);
    }

    #[test]
    fn test_default_nonces_differ() {
        let options = PayerOptions::default();
        assert_ne!(options.nonce(), options.nonce());
    }

    #[test]
    fn test_clone_shares_sources() {
        let options = PayerOptions::new().with_now_fn(|| UnixTimestamp::from_secs(9));
        let cloned = options.clone();
        assert_eq!(cloned.now().as_secs(), 9);
    }
}
