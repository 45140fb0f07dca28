//! Environment abstraction for deterministic testing.
//!
//! Decouples the codec from system resources (wall clock, randomness).
//! Tests inject a fixed clock and a scripted RNG; production uses
//! [`SystemEnv`] with the real system clock and OS entropy.

/// Abstract environment providing wall-clock time and randomness.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `random_bytes()` uses cryptographically secure entropy in production
/// - `now_unix_ns()` tracks real wall-clock time in production (tokens embed
///   it as absolute issuance time, and decoders compare it against TTLs)
pub trait Environment: Clone + Send + Sync + 'static {
    /// Current wall-clock time as nanoseconds since the Unix epoch.
    ///
    /// Wall clock, not a monotonic instant: the value is serialized into
    /// tokens and compared by independent verifiers, possibly on other
    /// machines. Strict monotonicity across calls is not required.
    fn now_unix_ns(&self) -> u64;

    /// Fills the provided buffer with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]);
}

/// Production environment using the system clock and OS cryptographic RNG.
///
/// # Security
///
/// Randomness comes from getrandom, which provides OS-level cryptographic
/// entropy (e.g. /dev/urandom on Linux, `BCryptGenRandom` on Windows).
/// Suitable for keys and nonces.
///
/// # Panics
///
/// Panics if the OS RNG fails. This is intentional - without functioning
/// cryptographic randomness neither keys nor nonces can be produced safely,
/// and falling back to a weaker source would be worse than aborting.
#[derive(Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    #[allow(clippy::expect_used)]
    fn now_unix_ns(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("invariant: system clock is after Unix epoch (1970-01-01)")
            .as_nanos() as u64
    }

    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - cannot seal tokens securely");
    }
}
