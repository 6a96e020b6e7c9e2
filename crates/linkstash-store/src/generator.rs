use linkstash_core::ShortCode;
use rand::distr::Alphanumeric;
use rand::Rng;

/// Trait for producing shortcode candidates.
///
/// Implementations are pure generators that don't interact with
/// storage; the store checks each candidate against the live shortcode
/// set and retries on collision.
pub trait CodeGenerator: Send + Sync + 'static {
    /// Produces a random candidate of the given length.
    fn candidate(&self, length: usize) -> ShortCode;
}

/// Random `[A-Za-z0-9]` shortcode candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl CodeGenerator for RandomGenerator {
    fn candidate(&self, length: usize) -> ShortCode {
        let code: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
