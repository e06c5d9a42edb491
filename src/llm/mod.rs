//! Text generation backends used for scoring and summarizing sections.
//!
//! The rest of the crate only sees the [`TextGenerator`] trait; the
//! [`OllamaClient`] talks to a locally hosted Ollama server.

mod ollama;

pub use ollama::{OllamaClient, DEFAULT_HOST, DEFAULT_MODEL};

use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};

/// Number of readiness probes before giving up.
pub const DEFAULT_READY_RETRIES: u32 = 5;

/// Pause between readiness probes.
pub const DEFAULT_READY_DELAY: Duration = Duration::from_secs(3);

/// A black-box text completion service.
pub trait TextGenerator: Send + Sync {
    /// Whether the service currently answers.
    fn is_ready(&self) -> bool;

    /// Complete `prompt`, producing at most `max_tokens` tokens.
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String>;
}

/// Poll `generator` until it is ready.
///
/// Probes up to `retries` times, sleeping `delay` after each failed probe,
/// and returns [`Error::ServiceUnavailable`] when every probe failed.
pub fn wait_until_ready<G: TextGenerator + ?Sized>(
    generator: &G,
    retries: u32,
    delay: Duration,
) -> Result<()> {
    for attempt in 1..=retries {
        if generator.is_ready() {
            log::info!("Model service is ready");
            return Ok(());
        }
        log::warn!("Waiting for model service... ({}/{})", attempt, retries);
        thread::sleep(delay);
    }
    Err(Error::ServiceUnavailable(retries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyService {
        probes: AtomicU32,
        ready_after: u32,
    }

    impl TextGenerator for FlakyService {
        fn is_ready(&self) -> bool {
            self.probes.fetch_add(1, Ordering::SeqCst) + 1 >= self.ready_after
        }

        fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_ready_after_retries() {
        let service = FlakyService { probes: AtomicU32::new(0), ready_after: 3 };
        wait_until_ready(&service, 5, Duration::ZERO).unwrap();
        assert_eq!(service.probes.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_gives_up_after_retries() {
        let service = FlakyService { probes: AtomicU32::new(0), ready_after: 100 };
        let err = wait_until_ready(&service, 4, Duration::ZERO).unwrap_err();
        assert!(matches!(err, Error::ServiceUnavailable(4)));
        assert_eq!(service.probes.load(Ordering::SeqCst), 4);
    }
}
