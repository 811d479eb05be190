//! Startup support: bounded retry while the page is not ready, and the
//! errors that can abort startup.

use std::future::Future;

use crate::config::ConfigError;
use crate::consts::{BOOT_MAX_ATTEMPTS, BOOT_RETRY_INTERVAL_MS};
use crate::sim::PhysicsError;

/// Everything that can stop the game from starting
#[derive(Debug)]
pub enum BootError {
    NoWindow,
    NoDocument,
    /// A required page element never showed up
    NotReady { what: &'static str, retries: u32 },
    /// Element exists but is not a `<canvas>`
    NotACanvas(&'static str),
    Surface(String),
    Adapter(String),
    Device(String),
    Config(ConfigError),
    Scene(PhysicsError),
}

impl std::fmt::Display for BootError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootError::NoWindow => write!(f, "no browser window"),
            BootError::NoDocument => write!(f, "window has no document"),
            BootError::NotReady { what, retries } => {
                write!(f, "{} not available after {} retries", what, retries)
            }
            BootError::NotACanvas(id) => write!(f, "#{} is not a canvas element", id),
            BootError::Surface(e) => write!(f, "failed to create surface: {}", e),
            BootError::Adapter(e) => write!(f, "no suitable GPU adapter: {}", e),
            BootError::Device(e) => write!(f, "failed to create device: {}", e),
            BootError::Config(e) => write!(f, "invalid config: {}", e),
            BootError::Scene(e) => write!(f, "scene setup failed: {}", e),
        }
    }
}

impl std::error::Error for BootError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootError::Config(e) => Some(e),
            BootError::Scene(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for BootError {
    fn from(e: ConfigError) -> Self {
        BootError::Config(e)
    }
}

impl From<PhysicsError> for BootError {
    fn from(e: PhysicsError) -> Self {
        BootError::Scene(e)
    }
}

/// Bounded polling for something the page provides asynchronously
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Wait between attempts
    pub interval_ms: i32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: BOOT_MAX_ATTEMPTS,
            interval_ms: BOOT_RETRY_INTERVAL_MS,
        }
    }
}

impl RetryPolicy {
    /// Probe until it yields a value, awaiting `wait(interval_ms)` between
    /// attempts. The retry counter is local to this call.
    pub async fn poll<T, P, W, F>(
        &self,
        what: &'static str,
        mut probe: P,
        mut wait: W,
    ) -> Result<T, BootError>
    where
        P: FnMut() -> Option<T>,
        W: FnMut(i32) -> F,
        F: Future<Output = ()>,
    {
        let mut retries = 0;
        loop {
            if let Some(value) = probe() {
                if retries > 0 {
                    log::info!("{} ready after {} retries", what, retries);
                }
                return Ok(value);
            }

            if retries >= self.max_retries {
                log::error!("{} failed to load after {} retries", what, retries);
                return Err(BootError::NotReady { what, retries });
            }
            retries += 1;
            log::info!(
                "{} not ready yet, retrying... ({}/{})",
                what,
                retries,
                self.max_retries
            );
            wait(self.interval_ms).await;
        }
    }
}

/// Red error panel shown in place of the game
pub fn error_banner_html(err: &BootError) -> String {
    let message = err
        .to_string()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(
        "<p style=\"color: white; padding: 20px; background: #ff0000;\">Error: {}. Please refresh the page.</p>",
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    fn block_on<F: Future>(fut: F) -> F::Output {
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(value) = fut.as_mut().poll(&mut cx) {
                return value;
            }
        }
    }

    #[test]
    fn test_ready_immediately() {
        let policy = RetryPolicy::default();
        let mut waits = 0;
        let result = block_on(policy.poll(
            "canvas",
            || Some(7),
            |_| {
                waits += 1;
                std::future::ready(())
            },
        ));
        assert_eq!(result.unwrap(), 7);
        assert_eq!(waits, 0);
    }

    #[test]
    fn test_ready_after_retries() {
        let policy = RetryPolicy {
            max_retries: 5,
            interval_ms: 100,
        };
        let mut calls = 0;
        let mut waited_ms = 0;
        let result = block_on(policy.poll(
            "canvas",
            || {
                calls += 1;
                (calls == 4).then_some("ok")
            },
            |ms| {
                waited_ms += ms;
                std::future::ready(())
            },
        ));
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls, 4);
        assert_eq!(waited_ms, 300);
    }

    #[test]
    fn test_gives_up() {
        let policy = RetryPolicy {
            max_retries: 3,
            interval_ms: 1,
        };
        let mut calls = 0;
        let result: Result<(), _> = block_on(policy.poll(
            "canvas",
            || {
                calls += 1;
                None
            },
            |_| std::future::ready(()),
        ));
        assert!(matches!(
            result,
            Err(BootError::NotReady {
                what: "canvas",
                retries: 3
            })
        ));
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_error_banner_escapes() {
        let html = error_banner_html(&BootError::Surface("<bad>".into()));
        assert!(html.contains("&lt;bad&gt;"));
        assert!(html.contains("background: #ff0000"));
    }
}
