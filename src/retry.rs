//! Retry policy for provider calls

use std::time::Duration;

use crate::error::{Error, Result};

/// Delay between attempts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Same delay before every retry
    Fixed(Duration),
    /// `initial * factor^(attempt - 1)`, capped at `max`
    Exponential {
        initial: Duration,
        factor: f64,
        max: Duration,
    },
}

impl Backoff {
    /// Delay to wait after failed attempt number `attempt` (1-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Self::Fixed(delay) => delay,
            Self::Exponential { initial, factor, max } => {
                let exponent = attempt.saturating_sub(1) as i32;
                let secs = initial.as_secs_f64() * factor.powi(exponent);
                if secs.is_finite() && secs < max.as_secs_f64() {
                    Duration::from_secs_f64(secs)
                } else {
                    max
                }
            }
        }
    }
}

/// How many times to try, and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Backoff) -> Result<Self> {
        if max_attempts == 0 {
            return Err(Error::invalid("retry attempts must be at least 1"));
        }
        Ok(Self { max_attempts, backoff })
    }

    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: Backoff::Fixed(Duration::ZERO),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Run `op` until it succeeds, sleeping between attempts
    pub fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnMut(u32) -> Result<T>,
    {
        self.run_with_sleep(op, std::thread::sleep)
    }

    /// Same as [`RetryPolicy::run`] with a custom sleep function
    pub fn run_with_sleep<T, F, S>(&self, mut op: F, mut sleep: S) -> Result<T>
    where
        F: FnMut(u32) -> Result<T>,
        S: FnMut(Duration),
    {
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts => {
                    log::warn!(
                        "Attempt {}/{} failed: {} - retrying",
                        attempt,
                        self.max_attempts,
                        e
                    );
                    sleep(self.backoff.delay(attempt));
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::Fixed(Duration::from_secs(2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succeeds_after_failures() {
        let policy = RetryPolicy::default();
        let mut slept = Vec::new();

        let result = policy.run_with_sleep(
            |attempt| {
                if attempt < 3 {
                    Err(Error::Network("connection reset".to_string()))
                } else {
                    Ok(attempt)
                }
            },
            |d| slept.push(d),
        );

        assert_eq!(result.unwrap(), 3);
        assert_eq!(slept, vec![Duration::from_secs(2); 2]);
    }

    #[test]
    fn test_returns_last_error() {
        let policy = RetryPolicy::new(2, Backoff::Fixed(Duration::ZERO)).unwrap();
        let mut calls = 0;

        let result: Result<()> = policy.run_with_sleep(
            |attempt| {
                calls += 1;
                Err(Error::provider(format!("attempt {}", attempt)))
            },
            |_| {},
        );

        assert_eq!(calls, 2);
        assert_eq!(result.unwrap_err().to_string(), "Lyrics provider error: attempt 2");
    }

    #[test]
    fn test_exponential_backoff_is_capped() {
        let backoff = Backoff::Exponential {
            initial: Duration::from_millis(500),
            factor: 2.0,
            max: Duration::from_secs(3),
        };

        assert_eq!(backoff.delay(1), Duration::from_millis(500));
        assert_eq!(backoff.delay(2), Duration::from_secs(1));
        assert_eq!(backoff.delay(3), Duration::from_secs(2));
        assert_eq!(backoff.delay(4), Duration::from_secs(3));
        assert_eq!(backoff.delay(40), Duration::from_secs(3));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        assert!(RetryPolicy::new(0, Backoff::Fixed(Duration::ZERO)).is_err());
        assert_eq!(RetryPolicy::none().max_attempts(), 1);
    }
}
