//! Bounded retry for one model in the chain.
//!
//! The free inference endpoints answer 503 while a cold model loads, so a
//! short retry window is what separates "model is warming up" from a
//! premature fallback to the next model. The budget is deliberately small:
//! two retries with doubling delay, capped, with down-jitter so parallel
//! sessions do not hammer a warming model in lockstep.
//!
//! Retryable outcomes are 408, 409, 429, 5xx, and transport errors. A
//! `Retry-After` or `Retry-After-Ms` header overrides the computed delay
//! when it names something under a minute; anything longer is treated as
//! "give up on this model now" and left to the chain.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode, header::HeaderMap};

/// Retry budget for one model.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt. Zero means one attempt total.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per retry after that.
    pub initial_delay: Duration,
    /// Ceiling on the doubled delay.
    pub max_delay: Duration,
    /// Down-jitter fraction: the delay is scaled by a random factor in
    /// `[1 - jitter_factor, 1]`.
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            jitter_factor: 0.25,
        }
    }
}

/// How one model's request round ended.
#[derive(Debug)]
pub enum RetryOutcome {
    /// 2xx response.
    Success(Response),
    /// Non-2xx response, either non-retryable or still failing after the
    /// budget ran out. The response is kept for status inspection.
    HttpError(Response),
    /// Transport failure that survived the whole budget.
    ConnectionError {
        attempts: u32,
        source: reqwest::Error,
    },
    /// Transport failure that was never worth retrying (e.g. a malformed
    /// request body).
    NonRetryable(reqwest::Error),
}

impl RetryOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Send a request, retrying within the budget.
///
/// `build_request` runs once per attempt so every attempt gets a fresh body.
pub async fn send_with_retry<F>(build_request: F, config: &RetryConfig) -> RetryOutcome
where
    F: Fn() -> RequestBuilder,
{
    let attempts = config.max_retries + 1;

    for attempt in 0..attempts {
        let budget_left = attempt + 1 < attempts;

        match build_request().send().await {
            Ok(response) if response.status().is_success() => {
                return RetryOutcome::Success(response);
            }
            Ok(response) => {
                if !budget_left || !retryable_status(response.status()) {
                    return RetryOutcome::HttpError(response);
                }
                let delay = backoff_delay(attempt, config, Some(response.headers()));
                tracing::debug!(
                    status = %response.status(),
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis(),
                    "Retrying after error status"
                );
                tokio::time::sleep(delay).await;
            }
            Err(source) => {
                if !retryable_transport(&source) {
                    return RetryOutcome::NonRetryable(source);
                }
                if !budget_left {
                    return RetryOutcome::ConnectionError { attempts, source };
                }
                let delay = backoff_delay(attempt, config, None);
                tracing::debug!(
                    error = %source,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis(),
                    "Retrying after transport error"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }

    unreachable!("the final attempt always returns")
}

/// Statuses worth a second try. 409 shows up when the endpoint deduplicates
/// a racing warm-up request; everything else is the usual transient set.
#[must_use]
pub fn retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 409 | 429) || status.is_server_error()
}

fn retryable_transport(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout() || error.is_request()
}

/// Delay before the retry that follows attempt number `attempt` (zero
/// based). A usable `Retry-After` hint wins over the computed backoff.
#[must_use]
pub fn backoff_delay(attempt: u32, config: &RetryConfig, headers: Option<&HeaderMap>) -> Duration {
    if let Some(headers) = headers
        && let Some(hint) = retry_after_hint(headers)
    {
        return hint;
    }

    let doubled = config.initial_delay.as_secs_f64() * 2.0_f64.powi(attempt as i32);
    let capped = doubled.min(config.max_delay.as_secs_f64());
    let jitter = 1.0 - rand::random::<f64>() * config.jitter_factor;
    Duration::from_secs_f64(capped * jitter)
}

/// Server-provided delay, if one is present and sane.
///
/// `Retry-After-Ms` (fractional milliseconds) is consulted before the
/// standard `Retry-After` (whole seconds). Hints of zero or a minute and
/// longer are ignored.
#[must_use]
pub fn retry_after_hint(headers: &HeaderMap) -> Option<Duration> {
    let usable = |d: Duration| d > Duration::ZERO && d < Duration::from_secs(60);

    if let Some(value) = headers.get("retry-after-ms")
        && let Ok(text) = value.to_str()
        && let Ok(ms) = text.parse::<f64>()
    {
        let hint = Duration::from_secs_f64(ms / 1000.0);
        if usable(hint) {
            return Some(hint);
        }
    }

    if let Some(value) = headers.get("retry-after")
        && let Ok(text) = value.to_str()
        && let Ok(secs) = text.parse::<u64>()
    {
        let hint = Duration::from_secs(secs);
        if usable(hint) {
            return Some(hint);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::{Duration, HeaderMap, RetryConfig, StatusCode, backoff_delay, retry_after_hint, retryable_status};

    fn headers(name: &'static str, value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn transient_statuses_are_retryable() {
        for code in [408, 409, 429, 500, 502, 503, 504, 521] {
            assert!(
                retryable_status(StatusCode::from_u16(code).unwrap()),
                "{code} should be retryable"
            );
        }
    }

    #[test]
    fn client_errors_are_not_retryable() {
        for code in [400, 401, 403, 404, 422] {
            assert!(
                !retryable_status(StatusCode::from_u16(code).unwrap()),
                "{code} should not be retryable"
            );
        }
    }

    #[test]
    fn hint_prefers_milliseconds_over_seconds() {
        let mut map = headers("retry-after-ms", "1500");
        map.insert("retry-after", HeaderValue::from_static("5"));
        assert_eq!(retry_after_hint(&map), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn hint_falls_back_to_seconds() {
        assert_eq!(
            retry_after_hint(&headers("retry-after", "5")),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn unusable_hints_are_ignored() {
        assert_eq!(retry_after_hint(&headers("retry-after", "120")), None);
        assert_eq!(retry_after_hint(&headers("retry-after", "0")), None);
        assert_eq!(retry_after_hint(&headers("retry-after", "soon")), None);
        assert_eq!(retry_after_hint(&HeaderMap::new()), None);
    }

    #[test]
    fn backoff_doubles_within_jitter_bounds() {
        let config = RetryConfig::default();

        // attempt 0: base 500ms, jittered into [375ms, 500ms].
        for _ in 0..100 {
            let delay = backoff_delay(0, &config, None);
            assert!(delay >= Duration::from_millis(375) && delay <= Duration::from_millis(500));
        }
        // attempt 1: base 1000ms, jittered into [750ms, 1000ms].
        for _ in 0..100 {
            let delay = backoff_delay(1, &config, None);
            assert!(delay >= Duration::from_millis(750) && delay <= Duration::from_millis(1000));
        }
    }

    #[test]
    fn backoff_is_capped_at_max_delay() {
        let config = RetryConfig {
            jitter_factor: 0.0,
            ..RetryConfig::default()
        };
        assert_eq!(backoff_delay(30, &config, None), config.max_delay);
    }

    #[test]
    fn server_hint_overrides_computed_backoff() {
        let delay = backoff_delay(0, &RetryConfig::default(), Some(&headers("retry-after", "3")));
        assert_eq!(delay, Duration::from_secs(3));
    }
}
