//! Response metadata returned alongside every decoded record.

use chrono::{DateTime, Duration, Utc};
use reqwest::header::{HeaderMap, DATE};
use std::ops::{Deref, DerefMut};

const HEADER_RATE_COUNT: &str = "X-Ratelimit-Count";
const HEADER_RATE_LIMIT: &str = "X-Ratelimit-Limit";
const HEADER_RATE_RESET: &str = "X-RateLimit-Reset";

/// Rate-limit state reported by the API.
///
/// Fields the server did not send (or sent in an unexpected format) stay at
/// their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rate {
    /// Requests made in the current window.
    pub count: u32,
    /// Requests allowed per window.
    pub limit: u32,
    /// When the window resets.
    pub reset: Option<DateTime<Utc>>,
}

impl Rate {
    /// Read the rate-limit headers of a response.
    ///
    /// The reset header holds seconds relative to the response's `Date`
    /// header, so both are needed to produce an absolute time.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let count = header_str(headers, HEADER_RATE_COUNT)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let limit = header_str(headers, HEADER_RATE_LIMIT)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let reset = header_str(headers, HEADER_RATE_RESET)
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|secs| *secs != 0)
            .and_then(|secs| {
                let date = httpdate::parse_http_date(header_str(headers, DATE.as_str())?).ok()?;
                DateTime::<Utc>::from(date).checked_add_signed(Duration::try_seconds(secs)?)
            });

        Self {
            count,
            limit,
            reset,
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok().map(str::trim)
}

/// A decoded record together with the metadata of the response it came from.
///
/// `Response<T>` derefs to `T`, so a `Response<Vec<Category>>` can be
/// iterated directly.
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The decoded body.
    pub data: T,
    /// Rate-limit state.
    pub rate: Rate,
    /// HTTP status code (200 for cache hits).
    pub status: u16,
    /// Whether the body was served from the response cache.
    pub cached: bool,
}

impl<T> Response<T> {
    /// Take ownership of the decoded body.
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for Response<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(*v));
        }
        map
    }

    #[test]
    fn test_reset_is_date_plus_seconds() {
        let rate = Rate::from_headers(&headers(&[
            ("x-ratelimit-count", "5"),
            ("x-ratelimit-limit", "100"),
            ("x-ratelimit-reset", "60"),
            ("date", "Sun, 06 Nov 1994 08:49:37 GMT"),
        ]));

        assert_eq!(rate.count, 5);
        assert_eq!(rate.limit, 100);
        let expected = Utc.with_ymd_and_hms(1994, 11, 6, 8, 50, 37).unwrap();
        assert_eq!(rate.reset, Some(expected));
    }

    #[test]
    fn test_missing_or_bad_headers_are_zero() {
        assert_eq!(Rate::from_headers(&HeaderMap::new()), Rate::default());

        let rate = Rate::from_headers(&headers(&[
            ("x-ratelimit-count", "lots"),
            ("x-ratelimit-limit", "250"),
            ("x-ratelimit-reset", "60"),
            ("date", "yesterday"),
        ]));
        assert_eq!(rate.count, 0);
        assert_eq!(rate.limit, 250);
        assert!(rate.reset.is_none());

        // Reset without a Date header cannot be made absolute.
        let rate = Rate::from_headers(&headers(&[("x-ratelimit-reset", "60")]));
        assert!(rate.reset.is_none());
    }

    #[test]
    fn test_response_deref() {
        let mut response = Response {
            data: vec![1, 2, 3],
            rate: Rate::default(),
            status: 200,
            cached: false,
        };
        assert_eq!(response.len(), 3);
        response.push(4);
        assert_eq!(response.into_inner(), vec![1, 2, 3, 4]);
    }
}
