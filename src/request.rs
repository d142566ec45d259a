//! Request descriptors and query-string encoding.

use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;
use url::Url;

/// A fully resolved request, ready to be dispatched.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including the version segment and raw query.
    pub url: Url,
    /// Headers set by the client (authorization, user agent, content type).
    pub headers: HeaderMap,
    /// JSON-encoded body, if any.
    pub body: Option<Vec<u8>>,
}

/// Join `rel` onto `base`, prefixed with the version segment exactly once.
///
/// Leading slashes and an existing `{version}/` prefix are dropped from
/// `rel`. Percent-escapes in `rel` are kept as written. URL parsing would
/// collapse `.` and `..` segments (escaped or not), so paths containing them
/// are rejected.
pub(crate) fn resolve_url(base: &Url, version: &str, rel: &str) -> Result<Url> {
    let path = rel.split(['?', '#']).next().unwrap_or_default();
    if path.split(['/', '\\']).any(is_dot_segment) {
        return Err(Error::MalformedRequest(format!(
            "path {rel:?} contains a dot segment"
        )));
    }

    let rel = rel.trim_start_matches('/');
    let rel = match rel.strip_prefix(version) {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => rel,
    };

    base.join(&format!("/{version}/{rel}"))
        .map_err(|e| Error::MalformedRequest(format!("invalid path {rel:?}: {e}")))
}

/// Whether URL parsing treats `segment` as `.` or `..`.
pub(crate) fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// Append the query encoding of `opts` to `path`.
///
/// Fields skipped by the options' `Serialize` impl (the defaults) do not
/// appear. Keys are sorted, so the same options always encode the same way.
/// `None` leaves the path untouched.
pub fn add_options<O: Serialize>(path: &str, opts: Option<&O>) -> Result<String> {
    let Some(opts) = opts else {
        return Ok(path.to_string());
    };

    let query = encode_query(opts)?;
    if query.is_empty() {
        return Ok(path.to_string());
    }

    let sep = if path.contains('?') { '&' } else { '?' };
    Ok(format!("{path}{sep}{query}"))
}

/// Encode a serializable options value as `application/x-www-form-urlencoded`.
pub fn encode_query<O: Serialize>(opts: &O) -> Result<String> {
    let value = serde_json::to_value(opts)
        .map_err(|e| Error::MalformedRequest(format!("invalid query options: {e}")))?;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(String::new()),
        other => {
            return Err(Error::MalformedRequest(format!(
                "query options must serialize to an object, got {other}"
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(v) = scalar(&key, item)? {
                        pairs.push((key.clone(), v));
                    }
                }
            }
            value => {
                if let Some(v) = scalar(&key, value)? {
                    pairs.push((key, v));
                }
            }
        }
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    Ok(serializer.finish())
}

fn scalar(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(Error::MalformedRequest(format!(
            "query parameter {key:?} must be a scalar"
        ))),
    }
}

/// `skip_serializing_if` helper for numeric options.
pub(crate) fn is_zero<T: Default + PartialEq>(v: &T) -> bool {
    *v == T::default()
}

/// `skip_serializing_if` helper for flag options.
pub(crate) fn is_false(v: &bool) -> bool {
    !*v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    struct Opts {
        #[serde(skip_serializing_if = "is_zero")]
        count: u32,
        #[serde(skip_serializing_if = "is_false")]
        unread_only: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        continuation: Option<String>,
    }

    fn base() -> Url {
        Url::parse("https://cloud.feedly.com").unwrap()
    }

    #[test]
    fn test_resolve_url_prefixes_version_once() {
        for rel in ["categories", "/categories", "v3/categories", "/v3/categories", "v3//categories"] {
            let url = resolve_url(&base(), "v3", rel).unwrap();
            assert_eq!(url.as_str(), "https://cloud.feedly.com/v3/categories");
        }
        assert_eq!(resolve_url(&base(), "v3", "v3").unwrap().path(), "/v3/");
        // Only a whole leading segment counts as the version.
        assert_eq!(resolve_url(&base(), "v3", "v3x/a").unwrap().path(), "/v3/v3x/a");
    }

    #[test]
    fn test_resolve_url_keeps_escapes_and_query() {
        let url = resolve_url(
            &base(),
            "v3",
            "streams/feed%2Fhttp%3A%2F%2Fexample.com%2Frss/ids?count=10",
        )
        .unwrap();
        assert_eq!(url.path(), "/v3/streams/feed%2Fhttp%3A%2F%2Fexample.com%2Frss/ids");
        assert_eq!(url.query(), Some("count=10"));
    }

    #[test]
    fn test_resolve_url_keeps_dot_prefixed_segment() {
        let url = resolve_url(&base(), "v3", "entries/.mget").unwrap();
        assert_eq!(url.path(), "/v3/entries/.mget");
    }

    #[test]
    fn test_resolve_url_rejects_dot_segments() {
        for rel in [
            "../profile",
            "streams/./ids",
            "streams/%2e%2e/%2e%2e/profile",
            "streams/%2E/ids",
            "streams/.%2e/ids",
            "entries/..",
            "streams\\..\\profile",
        ] {
            assert!(
                matches!(resolve_url(&base(), "v3", rel), Err(Error::MalformedRequest(_))),
                "{rel} should be rejected"
            );
        }
        // Dots inside a segment or in the query are fine.
        assert!(resolve_url(&base(), "v3", "entries/.mget").is_ok());
        assert!(resolve_url(&base(), "v3", "streams/a..b/ids?continuation=..").is_ok());
    }

    #[test]
    fn test_is_dot_segment() {
        assert!(is_dot_segment("."));
        assert!(is_dot_segment("%2E%2e"));
        assert!(!is_dot_segment("..."));
        assert!(!is_dot_segment(".mget"));
        assert!(!is_dot_segment(""));
    }

    #[test]
    fn test_add_options_omits_defaults() {
        assert_eq!(add_options("streams/x/ids", Some(&Opts::default())).unwrap(), "streams/x/ids");
        assert_eq!(add_options::<Opts>("streams/x/ids", None).unwrap(), "streams/x/ids");

        let opts = Opts {
            count: 20,
            unread_only: true,
            continuation: Some("15a:2b+c/d=".into()),
        };
        assert_eq!(
            add_options("streams/x/ids", Some(&opts)).unwrap(),
            "streams/x/ids?continuation=15a%3A2b%2Bc%2Fd%3D&count=20&unreadOnly=true"
        );
    }

    #[test]
    fn test_add_options_extends_existing_query() {
        let opts = Opts {
            count: 5,
            ..Default::default()
        };
        assert_eq!(add_options("markers/reads?a=b", Some(&opts)).unwrap(), "markers/reads?a=b&count=5");
    }

    #[test]
    fn test_encode_query_rejects_non_objects() {
        assert!(matches!(encode_query(&42), Err(Error::MalformedRequest(_))));
        assert_eq!(encode_query(&()).unwrap(), "");
    }
}
