//! Path-segment escaping — the percent-encoding flavor
//!
//! Path segments percent-encode (space is `%20`); query values form-encode
//! (space is `+`, handled by [`Query`](crate::Query) and
//! [`build_query`](crate::build_query)). The two MUST stay separate
//! routines: a value built by one and read by the other corrupts spaces and
//! plus signs.

use std::borrow::Cow;

/// Percent-encode a decoded value for placement in a path segment.
///
/// # Example
///
/// ```
/// use trail::escape_segment;
///
/// assert_eq!(escape_segment("fo o"), "fo%20o");
/// ```
#[must_use]
pub fn escape_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Percent-decode a raw path segment.
///
/// Never fails: input with invalid percent sequences or non-UTF-8 escapes
/// comes back unchanged. `+` is NOT a space in path segments.
///
/// # Example
///
/// ```
/// use trail::unescape_segment;
///
/// assert_eq!(unescape_segment("fo%20o"), "fo o");
/// assert_eq!(unescape_segment("a+b"), "a+b");
/// ```
#[must_use]
pub fn unescape_segment(escaped: &str) -> String {
    urlencoding::decode(escaped)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| escaped.to_string())
}
