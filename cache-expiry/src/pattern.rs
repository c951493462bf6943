//! Status code patterns used as policy keys.

use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;

/// Which status codes an expiration rule applies to.
///
/// Patterns are written as three characters, case-insensitively:
///
/// | Key    | Pattern                    | Matches            |
/// |--------|----------------------------|--------------------|
/// | `404`  | [`Exact(404)`](Self::Exact) | only 404           |
/// | `4xx`  | [`Class(4)`](Self::Class)   | 400 through 499    |
/// | `xxx`  | [`Default`](Self::Default)  | every status code  |
///
/// Only classes `1` to `5` are accepted, mirroring the status classes
/// defined for HTTP.
///
/// The derived ordering sorts from most to least specific, which is also
/// the order a [`Resolver`](crate::Resolver) consults them in.
///
/// # Examples
///
/// ```
/// use cache_expiry::StatusPattern;
///
/// assert_eq!("404".parse(), Ok(StatusPattern::Exact(404)));
/// assert_eq!("5XX".parse(), Ok(StatusPattern::Class(5)));
/// assert_eq!(StatusPattern::Class(5).to_string(), "5xx");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusPattern {
    /// A single status code, e.g. `404`.
    Exact(u16),
    /// Every code sharing the leading digit, e.g. `4` for `4xx`.
    Class(u8),
    /// The universal fallback, `xxx`.
    Default,
}

impl StatusPattern {
    /// Parses a pattern key, returning `None` when it has none of the
    /// three accepted shapes.
    pub fn parse(key: &str) -> Option<Self> {
        match *key.as_bytes() {
            [a, b, c] if is_wildcard(a) && is_wildcard(b) && is_wildcard(c) => Some(Self::Default),
            [class @ b'1'..=b'5', b, c] if is_wildcard(b) && is_wildcard(c) => {
                Some(Self::Class(class - b'0'))
            }
            [hundreds @ b'1'..=b'5', tens @ b'0'..=b'9', units @ b'0'..=b'9'] => {
                Some(Self::Exact(
                    u16::from(hundreds - b'0') * 100
                        + u16::from(tens - b'0') * 10
                        + u16::from(units - b'0'),
                ))
            }
            _ => None,
        }
    }

    /// The class pattern a status code falls into, taken from its leading
    /// digit (`404` is `4xx`, `1000` is `1xx`).
    ///
    /// Codes with fewer than three digits have no class; they can be served
    /// by an exact rule or the default only.
    pub fn class_of(code: u16) -> Option<Self> {
        if code < 100 {
            return None;
        }
        let mut leading = code;
        while leading >= 10 {
            leading /= 10;
        }
        // A single decimal digit.
        Some(Self::Class(leading as u8))
    }

    /// Returns `true` if the pattern covers `code`.
    pub fn matches(&self, code: u16) -> bool {
        match self {
            Self::Exact(expected) => *expected == code,
            Self::Class(_) => Self::class_of(code).as_ref() == Some(self),
            Self::Default => true,
        }
    }
}

fn is_wildcard(byte: u8) -> bool {
    byte.eq_ignore_ascii_case(&b'x')
}

impl FromStr for StatusPattern {
    type Err = PolicyError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::parse(key).ok_or_else(|| PolicyError::InvalidStatusPattern(key.to_owned()))
    }
}

impl fmt::Display for StatusPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(code) => write!(f, "{code}"),
            Self::Class(class) => write!(f, "{class}xx"),
            Self::Default => f.write_str("xxx"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default() {
        assert_eq!(StatusPattern::parse("xxx"), Some(StatusPattern::Default));
        assert_eq!(StatusPattern::parse("XXX"), Some(StatusPattern::Default));
        assert_eq!(StatusPattern::parse("xXx"), Some(StatusPattern::Default));
    }

    #[test]
    fn test_parse_class() {
        assert_eq!(StatusPattern::parse("1xx"), Some(StatusPattern::Class(1)));
        assert_eq!(StatusPattern::parse("4XX"), Some(StatusPattern::Class(4)));
        assert_eq!(StatusPattern::parse("5xX"), Some(StatusPattern::Class(5)));
    }

    #[test]
    fn test_parse_exact() {
        assert_eq!(StatusPattern::parse("100"), Some(StatusPattern::Exact(100)));
        assert_eq!(StatusPattern::parse("404"), Some(StatusPattern::Exact(404)));
        assert_eq!(StatusPattern::parse("599"), Some(StatusPattern::Exact(599)));
    }

    #[test]
    fn test_parse_rejects_unknown_shapes() {
        for key in [
            "", "abc", "6xx", "0xx", "600", "099", "40", "4040", "4x4", "x04", " 404", "xxxx",
            "4xxx", "４04",
        ] {
            assert_eq!(StatusPattern::parse(key), None, "{key:?} should be rejected");
        }
    }

    #[test]
    fn test_from_str_reports_key() {
        assert_eq!(
            "abc".parse::<StatusPattern>(),
            Err(PolicyError::InvalidStatusPattern("abc".to_owned()))
        );
    }

    #[test]
    fn test_display_is_normalized() {
        assert_eq!(StatusPattern::parse("XXX").unwrap().to_string(), "xxx");
        assert_eq!(StatusPattern::parse("3XX").unwrap().to_string(), "3xx");
        assert_eq!(StatusPattern::parse("301").unwrap().to_string(), "301");
    }

    #[test]
    fn test_class_of() {
        assert_eq!(StatusPattern::class_of(404), Some(StatusPattern::Class(4)));
        assert_eq!(StatusPattern::class_of(100), Some(StatusPattern::Class(1)));
        assert_eq!(StatusPattern::class_of(999), Some(StatusPattern::Class(9)));
        assert_eq!(StatusPattern::class_of(99), None);
        assert_eq!(StatusPattern::class_of(1000), Some(StatusPattern::Class(1)));
        assert_eq!(StatusPattern::class_of(65535), Some(StatusPattern::Class(6)));
    }

    #[test]
    fn test_matches() {
        assert!(StatusPattern::Exact(404).matches(404));
        assert!(!StatusPattern::Exact(404).matches(403));
        assert!(StatusPattern::Class(4).matches(403));
        assert!(!StatusPattern::Class(4).matches(500));
        assert!(StatusPattern::Default.matches(42));
    }

    #[test]
    fn test_ordering_is_most_specific_first() {
        let mut patterns = vec![
            StatusPattern::Default,
            StatusPattern::Class(2),
            StatusPattern::Exact(404),
            StatusPattern::Class(1),
            StatusPattern::Exact(200),
        ];
        patterns.sort();
        assert_eq!(
            patterns,
            vec![
                StatusPattern::Exact(200),
                StatusPattern::Exact(404),
                StatusPattern::Class(1),
                StatusPattern::Class(2),
                StatusPattern::Default,
            ]
        );
    }
}
