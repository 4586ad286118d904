//! Page/limit arithmetic for paginated listings.
//!
//! Query-string values are parsed leniently: an optional sign followed by
//! leading decimal digits, with anything after the digits ignored. A value
//! that does not parse, or parses to zero, falls back to the default.
//! Negative values are passed through untouched; the store decides what
//! to do with them.

/// Page used when the client sends none (or an unusable one).
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client sends none (or an unusable one).
pub const DEFAULT_LIMIT: i64 = 10;

/// A resolved pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Resolve raw `page` / `limit` query values into a window.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: or_default(page, DEFAULT_PAGE),
            limit: or_default(limit, DEFAULT_LIMIT),
        }
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn or_default(raw: Option<&str>, default: i64) -> i64 {
    match raw.and_then(parse_leading_int) {
        Some(0) | None => default,
        Some(value) => value,
    }
}

/// Parse the integer prefix of `raw`.
///
/// Leading whitespace is skipped and a single `+` or `-` is honoured.
/// Returns `None` when no digit follows, or when the value overflows `i64`.
///
/// # Examples
///
/// ```
/// use estoes_core::pagination::parse_leading_int;
/// assert_eq!(parse_leading_int("42"), Some(42));
/// assert_eq!(parse_leading_int(" 7items"), Some(7));
/// assert_eq!(parse_leading_int("-3"), Some(-3));
/// assert_eq!(parse_leading_int("abc"), None);
/// ```
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
