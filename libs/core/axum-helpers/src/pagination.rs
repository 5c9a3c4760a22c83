//! Page/limit parsing and page metadata for list endpoints.

use serde::Serialize;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Parses the leading integer of `raw`, ignoring leading whitespace and any
/// trailing garbage: `"2abc"` is 2, `"3.7"` is 3, `"abc"` is `None`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end]
        .bytes()
        .fold(0_i64, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as i64));

    Some(if negative { -magnitude } else { magnitude })
}

/// A normalized page request: `page >= 1`, `1 <= limit <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Normalizes raw `page`/`limit` query values.
    ///
    /// Missing or non-numeric `page` is 1 and anything below 1 is clamped to 1.
    /// Missing, non-numeric or zero `limit` is 10, otherwise it is clamped
    /// into `1..=100`.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(parse_leading_int)
            .map_or(1, |p| p.max(1) as u64);

        let limit = match limit.and_then(parse_leading_int) {
            None | Some(0) => DEFAULT_LIMIT,
            Some(l) => l.clamp(1, MAX_LIMIT as i64) as u64,
        };

        Self { page, limit }
    }

    /// Number of documents to skip.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata computed from a request and the total match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(request: &PageRequest, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(request.limit);
        Self {
            current_page: request.page,
            total_pages,
            total_count,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}
