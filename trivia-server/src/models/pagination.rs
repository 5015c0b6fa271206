//! Fixed-size pagination for question listings

/// Questions returned per page
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Page selection (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
}

impl Pagination {
    pub fn new(page: i64) -> Self {
        Self { page }
    }

    /// Parse the raw `?page=` value.
    ///
    /// A missing or non-integer value selects page 1. Zero and negative
    /// pages are kept as-is and select nothing. Integers beyond `i64`
    /// saturate, so they still select nothing.
    pub fn from_query(raw: Option<&str>) -> Self {
        let page = raw.and_then(parse_page).unwrap_or(1);
        Self { page }
    }

    /// Offset of the first row on this page, `None` for pages below 1.
    pub fn offset(&self) -> Option<usize> {
        if self.page < 1 {
            return None;
        }
        usize::try_from(self.page - 1)
            .ok()
            .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
    }

    /// Rows `[(page-1)*10, page*10)` clamped to the input.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        match self.offset() {
            Some(start) if start < rows.len() => {
                let end = (start + QUESTIONS_PER_PAGE).min(rows.len());
                &rows[start..end]
            }
            _ => &[],
        }
    }
}

fn parse_page(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(page) = raw.parse() {
        return Some(page);
    }

    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Well-formed but out of range
    Some(if negative { i64::MIN } else { i64::MAX })
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1 }
    }
}
