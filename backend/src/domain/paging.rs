//! Paging window for catalogue listings.

use super::{Error, ErrorCode};

/// Offset used when the client sends none.
pub const DEFAULT_SKIP: i64 = 0;
/// Page size used when the client sends none.
pub const DEFAULT_LIMIT: i64 = 10;
/// Upper bound for both `skip` and `limit`.
pub const MAX_PAGE_VALUE: i64 = 50;

/// Validated `skip`/`limit` pair, both within `0..=50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    skip: u32,
    limit: u32,
}

impl PageWindow {
    /// Build a window from raw query values.
    ///
    /// Absent or non-numeric values take their defaults before the range is
    /// checked. Numbers that are not integers in `0..=50`, including
    /// fractions, exponents and values past `i64`, are rejected.
    ///
    /// # Examples
    /// ```
    /// use borga::domain::PageWindow;
    ///
    /// let window = PageWindow::from_query(None, Some("abc")).unwrap();
    /// assert_eq!((window.skip(), window.limit()), (0, 10));
    /// assert!(PageWindow::from_query(Some("51"), None).is_err());
    /// assert!(PageWindow::from_query(Some("1e2"), None).is_err());
    /// ```
    pub fn from_query(skip: Option<&str>, limit: Option<&str>) -> Result<Self, Error> {
        let skip = numeric_or(skip, DEFAULT_SKIP)?;
        let limit = numeric_or(limit, DEFAULT_LIMIT)?;
        Self::new(skip, limit)
    }

    /// Build a window from numeric values.
    pub fn new(skip: i64, limit: i64) -> Result<Self, Error> {
        let in_range = |value: i64| (0..=MAX_PAGE_VALUE).contains(&value);
        if !in_range(skip) || !in_range(limit) {
            return Err(invalid_query());
        }
        let to_u32 = |value: i64| u32::try_from(value).map_err(|_| invalid_query());
        Ok(Self {
            skip: to_u32(skip)?,
            limit: to_u32(limit)?,
        })
    }

    pub fn skip(self) -> u32 {
        self.skip
    }

    pub fn limit(self) -> u32 {
        self.limit
    }
}

fn invalid_query() -> Error {
    Error::from_code(ErrorCode::InvalidQueryParameters)
}

fn numeric_or(raw: Option<&str>, default: i64) -> Result<i64, Error> {
    let Some(value) = raw.map(str::trim) else {
        return Ok(default);
    };
    if let Ok(integer) = value.parse::<i64>() {
        return Ok(integer);
    }
    match value.parse::<f64>() {
        Ok(number) if !number.is_nan() => Err(invalid_query()),
        _ => Ok(default),
    }
}
