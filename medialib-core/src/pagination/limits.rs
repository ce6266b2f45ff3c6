use crate::error::{PaginationError, Result};

pub const DEFAULT_PAGE_LIMIT: u32 = 50;
pub const MAX_PAGE_LIMIT: u32 = 200;

/// Page-size policy applied to every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

impl PageLimits {
    /// Validate a requested page size; `None` picks the default.
    ///
    /// Out-of-range requests are rejected rather than clamped.
    pub fn resolve(&self, requested: Option<u32>) -> Result<u32> {
        let limit = requested.unwrap_or(self.default_limit);
        if limit == 0 || limit > self.max_limit {
            return Err(PaginationError::InvalidLimit {
                requested: limit,
                max: self.max_limit,
            });
        }
        Ok(limit)
    }
}
