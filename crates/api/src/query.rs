//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Largest page a client may request.
    pub const MAX_LIMIT: i64 = 100;

    /// Effective limit, clamped to `1..=MAX_LIMIT` (default 50).
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, Self::MAX_LIMIT)
    }

    /// Effective offset, clamped to non-negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Query parameters for session list endpoints (`?include_archived=true`).
#[derive(Debug, Deserialize)]
pub struct IncludeArchivedParams {
    #[serde(default)]
    pub include_archived: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let params = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(params.limit(), 50);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_clamps() {
        let params = PaginationParams {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(params.limit(), PaginationParams::MAX_LIMIT);
        assert_eq!(params.offset(), 0);
    }
}
