use serde::{Deserialize, Serialize};

use crate::entities::Entity;

/// Pagination side-channel returned next to list results.
///
/// A response carries exactly one of two shapes: offset-based (`page`,
/// `limit`, `items`, `total_pages`) or cursor-based (`has_next`,
/// `has_previous`, `next_cursor`, `limit`). Fields of the other shape stay
/// `None`; they are never defaulted to zero or `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub items: Option<u64>,
    pub total_pages: Option<u64>,
    pub has_next: Option<bool>,
    pub has_previous: Option<bool>,
    pub next_cursor: Option<String>,
}

/// Which of the two pagination shapes a [`Pagination`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationShape {
    Offset,
    Cursor,
    /// Only `limit` (or nothing) was sent.
    Unknown,
}

impl Entity for Pagination {
    const NAME: &'static str = "Pagination";
}

impl Pagination {
    pub fn shape(&self) -> PaginationShape {
        if self.page.is_some() || self.items.is_some() || self.total_pages.is_some() {
            PaginationShape::Offset
        } else if self.has_next.is_some()
            || self.has_previous.is_some()
            || self.next_cursor.is_some()
        {
            PaginationShape::Cursor
        } else {
            PaginationShape::Unknown
        }
    }

    /// Whether another page follows, for either shape.
    pub fn has_more(&self) -> bool {
        match self.shape() {
            PaginationShape::Offset => match (self.page, self.total_pages) {
                (Some(page), Some(total)) => page < total,
                _ => false,
            },
            PaginationShape::Cursor => self.has_next.unwrap_or(false),
            PaginationShape::Unknown => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_offset_pagination() {
        let pagination =
            Pagination::from_wire(json!({"page": 2, "limit": 20, "items": 100, "totalPages": 5}))
                .unwrap();
        assert_eq!(pagination.page, Some(2));
        assert_eq!(pagination.total_pages, Some(5));
        assert_eq!(pagination.has_next, None);
        assert_eq!(pagination.has_previous, None);
        assert_eq!(pagination.next_cursor, None);
        assert_eq!(pagination.shape(), PaginationShape::Offset);
        assert!(pagination.has_more());
    }

    #[test]
    fn test_cursor_pagination() {
        let pagination = Pagination::from_wire(json!({
            "hasNext": true,
            "hasPrevious": false,
            "limit": 20,
            "nextCursor": "cursor_123"
        }))
        .unwrap();
        assert_eq!(pagination.has_next, Some(true));
        assert_eq!(pagination.has_previous, Some(false));
        assert_eq!(pagination.next_cursor.as_deref(), Some("cursor_123"));
        assert_eq!(pagination.page, None);
        assert_eq!(pagination.items, None);
        assert_eq!(pagination.total_pages, None);
        assert_eq!(pagination.shape(), PaginationShape::Cursor);
        assert!(pagination.has_more());
    }

    #[test]
    fn test_pagination_roundtrip_both_shapes() {
        let offset = Pagination {
            page: Some(2),
            limit: Some(20),
            items: Some(100),
            total_pages: Some(5),
            ..Pagination::default()
        };
        let cursor = Pagination {
            limit: Some(20),
            has_next: Some(true),
            has_previous: Some(false),
            next_cursor: Some("cursor_123".into()),
            ..Pagination::default()
        };
        for pagination in [offset, cursor] {
            let wire = pagination.to_wire().unwrap();
            assert_eq!(Pagination::from_wire(wire.into()).unwrap(), pagination);
        }
    }

    #[test]
    fn test_last_offset_page() {
        let pagination = Pagination {
            page: Some(5),
            total_pages: Some(5),
            ..Pagination::default()
        };
        assert!(!pagination.has_more());
    }
}
