use std::ops::Range;

use parley_types::api::{Direction, Page, SortOrder};
use parley_types::models::Identified;

use crate::cursor::Cursor;
use crate::error::{ApiError, ApiResult};

pub const DEFAULT_PAGE_SIZE: usize = 2;
pub const MAX_PAGE_SIZE: usize = 100;

pub fn clamp_page_size(size: Option<usize>) -> usize {
    size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
}

/// Page size given as a raw query string.
pub fn parse_page_size(raw: Option<&str>) -> ApiResult<usize> {
    match raw.map(str::trim) {
        None | Some("") => Ok(clamp_page_size(None)),
        Some(s) => s
            .parse::<usize>()
            .map(|n| clamp_page_size(Some(n)))
            .map_err(|_| ApiError::InvalidPageSize(s.to_string())),
    }
}

/// The cursor's sort when there is one, the requested sort otherwise.
pub fn effective_sort(requested: SortOrder, cursor: Option<&Cursor>) -> SortOrder {
    cursor.map_or(requested, |c| c.sort)
}

/// Stable sort on a creation-time key.
pub fn sort_rows<T, K, F>(rows: &mut [T], sort: SortOrder, key: F)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    match sort {
        SortOrder::OldestFirst => rows.sort_by(|a, b| key(a).cmp(&key(b))),
        SortOrder::NewestFirst => rows.sort_by(|a, b| key(b).cmp(&key(a))),
    }
}

/// Index range of the page that starts (or ends) next to `anchor`.
///
/// `next` takes the rows after the anchor, `prev` the rows before it. The
/// result is always within `0..len`; running off either end just yields a
/// shorter page.
pub fn window(len: usize, page_size: usize, anchor: usize, direction: Direction) -> Range<usize> {
    let (start, end) = match direction {
        Direction::Next => {
            let start = anchor.saturating_add(1);
            (start, start.saturating_add(page_size))
        }
        Direction::Prev => (anchor.saturating_sub(page_size), anchor),
    };
    start.min(len)..end.min(len)
}

/// Cut one page out of an already sorted collection.
pub fn select_page<T>(sorted: Vec<T>, page_size: usize, cursor: Option<&Cursor>) -> ApiResult<Vec<T>>
where
    T: Identified,
{
    let range = match cursor {
        None => 0..page_size.min(sorted.len()),
        Some(cursor) => {
            let anchor = sorted
                .iter()
                .position(|row| row.id() == cursor.last_seen)
                .ok_or_else(|| {
                    ApiError::InvalidCursor(format!("unknown lastSeen {}", cursor.last_seen))
                })?;
            window(sorted.len(), page_size, anchor, cursor.direction)
        }
    };

    Ok(sorted
        .into_iter()
        .skip(range.start)
        .take(range.end - range.start)
        .collect())
}

/// Wrap rows with cursors pointing past either end of them.
pub fn into_page<T: Identified>(sort: SortOrder, rows: Vec<T>) -> Page<T> {
    let cursor_next = rows
        .last()
        .map(|row| Cursor::new(sort, row.id(), Direction::Next).encode());
    let cursor_prev = rows
        .first()
        .map(|row| Cursor::new(sort, row.id(), Direction::Prev).encode());

    Page {
        sort,
        rows,
        cursor_next,
        cursor_prev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, i64);

    impl Identified for Row {
        fn id(&self) -> &str {
            self.0
        }
    }

    fn rows() -> Vec<Row> {
        vec![Row("a", 1), Row("b", 2), Row("c", 3), Row("d", 4), Row("e", 5)]
    }

    fn ids(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.0).collect()
    }

    #[test]
    fn page_size_parsing() {
        assert_eq!(parse_page_size(None).unwrap(), DEFAULT_PAGE_SIZE);
        assert_eq!(parse_page_size(Some("")).unwrap(), DEFAULT_PAGE_SIZE);
        assert_eq!(parse_page_size(Some("5")).unwrap(), 5);
        assert_eq!(parse_page_size(Some("100000")).unwrap(), MAX_PAGE_SIZE);
        assert!(matches!(parse_page_size(Some("two")), Err(ApiError::InvalidPageSize(_))));
        assert!(matches!(parse_page_size(Some("-1")), Err(ApiError::InvalidPageSize(_))));
    }

    #[test]
    fn sort_orders() {
        let mut r = rows();
        sort_rows(&mut r, SortOrder::NewestFirst, |r| r.1);
        assert_eq!(ids(&r), ["e", "d", "c", "b", "a"]);

        sort_rows(&mut r, SortOrder::OldestFirst, |r| r.1);
        assert_eq!(ids(&r), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let mut r = vec![Row("x", 1), Row("y", 1), Row("z", 1)];
        sort_rows(&mut r, SortOrder::NewestFirst, |r| r.1);
        assert_eq!(ids(&r), ["x", "y", "z"]);
    }

    #[test]
    fn window_next_and_prev() {
        assert_eq!(window(5, 2, 1, Direction::Next), 2..4);
        assert_eq!(window(5, 2, 3, Direction::Prev), 1..3);
    }

    #[test]
    fn window_clamps_without_wrapping() {
        assert_eq!(window(5, 2, 4, Direction::Next), 5..5);
        assert_eq!(window(5, 3, 3, Direction::Next), 4..5);
        assert_eq!(window(5, 3, 1, Direction::Prev), 0..1);
        assert_eq!(window(5, 2, 0, Direction::Prev), 0..0);
    }

    #[test]
    fn first_page_without_cursor() {
        let page = select_page(rows(), 2, None).unwrap();
        assert_eq!(ids(&page), ["a", "b"]);

        let page = select_page(rows(), 10, None).unwrap();
        assert_eq!(page.len(), 5);
    }

    #[test]
    fn page_after_cursor() {
        let cursor = Cursor::new(SortOrder::OldestFirst, "b", Direction::Next);
        let page = select_page(rows(), 2, Some(&cursor)).unwrap();
        assert_eq!(ids(&page), ["c", "d"]);
    }

    #[test]
    fn page_before_cursor() {
        let cursor = Cursor::new(SortOrder::OldestFirst, "d", Direction::Prev);
        let page = select_page(rows(), 2, Some(&cursor)).unwrap();
        assert_eq!(ids(&page), ["b", "c"]);
    }

    #[test]
    fn unknown_anchor_is_invalid_cursor() {
        let cursor = Cursor::new(SortOrder::OldestFirst, "zz", Direction::Next);
        assert!(matches!(
            select_page(rows(), 2, Some(&cursor)),
            Err(ApiError::InvalidCursor(_))
        ));
    }

    #[test]
    fn cursors_point_at_first_and_last_rows() {
        let page = into_page(SortOrder::NewestFirst, vec![Row("c", 3), Row("b", 2)]);

        let next = Cursor::decode(page.cursor_next.as_deref().unwrap()).unwrap();
        let prev = Cursor::decode(page.cursor_prev.as_deref().unwrap()).unwrap();
        assert_eq!(next, Cursor::new(SortOrder::NewestFirst, "b", Direction::Next));
        assert_eq!(prev, Cursor::new(SortOrder::NewestFirst, "c", Direction::Prev));
    }

    #[test]
    fn empty_page_has_no_cursors() {
        let page = into_page::<Row>(SortOrder::OldestFirst, vec![]);
        assert!(page.cursor_next.is_none());
        assert!(page.cursor_prev.is_none());
    }
}
