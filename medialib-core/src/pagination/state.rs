use medialib_model::SortField;

use super::value::ColumnValue;

/// The last-seen row of a page: its sort-column value plus its internal id.
///
/// The id totally orders rows that tie on the sort column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    pub id: i32,
    pub value: ColumnValue,
}

impl Boundary {
    pub fn new(id: i32, value: ColumnValue) -> Self {
        Self { id, value }
    }
}

/// Where in an ordered collection a cursor sits.
///
/// `boundary == None` is the start of the collection. `previous` marks a
/// cursor that walks back towards the start from `boundary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState<S> {
    pub sort: S,
    pub descending: bool,
    pub previous: bool,
    pub boundary: Option<Boundary>,
}

impl<S: SortField> PaginationState<S> {
    pub fn first_page(sort: S, descending: bool) -> Self {
        Self {
            sort,
            descending,
            previous: false,
            boundary: None,
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.boundary.is_none()
    }

    /// Physical direction the executor scans in.
    ///
    /// A previous-page cursor walks the opposite way from the display order;
    /// the fetched rows are reversed back afterwards.
    pub fn scan_descending(&self) -> bool {
        self.descending ^ self.previous
    }

    /// Cursor continuing forward past `boundary`, same sort and direction.
    pub fn after(&self, boundary: Boundary) -> Self {
        Self {
            sort: self.sort,
            descending: self.descending,
            previous: false,
            boundary: Some(boundary),
        }
    }

    /// Cursor walking back from `boundary`, same sort and direction.
    pub fn before(&self, boundary: Boundary) -> Self {
        Self {
            sort: self.sort,
            descending: self.descending,
            previous: true,
            boundary: Some(boundary),
        }
    }
}
