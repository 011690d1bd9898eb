//! Cursor paging for list endpoints.
//!
//! Cursors are opaque to clients. Internally they carry the offset of the
//! first item of the page they point at.

use core::str::FromStr;

use serde::Serialize;

use flowdeck_core::DomainError;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Cursor(usize);

impl Cursor {
    pub fn offset(&self) -> usize {
        self.0
    }
}

impl core::fmt::Display for Cursor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "o{}", self.0)
    }
}

impl FromStr for Cursor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('o')
            .and_then(|n| n.parse::<usize>().ok())
            .map(Cursor)
            .ok_or_else(|| DomainError::validation(format!("invalid cursor '{s}'")))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub cursor: Cursor,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            cursor: Cursor::default(),
        }
    }
}

impl PageRequest {
    /// Limit defaults to 10 and is clamped to `1..=100`.
    pub fn new(limit: Option<usize>, cursor: Option<Cursor>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            cursor: cursor.unwrap_or_default(),
        }
    }
}

/// One page of results with cursors to its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeekPage<T> {
    pub data: Vec<T>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl<T> SeekPage<T> {
    /// Cut one page out of an already ordered result set.
    pub fn paginate(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len();
        let offset = request.cursor.offset();
        let limit = request.limit;

        let data: Vec<T> = items.into_iter().skip(offset).take(limit).collect();

        let next = (offset.saturating_add(limit) < total)
            .then(|| Cursor(offset + limit).to_string());
        let previous = (offset > 0).then(|| Cursor(offset.saturating_sub(limit)).to_string());

        Self { data, next, previous }
    }
}
