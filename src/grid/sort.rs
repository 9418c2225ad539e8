//! Column sorting

use super::column::{CellValue, Column};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(key: &str) -> Self {
        Self {
            key: key.to_string(),
            direction: SortDirection::Ascending,
        }
    }
}

/// Apply a header activation to the current sort.
/// Returns `None` when the header is not sortable (no change).
pub fn next_sort<R>(current: Option<&SortState>, columns: &[Column<R>], key: &str) -> Option<SortState> {
    let column = columns.iter().find(|c| c.key() == key)?;
    if !column.is_sortable() {
        return None;
    }

    Some(match current {
        Some(state) if state.key == key => SortState {
            key: state.key.clone(),
            direction: state.direction.toggled(),
        },
        _ => SortState::ascending(key),
    })
}

/// Stable in-place sort of row indices by the given column.
/// An unknown key leaves the order untouched.
pub fn sort_indices<R>(indices: &mut Vec<usize>, rows: &[R], columns: &[Column<R>], sort: &SortState) {
    let Some(column) = columns.iter().find(|c| c.key() == sort.key) else {
        return;
    };
    let kind = column.kind();

    // Extract once; accessors may format
    let mut keyed: Vec<(usize, CellValue)> = indices
        .iter()
        .map(|&i| (i, column.extract(&rows[i])))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| {
        let cmp = a.compare(b, kind);
        match sort.direction {
            SortDirection::Ascending => cmp,
            SortDirection::Descending => cmp.reverse(),
        }
    });

    *indices = keyed.into_iter().map(|(i, _)| i).collect();
}
