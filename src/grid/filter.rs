//! Row search

use super::column::Column;

/// Which columns a search query is matched against
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    All,
    Column(String),
}

impl SearchScope {
    pub fn label<'a, R>(&'a self, columns: &'a [Column<R>]) -> &'a str {
        match self {
            Self::All => "All",
            Self::Column(key) => columns
                .iter()
                .find(|c| c.key() == key)
                .map(|c| c.header())
                .unwrap_or(key.as_str()),
        }
    }

    /// Next scope in the cycle All -> first column -> ... -> last column -> All
    pub fn next<R>(&self, columns: &[Column<R>]) -> Self {
        let position = match self {
            Self::All => None,
            Self::Column(key) => columns.iter().position(|c| c.key() == key),
        };
        let next = match position {
            None => 0,
            Some(i) => i + 1,
        };
        columns
            .get(next)
            .map(|c| Self::Column(c.key().to_string()))
            .unwrap_or(Self::All)
    }
}

/// Indices of `rows` that match `query` within `scope`, in source order.
/// A blank query matches every row.
pub fn filter_rows<R>(rows: &[R], columns: &[Column<R>], query: &str, scope: &SearchScope) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (0..rows.len()).collect();
    }

    let scoped: Vec<&Column<R>> = match scope {
        SearchScope::All => columns.iter().collect(),
        SearchScope::Column(key) => columns.iter().filter(|c| c.key() == key).collect(),
    };

    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            scoped
                .iter()
                .any(|c| c.cell_text(row).to_lowercase().contains(&needle))
        })
        .map(|(i, _)| i)
        .collect()
}
