//! Column descriptors and cell values

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

/// Dynamic row shape for schema-driven tables
pub type Record = serde_json::Map<String, Value>;

/// Extracts a cell from a row. `None` renders as an empty cell.
pub type Accessor<R> = Box<dyn Fn(&R) -> Option<CellValue> + Send + Sync>;

/// Value produced by a column accessor
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// Display text with the raw number it was formatted from
    Formatted { text: String, value: f64 },
    Missing,
}

impl CellValue {
    pub fn formatted(text: impl Into<String>, value: f64) -> Self {
        Self::Formatted {
            text: text.into(),
            value,
        }
    }

    /// Text shown in the cell and matched by search
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) if n.is_finite() => n.to_string(),
            Self::Number(_) => String::new(),
            Self::Formatted { text, .. } => text.clone(),
            Self::Missing => String::new(),
        }
    }

    /// Numeric interpretation used by numeric columns
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Formatted { value, .. } => Some(*value),
            Self::Text(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
            Self::Missing => None,
        }
        .filter(|n: &f64| n.is_finite())
    }

    /// Missing, or a number with no finite value
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Number(n) => !n.is_finite(),
            _ => false,
        }
    }

    /// Compare two values under a column's comparison type.
    /// Missing or unparseable values order first.
    pub fn compare(&self, other: &Self, kind: ColumnKind) -> Ordering {
        match kind {
            ColumnKind::Numeric => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            ColumnKind::Text => match (self.is_missing(), other.is_missing()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => self.display().cmp(&other.display()),
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Missing)
    }
}

impl From<&Value> for CellValue {
    fn from(v: &Value) -> Self {
        match v {
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => n.as_f64().map(Self::Number).unwrap_or(Self::Missing),
            Value::Bool(b) => Self::Text(b.to_string()),
            Value::Null => Self::Missing,
            other => Self::Text(other.to_string()),
        }
    }
}

/// How a column's values are compared when sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    #[default]
    Text,
    Numeric,
}

/// Layout hint; equal-width sizing ignores it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthHint {
    #[default]
    Auto,
    Fixed(u16),
    Flex(u16),
}

/// Describes how to label, extract and sort one column
pub struct Column<R> {
    key: String,
    header: String,
    accessor: Accessor<R>,
    sortable: bool,
    kind: ColumnKind,
    width: WidthHint,
}

impl<R> Column<R> {
    pub fn new<F>(key: &str, header: &str, accessor: F) -> Self
    where
        F: Fn(&R) -> Option<CellValue> + Send + Sync + 'static,
    {
        Self {
            key: key.to_string(),
            header: header.to_string(),
            accessor: Box::new(accessor),
            sortable: false,
            kind: ColumnKind::Text,
            width: WidthHint::Auto,
        }
    }

    /// Column whose accessor always yields a value
    pub fn value<F, T>(key: &str, header: &str, accessor: F) -> Self
    where
        F: Fn(&R) -> T + Send + Sync + 'static,
        T: Into<CellValue>,
    {
        Self::new(key, header, move |row| Some(accessor(row).into()))
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn numeric(mut self) -> Self {
        self.kind = ColumnKind::Numeric;
        self
    }

    pub fn width(mut self, hint: WidthHint) -> Self {
        self.width = hint;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn width_hint(&self) -> WidthHint {
        self.width
    }

    pub fn extract(&self, row: &R) -> CellValue {
        (self.accessor)(row).unwrap_or(CellValue::Missing)
    }

    pub fn cell_text(&self, row: &R) -> String {
        self.extract(row).display()
    }
}

impl Column<Record> {
    /// Column reading `key` straight out of a record
    pub fn field(key: &str, header: &str) -> Self {
        let field = key.to_string();
        Self::new(key, header, move |row: &Record| {
            row.get(&field).map(CellValue::from).filter(|v| !v.is_missing())
        })
    }

    /// Numeric record column rendered through `format`; absent values show `fallback`
    pub fn stat<F>(key: &str, header: &str, format: F, fallback: Option<&str>) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        let field = key.to_string();
        let fallback = fallback.map(str::to_string);
        Self::new(key, header, move |row: &Record| {
            match row.get(&field).and_then(Value::as_f64) {
                Some(v) => Some(CellValue::formatted(format(v), v)),
                None => fallback.clone().map(CellValue::Text),
            }
        })
        .numeric()
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("kind", &self.kind)
            .field("width", &self.width)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_displays_as_empty() {
        assert_eq!(CellValue::Missing.display(), "");
        assert_eq!(CellValue::from(None::<f64>).display(), "");
    }

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(CellValue::from(2024_i64).display(), "2024");
        assert_eq!(CellValue::from(0.5).display(), "0.5");
    }

    #[test]
    fn non_finite_numbers_behave_as_missing() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let cell = CellValue::Number(n);
            assert_eq!(cell.display(), "");
            assert_eq!(cell.as_number(), None);
            assert_eq!(
                cell.compare(&CellValue::Missing, ColumnKind::Numeric),
                Ordering::Equal
            );
            assert!(cell.is_missing());
            assert_eq!(
                cell.compare(&CellValue::from("guard"), ColumnKind::Text),
                Ordering::Less
            );
        }
    }

    #[test]
    fn numeric_compare_uses_raw_value() {
        let a = CellValue::formatted("9.0%", 9.0);
        let b = CellValue::formatted("10.0%", 10.0);
        assert_eq!(a.compare(&b, ColumnKind::Numeric), Ordering::Less);
        // Lexical order would put "10.0%" first
        assert_eq!(a.compare(&b, ColumnKind::Text), Ordering::Greater);
    }

    #[test]
    fn numeric_compare_parses_percent_text() {
        let a = CellValue::from("45.5%");
        let b = CellValue::from(50.0);
        assert_eq!(a.compare(&b, ColumnKind::Numeric), Ordering::Less);
    }

    #[test]
    fn mixed_types_do_not_panic_and_missing_orders_first() {
        let text = CellValue::from("guard");
        let num = CellValue::from(3.0);
        assert_eq!(text.compare(&num, ColumnKind::Numeric), Ordering::Less);
        assert_eq!(
            CellValue::Missing.compare(&text, ColumnKind::Text),
            Ordering::Less
        );
    }

    #[test]
    fn text_compare_is_case_sensitive() {
        let upper = CellValue::from("Zed");
        let lower = CellValue::from("alpha");
        assert_eq!(upper.compare(&lower, ColumnKind::Text), Ordering::Less);
    }

    #[test]
    fn record_field_reads_values() {
        let record: Record = json!({"player": "Benchmark", "ftr": 0.31})
            .as_object()
            .cloned()
            .unwrap_or_default();
        let name = Column::field("player", "Player");
        let ftr = Column::field("ftr", "FTR");
        let missing = Column::field("porpag", "PORPAG");
        assert_eq!(name.cell_text(&record), "Benchmark");
        assert_eq!(ftr.extract(&record), CellValue::Number(0.31));
        assert_eq!(missing.extract(&record), CellValue::Missing);
    }

    #[test]
    fn stat_column_formats_and_falls_back() {
        let record: Record = json!({"ts_percent": 55.26})
            .as_object()
            .cloned()
            .unwrap_or_default();
        let ts = Column::stat("ts_percent", "TS %", |v| format!("{:.1}%", v), None);
        let stl = Column::stat("stl_percent", "STL %", |v| format!("{:.1}%", v), Some("N/A"));
        assert_eq!(ts.cell_text(&record), "55.3%");
        assert_eq!(ts.kind(), ColumnKind::Numeric);
        assert_eq!(stl.cell_text(&record), "N/A");
    }
}
