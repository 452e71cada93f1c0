//! Per-row field index
//!
//! Rows are projected into named text fields once, normalized, and kept next
//! to the row so ranking never re-normalizes row text.

use std::collections::BTreeMap;
use std::fmt;

use super::normalize::normalize;

/// Raw field value as produced by a field extractor
///
/// `Null` stands for a missing value and indexes as empty text.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Number(f64),
    Integer(i64),
    Bool(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// A row paired with its normalized field texts
#[derive(Debug, Clone)]
pub struct IndexedRow<T> {
    /// The caller's row, untouched
    pub row: T,
    /// Field name to normalized text
    pub fields: BTreeMap<String, String>,
}

impl<T> IndexedRow<T> {
    /// Normalized text of a field; missing fields read as empty
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Row types that know their own searchable projection
pub trait Searchable {
    /// Field name and raw value for every attribute that participates in search
    fn search_fields(&self) -> Vec<(&'static str, FieldValue)>;
}

impl<S: Searchable + ?Sized> Searchable for &S {
    fn search_fields(&self) -> Vec<(&'static str, FieldValue)> {
        (**self).search_fields()
    }
}

/// Build an index over `rows` using `get_fields` as the projection
///
/// Output has one entry per input row, in input order. Every call produces an
/// independent snapshot; rebuild when the rows change.
pub fn build_index<T, F, I, K, V>(rows: impl IntoIterator<Item = T>, get_fields: F) -> Vec<IndexedRow<T>>
where
    F: Fn(&T) -> I,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    rows.into_iter()
        .map(|row| {
            let fields = get_fields(&row)
                .into_iter()
                .map(|(key, value)| (key.into(), normalize(&value.into().to_string())))
                .collect();
            IndexedRow { row, fields }
        })
        .collect()
}

/// Build an index using each row's [`Searchable`] projection
pub fn build_index_for<T: Searchable>(rows: impl IntoIterator<Item = T>) -> Vec<IndexedRow<T>> {
    build_index(rows, |row: &T| row.search_fields())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestRow {
        name: String,
        email: Option<String>,
        amount: f64,
    }

    fn rows() -> Vec<TestRow> {
        vec![
            TestRow {
                name: "Café Crème".to_string(),
                email: Some("Hello@Cafe.io".to_string()),
                amount: 120.5,
            },
            TestRow {
                name: "Bravo LLC".to_string(),
                email: None,
                amount: 99.0,
            },
        ]
    }

    fn fields(row: &TestRow) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", FieldValue::from(&row.name)),
            ("email", FieldValue::from(row.email.clone())),
            ("amount", FieldValue::from(row.amount)),
        ]
    }

    #[test]
    fn test_build_index_normalizes_fields() {
        let index = build_index(rows(), fields);
        assert_eq!(index[0].field("name"), "cafe creme");
        assert_eq!(index[0].field("email"), "hello@cafe.io");
        assert_eq!(index[0].field("amount"), "120.5");
    }

    #[test]
    fn test_build_index_coerces_missing_to_empty() {
        let index = build_index(rows(), fields);
        assert_eq!(index[1].field("email"), "");
        assert_eq!(index[1].field("amount"), "99");
        assert_eq!(index[1].field("not_a_field"), "");
    }

    #[test]
    fn test_build_index_preserves_length_and_order() {
        let input = rows();
        let index = build_index(input.clone(), fields);
        assert_eq!(index.len(), input.len());
        for (entry, row) in index.iter().zip(&input) {
            assert_eq!(&entry.row, row);
        }
    }

    #[test]
    fn test_build_index_empty() {
        let index = build_index(Vec::<TestRow>::new(), fields);
        assert!(index.is_empty());
    }

    #[test]
    fn test_build_index_over_borrowed_rows() {
        let input = rows();
        let index = build_index(input.iter(), |row: &&TestRow| vec![("name", row.name.clone())]);
        assert!(std::ptr::eq(index[1].row, &input[1]));
        assert_eq!(index[1].field("name"), "bravo llc");
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Null.to_string(), "");
        assert_eq!(FieldValue::from(None::<String>).to_string(), "");
        assert_eq!(FieldValue::from(Some("x")).to_string(), "x");
        assert_eq!(FieldValue::from(2500_i64).to_string(), "2500");
        assert_eq!(FieldValue::from(true).to_string(), "true");
    }

    struct Named(&'static str);

    impl Searchable for Named {
        fn search_fields(&self) -> Vec<(&'static str, FieldValue)> {
            vec![("name", self.0.into())]
        }
    }

    #[test]
    fn test_build_index_for_searchable() {
        let items = [Named("Acme Corp"), Named("Bravo LLC")];
        let index = build_index_for(items.iter());
        assert_eq!(index.len(), 2);
        assert_eq!(index[0].field("name"), "acme corp");
    }
}
