use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Field – the closed set of columns an Entry carries
// ---------------------------------------------------------------------------

/// The three fields of an [`Entry`]. A closed enum instead of string keys:
/// a misspelled field name is a compile error rather than a runtime lookup
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Region,
    Salary,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Year => write!(f, "year"),
            Field::Region => write!(f, "region"),
            Field::Salary => write!(f, "salary"),
        }
    }
}

// ---------------------------------------------------------------------------
// Value – a dynamically-typed field value
// ---------------------------------------------------------------------------

/// A single field value. Year and salary project to `Int`, region to `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Text(String),
}

// -- Manual Ord so Value can key BTreeSet/BTreeMap and drive range filters --

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        fn discriminant(v: &Value) -> u8 {
            match v {
                Value::Int(_) => 0,
                Value::Text(_) => 1,
            }
        }
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Value {
    /// Interpret the value as an `i64` for statistics.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Text(_) => None,
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

// ---------------------------------------------------------------------------
// Entry – one observation (one data cell of the source sheet)
// ---------------------------------------------------------------------------

/// One salary observation. Immutable; no identity beyond value equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub year: i32,
    pub region: String,
    pub salary: i64,
}

impl Entry {
    pub fn new(year: i32, region: impl Into<String>, salary: i64) -> Self {
        Entry {
            year,
            region: region.into(),
            salary,
        }
    }

    /// Project the named field as a [`Value`].
    pub fn get(&self, field: Field) -> Value {
        match field {
            Field::Year => Value::Int(i64::from(self.year)),
            Field::Region => Value::Text(self.region.clone()),
            Field::Salary => Value::Int(self.salary),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordStore – an ordered, immutable collection of entries
// ---------------------------------------------------------------------------

/// An ordered sequence of [`Entry`] values. Built once from a parsed sheet;
/// every query operation derives a **new** store, preserving the relative
/// order of surviving entries, so intermediate results can be chained and
/// reused freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    entries: Vec<Entry>,
}

impl RecordStore {
    pub fn new(entries: Vec<Entry>) -> Self {
        RecordStore { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries in store order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Sorted unique region names, for selection widgets.
    pub fn regions(&self) -> BTreeSet<String> {
        self.entries.iter().map(|e| e.region.clone()).collect()
    }

    /// Smallest and largest year present, if any.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.entries.iter().map(|e| e.year).min()?;
        let max = self.entries.iter().map(|e| e.year).max()?;
        Some((min, max))
    }
}

impl FromIterator<Entry> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        RecordStore {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_ordering_is_total() {
        assert!(Value::Int(1) < Value::Int(2));
        assert!(Value::Text("a".into()) < Value::Text("b".into()));
        // Ints sort before text so mixed sets are still totally ordered.
        assert!(Value::Int(999) < Value::Text("0".into()));
    }

    #[test]
    fn entry_projects_fields() {
        let e = Entry::new(2011, "A", 100);
        assert_eq!(e.get(Field::Year), Value::Int(2011));
        assert_eq!(e.get(Field::Region), Value::Text("A".into()));
        assert_eq!(e.get(Field::Salary), Value::Int(100));
    }

    #[test]
    fn regions_and_year_bounds() {
        let store = RecordStore::new(vec![
            Entry::new(2012, "B", 1),
            Entry::new(2010, "A", 2),
            Entry::new(2011, "B", 3),
        ]);
        assert_eq!(
            store.regions().into_iter().collect::<Vec<_>>(),
            vec!["A".to_string(), "B".to_string()]
        );
        assert_eq!(store.year_bounds(), Some((2010, 2012)));
        assert_eq!(RecordStore::default().year_bounds(), None);
    }
}
