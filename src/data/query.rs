use super::model::{Entry, Field, RecordStore, Value};

// ---------------------------------------------------------------------------
// Filtering combinators
// ---------------------------------------------------------------------------

/// Every filter derives a fresh store and takes a `negate` flag that keeps
/// the entries which do NOT match, through the same code path as the positive
/// form. Filtering an empty store yields an empty store.
impl RecordStore {
    fn retain(&self, negate: bool, pred: impl Fn(&Entry) -> bool) -> RecordStore {
        self.entries()
            .iter()
            .filter(|e| pred(e) != negate)
            .cloned()
            .collect()
    }

    /// Keep entries whose `field` equals `value` exactly.
    pub fn equals(&self, field: Field, value: impl Into<Value>, negate: bool) -> RecordStore {
        let value = value.into();
        self.retain(negate, |e| e.get(field) == value)
    }

    /// Keep entries whose `field` is a member of `values`.
    pub fn one_of(&self, field: Field, values: &[Value], negate: bool) -> RecordStore {
        self.retain(negate, |e| values.contains(&e.get(field)))
    }

    /// Keep entries with `lo ≤ field ≤ hi`, inclusive on both ends.
    pub fn in_range(
        &self,
        field: Field,
        lo: impl Into<Value>,
        hi: impl Into<Value>,
        negate: bool,
    ) -> RecordStore {
        let (lo, hi) = (lo.into(), hi.into());
        self.retain(negate, |e| {
            let v = e.get(field);
            lo <= v && v <= hi
        })
    }

    /// Keep entries with `field ≤ value`.
    pub fn at_most(&self, field: Field, value: impl Into<Value>, negate: bool) -> RecordStore {
        let value = value.into();
        self.retain(negate, |e| e.get(field) <= value)
    }

    /// Keep entries with `value ≤ field`.
    pub fn at_least(&self, field: Field, value: impl Into<Value>, negate: bool) -> RecordStore {
        let value = value.into();
        self.retain(negate, |e| value <= e.get(field))
    }

    // -----------------------------------------------------------------------
    // Combination
    // -----------------------------------------------------------------------

    /// Concatenate the given stores in argument order, without deduplication.
    /// Combines disjoint filter branches that a single chain cannot express.
    /// No stores yields an empty store.
    pub fn union(stores: &[RecordStore]) -> RecordStore {
        stores
            .iter()
            .flat_map(|s| s.entries().iter().cloned())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Extraction
    // -----------------------------------------------------------------------

    /// The named field's values across all entries, in store order. This is
    /// the bridge to presentation: charts consume these sequences directly.
    pub fn pluck(&self, field: Field) -> Vec<Value> {
        self.entries().iter().map(|e| e.get(field)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordStore {
        RecordStore::new(vec![
            Entry::new(2011, "A", 100),
            Entry::new(2012, "A", 120),
            Entry::new(2011, "B", 200),
        ])
    }

    #[test]
    fn pluck_covers_every_entry() {
        let store = sample();
        for field in [Field::Year, Field::Region, Field::Salary] {
            assert_eq!(store.pluck(field).len(), store.len());
        }
    }

    #[test]
    fn equals_filters_and_plucks_scenario() {
        let store = sample();
        let salaries = store.equals(Field::Region, "A", false).pluck(Field::Salary);
        assert_eq!(salaries, vec![Value::Int(100), Value::Int(120)]);

        let in_2011 = store
            .in_range(Field::Year, 2011, 2011, false)
            .pluck(Field::Salary);
        assert_eq!(in_2011, vec![Value::Int(100), Value::Int(200)]);
    }

    #[test]
    fn negate_yields_the_complement_partition() {
        let store = sample();
        let hit = store.equals(Field::Region, "A", false);
        let miss = store.equals(Field::Region, "A", true);

        assert_eq!(hit.len() + miss.len(), store.len());
        for e in hit.entries() {
            assert!(!miss.entries().contains(e));
        }
        // Union of the two partitions restores the original multiset.
        let mut merged = RecordStore::union(&[hit, miss]).entries().to_vec();
        let mut original = store.entries().to_vec();
        merged.sort_by_key(|e| (e.year, e.region.clone(), e.salary));
        original.sort_by_key(|e| (e.year, e.region.clone(), e.salary));
        assert_eq!(merged, original);
    }

    #[test]
    fn filters_are_idempotent() {
        let store = sample();
        let once = store.equals(Field::Region, "A", false);
        let twice = once.equals(Field::Region, "A", false);
        assert_eq!(once, twice);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let store = sample();
        assert_eq!(store.in_range(Field::Year, 2011, 2012, false).len(), 3);
        assert_eq!(store.at_most(Field::Salary, 120, false).len(), 2);
        assert_eq!(store.at_least(Field::Salary, 120, false).len(), 2);
        assert_eq!(store.at_least(Field::Salary, 120, true).len(), 1);
    }

    #[test]
    fn one_of_matches_membership() {
        let store = sample();
        let years = [Value::Int(2011)];
        assert_eq!(store.one_of(Field::Year, &years, false).len(), 2);
        assert_eq!(store.one_of(Field::Year, &years, true).len(), 1);
    }

    #[test]
    fn union_preserves_order_without_dedup() {
        let a = RecordStore::new(vec![Entry::new(2011, "A", 100)]);
        let b = RecordStore::new(vec![
            Entry::new(2011, "A", 100),
            Entry::new(2012, "B", 200),
        ]);
        let merged = RecordStore::union(&[a.clone(), b.clone()]);
        let expected: Vec<Entry> = a
            .entries()
            .iter()
            .chain(b.entries())
            .cloned()
            .collect();
        assert_eq!(merged.entries(), expected.as_slice());

        assert!(RecordStore::union(&[]).is_empty());
    }

    #[test]
    fn filtering_an_empty_store_is_empty() {
        let empty = RecordStore::default();
        assert!(empty.equals(Field::Region, "A", false).is_empty());
        assert!(empty.in_range(Field::Year, 2000, 2020, true).is_empty());
    }

    #[test]
    fn mismatched_value_type_never_matches_equals() {
        let store = sample();
        assert!(store.equals(Field::Region, 2011, false).is_empty());
        assert_eq!(store.equals(Field::Region, 2011, true).len(), store.len());
    }
}
