use crate::{NameMap, PairScopeStore, ScopedValue, SingleScopeStore};

/// **(internal)** Check that every entry of `a` has an equal entry (under a
/// case-insensitively equal key) in `b`, using `eq` to compare the values.
fn is_sub_map<V, F>(a: &NameMap<V>, b: &NameMap<V>, eq: F) -> bool
where
    F: Fn(&V, &V) -> bool,
{
    a.iter().all(|(key, a_value)| match b.get(key) {
        Some(b_value) => eq(a_value, b_value),
        None => false,
    })
}

/// Two single-scope stores are equal when their global values are equal (or both absent)
/// and they contain the same typed entries. Key spelling and insertion order are ignored.
///
/// The entries are checked in both directions, so the relation stays symmetric even if
/// the value comparison is not.
impl<D: PartialEq> PartialEq for SingleScopeStore<D> {
    fn eq(&self, other: &Self) -> bool {
        if self.global != other.global {
            return false;
        }
        let value_eq = |a: &ScopedValue<D>, b: &ScopedValue<D>| a == b;
        is_sub_map(&self.entries, &other.entries, value_eq)
            && is_sub_map(&other.entries, &self.entries, value_eq)
    }
}

/// Two pair stores are equal when they contain the same `(from, to)` pairs with equal
/// values. Key spelling and insertion order are ignored.
impl<D: PartialEq> PartialEq for PairScopeStore<D> {
    fn eq(&self, other: &Self) -> bool {
        let bucket_eq = |a: &NameMap<ScopedValue<D>>, b: &NameMap<ScopedValue<D>>| {
            is_sub_map(a, b, |x, y| x == y)
        };
        // Buckets are never empty, so comparing buckets in both directions also
        // compares the inner maps in both directions.
        is_sub_map(&self.buckets, &other.buckets, bucket_eq)
            && is_sub_map(&other.buckets, &self.buckets, bucket_eq)
    }
}
