use crate::_impl_name_map::{rename_names, same_name, scope_name};
use crate::{NameMap, PairScopeStore, ScopedValue};

impl<D> Default for PairScopeStore<D> {
    fn default() -> Self {
        PairScopeStore::new()
    }
}

/// Methods for reading and modifying individual `(from, to)` entries.
impl<D> PairScopeStore<D> {
    /// Create a new empty store.
    pub fn new() -> PairScopeStore<D> {
        PairScopeStore {
            buckets: NameMap::new(),
        }
    }

    /// The value of the ordered pair `(from, to)`, if set. `(A, B)` and `(B, A)` are
    /// different pairs.
    pub fn get(&self, from: &str, to: &str) -> Option<&ScopedValue<D>> {
        let (from, to) = (scope_name(from)?, scope_name(to)?);
        self.buckets.get(from).and_then(|bucket| bucket.get(to))
    }

    /// Replace (or create) the value of `(from, to)`. Returns the previous value.
    ///
    /// Both names are stored without surrounding whitespace. A pair with a blank name
    /// cannot be persisted, so such a value is not stored at all and `None` is returned.
    pub fn set(&mut self, from: &str, to: &str, value: ScopedValue<D>) -> Option<ScopedValue<D>> {
        let (Some(from), Some(to)) = (scope_name(from), scope_name(to)) else {
            tracing::debug!(from, to, "Value ignored: blank type name in pair.");
            return None;
        };
        self.buckets
            .get_or_insert_with(from, NameMap::new)
            .insert(to, value)
    }

    pub fn set_distribution(&mut self, from: &str, to: &str, distribution: D) {
        self.set(from, to, ScopedValue::Distribution(distribution));
    }

    pub fn set_expression(&mut self, from: &str, to: &str, expression: &str) {
        self.set(from, to, ScopedValue::expression(expression));
    }

    /// Erase the value of `(from, to)` and return it. If this was the last entry of
    /// `from`, the whole bucket is removed.
    pub fn remove(&mut self, from: &str, to: &str) -> Option<ScopedValue<D>> {
        let (from, to) = (scope_name(from)?, scope_name(to)?);
        let bucket = self.buckets.get_mut(from)?;
        let removed = bucket.remove(to);
        if bucket.is_empty() {
            self.buckets.remove(from);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

/// Methods for inspecting the store as a whole.
impl<D> PairScopeStore<D> {
    /// True if at least one pair has a value.
    pub fn is_active(&self) -> bool {
        self.buckets.values().any(|bucket| !bucket.is_empty())
    }

    /// Same as `is_active`.
    pub fn has_data(&self) -> bool {
        self.is_active()
    }

    /// The number of pairs with a value.
    pub fn len(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.len()).sum()
    }

    /// Iterate over all `(from, to, value)` entries, grouped by `from`, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &ScopedValue<D>)> {
        self.buckets
            .iter()
            .flat_map(|(from, bucket)| bucket.iter().map(move |(to, value)| (from, to, value)))
    }

    /// All distinct type names used as `from` or `to`, in the order in which they were
    /// first seen. Names that only differ in letter case are reported once.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !names.iter().any(|it| same_name(it, name)) {
                names.push(name.to_string());
            }
        };
        for (from, bucket) in self.buckets.iter() {
            push(from);
            for to in bucket.keys() {
                push(to);
            }
        }
        names
    }

    /// True if the given name (case-insensitive) is used as `from` or `to` of any pair.
    pub fn name_in_use(&self, name: &str) -> bool {
        let Some(name) = scope_name(name) else {
            return false;
        };
        self.buckets.contains_key(name)
            || self.buckets.values().any(|bucket| bucket.contains_key(name))
    }

    /// Replace `old` with `new` in every pair where it appears, either as `from` or as
    /// `to`, keeping the attached values.
    ///
    /// Colliding entries of `new` are overwritten. Use `name_in_use` first (or
    /// `rename_sub_type_guarded`) to avoid that. A rename to (or from) a blank name does
    /// nothing.
    pub fn rename_sub_type(&mut self, old: &str, new: &str) {
        let Some((old, new)) = rename_names(old, new) else {
            return;
        };
        self.buckets.rename_key(old, new);
        for (_, bucket) in self.buckets.iter_mut() {
            bucket.rename_key(old, new);
        }
    }

    /// Same as `rename_sub_type`, but does nothing if `new` is already in use (unless it
    /// only differs from `old` in letter case). Returns `true` if the rename was performed,
    /// `false` on a collision or a blank name.
    pub fn rename_sub_type_guarded(&mut self, old: &str, new: &str) -> bool {
        let Some((old, new)) = rename_names(old, new) else {
            return false;
        };
        if self.name_in_use(new) && !same_name(old, new) {
            return false;
        }
        self.rename_sub_type(old, new);
        true
    }
}

/// Dense projections for consumers which prefer index-based lookup.
impl<D> PairScopeStore<D> {
    /// Build an `N x N` matrix for the given ordered list of type names, where cell `[i][j]`
    /// is the distribution of `(names[i], names[j])`.
    ///
    /// Cells of absent pairs and of pairs with an expression are `None`.
    pub fn distribution_matrix<S: AsRef<str>>(&self, names: &[S]) -> Vec<Vec<Option<&D>>> {
        self.matrix(names, |value| value.as_distribution())
    }

    /// Same as `distribution_matrix`, but projects expressions instead.
    pub fn expression_matrix<S: AsRef<str>>(&self, names: &[S]) -> Vec<Vec<Option<&str>>> {
        self.matrix(names, |value| value.as_expression())
    }

    /// **(internal)** Shared implementation of the matrix projections.
    fn matrix<'a, S: AsRef<str>, T, F>(&'a self, names: &[S], project: F) -> Vec<Vec<Option<T>>>
    where
        F: Fn(&'a ScopedValue<D>) -> Option<T>,
    {
        names
            .iter()
            .map(|from| {
                let bucket = scope_name(from.as_ref()).and_then(|it| self.buckets.get(it));
                names
                    .iter()
                    .map(|to| {
                        bucket
                            .zip(scope_name(to.as_ref()))
                            .and_then(|(bucket, to)| bucket.get(to))
                            .and_then(&project)
                    })
                    .collect()
            })
            .collect()
    }
}
