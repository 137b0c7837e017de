use crate::NameMap;
use fxhash::FxHashMap;

/// **(internal)** The case-insensitive projection of a key that is used for lookups.
pub(crate) fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// **(internal)** Case-insensitive comparison of two names.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a == b || fold_name(a) == fold_name(b)
}

/// **(internal)** The stored form of a type name: surrounding whitespace is removed and a
/// blank name is `None`.
pub(crate) fn scope_name(name: &str) -> Option<&str> {
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// **(internal)** Normalize both sides of a rename. A blank side makes the rename invalid.
pub(crate) fn rename_names<'a>(old: &'a str, new: &'a str) -> Option<(&'a str, &'a str)> {
    match (scope_name(old), scope_name(new)) {
        (Some(old), Some(new)) => Some((old, new)),
        _ => {
            tracing::debug!(old, new, "Rename ignored: blank type name.");
            None
        }
    }
}

impl<V> Default for NameMap<V> {
    fn default() -> Self {
        NameMap::new()
    }
}

impl<V> NameMap<V> {
    /// Create a new empty `NameMap`.
    pub fn new() -> NameMap<V> {
        NameMap {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(&fold_name(name))
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.index
            .get(&fold_name(name))
            .map(|i| &self.entries[*i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        match self.index.get(&fold_name(name)) {
            Some(i) => Some(&mut self.entries[*i].1),
            None => None,
        }
    }

    /// Insert a value, returning the previous value of an equivalent key.
    ///
    /// If an equivalent key already exists, its spelling and position are preserved.
    pub fn insert(&mut self, name: &str, value: V) -> Option<V> {
        let folded = fold_name(name);
        if let Some(i) = self.index.get(&folded) {
            Some(std::mem::replace(&mut self.entries[*i].1, value))
        } else {
            self.index.insert(folded, self.entries.len());
            self.entries.push((name.to_string(), value));
            None
        }
    }

    /// Return the value for the given key, inserting the result of `make` if absent.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, name: &str, make: F) -> &mut V {
        let folded = fold_name(name);
        let i = match self.index.get(&folded) {
            Some(i) => *i,
            None => {
                self.entries.push((name.to_string(), make()));
                self.index.insert(folded, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    /// Remove the entry of an equivalent key, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        let i = self.index.remove(&fold_name(name))?;
        let (_, value) = self.entries.remove(i);
        // Positions after the removed entry moved by one.
        for position in self.index.values_mut() {
            if *position > i {
                *position -= 1;
            }
        }
        Some(value)
    }

    /// Change the key of an existing entry from `old` to `new`, keeping its value and
    /// position. An existing entry under `new` is dropped.
    ///
    /// Returns `false` (and does nothing) when there is no entry for `old`.
    pub fn rename_key(&mut self, old: &str, new: &str) -> bool {
        if !self.contains_key(old) {
            return false;
        }
        if !same_name(old, new) {
            self.remove(new);
        }
        // The index may have shifted after the removal above.
        if let Some(i) = self.index.remove(&fold_name(old)) {
            self.entries[i].0 = new.to_string();
            self.index.insert(fold_name(new), i);
        }
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over `(key, value)` pairs in insertion order, with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut V)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use crate::_impl_name_map::{rename_names, scope_name};
    use crate::NameMap;

    #[test]
    fn test_case_insensitive_keys() {
        let mut map = NameMap::new();
        assert_eq!(None, map.insert("Gold", 1));
        assert_eq!(Some(1), map.insert("GOLD", 2));
        assert_eq!(1, map.len());
        assert_eq!(Some(&2), map.get("gold"));
        assert_eq!(vec!["Gold"], map.keys().collect::<Vec<_>>());
        assert!(map.contains_key("gold"));
        assert!(!map.contains_key("silver"));
    }

    #[test]
    fn test_insertion_order_and_removal() {
        let mut map = NameMap::new();
        map.insert("c", 3);
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(vec!["c", "a", "b"], map.keys().collect::<Vec<_>>());
        assert_eq!(Some(3), map.remove("C"));
        assert_eq!(None, map.remove("C"));
        assert_eq!(vec!["a", "b"], map.keys().collect::<Vec<_>>());
        // Index must stay consistent after the removal shifted positions.
        assert_eq!(Some(&2), map.get("B"));
        assert_eq!(Some(&1), map.get("A"));
    }

    #[test]
    fn test_rename_key() {
        let mut map = NameMap::new();
        map.insert("x", 1);
        map.insert("y", 2);
        map.insert("z", 3);
        assert!(!map.rename_key("w", "v"));
        assert!(map.rename_key("x", "Y"));
        assert_eq!(vec![("Y", &1), ("z", &3)], map.iter().collect::<Vec<_>>());
        assert!(map.rename_key("y", "y"));
        assert_eq!(vec!["y", "z"], map.keys().collect::<Vec<_>>());
        assert_eq!(Some(&3), map.get("z"));
    }

    #[test]
    fn test_get_or_insert_and_clear() {
        let mut map = NameMap::new();
        *map.get_or_insert_with("a", || 0) += 1;
        *map.get_or_insert_with("A", || 0) += 1;
        map.insert("c", 20);
        assert_eq!(vec![("a", &2), ("c", &20)], map.iter().collect::<Vec<_>>());
        assert_eq!(Some(&20), map.get("c"));
        map.clear();
        assert!(map.is_empty());
        assert_eq!(None, map.get("a"));
    }

    #[test]
    fn test_scope_names() {
        assert_eq!(Some("Gold"), scope_name("  Gold\t"));
        assert_eq!(None, scope_name(" \n "));
        assert_eq!(Some(("A", "B")), rename_names(" A", "B "));
        assert_eq!(None, rename_names("A", ""));
        assert_eq!(None, rename_names("  ", "B"));
    }
}
