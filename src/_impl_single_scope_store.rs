use crate::_impl_name_map::{rename_names, same_name, scope_name};
use crate::distribution::Distribution;
use crate::{NameMap, ScopedValue, SingleScopeStore};

/// **(internal)** A missing or blank type name addresses the global slot. Other names are
/// trimmed, the same way the XML reader trims them.
fn typed_name(name: Option<&str>) -> Option<&str> {
    name.and_then(scope_name)
}

impl<D> Default for SingleScopeStore<D> {
    fn default() -> Self {
        SingleScopeStore::new()
    }
}

/// Methods for reading and modifying individual entries.
impl<D> SingleScopeStore<D> {
    /// Create a new empty store (no global value and no typed entries).
    pub fn new() -> SingleScopeStore<D> {
        SingleScopeStore {
            entries: NameMap::new(),
            global: None,
        }
    }

    /// Create a new store with the given global value.
    pub fn with_global(value: ScopedValue<D>) -> SingleScopeStore<D> {
        SingleScopeStore {
            entries: NameMap::new(),
            global: Some(value),
        }
    }

    /// Get the value stored for the given type, or the global value for `None` (or a blank
    /// name).
    ///
    /// There is no automatic fallback: a type without its own entry yields `None`, even if
    /// the global value is set. See `get_or_global`.
    pub fn get(&self, name: Option<&str>) -> Option<&ScopedValue<D>> {
        match typed_name(name) {
            None => self.global.as_ref(),
            Some(name) => self.entries.get(name),
        }
    }

    /// Get the value stored for the given type, falling back to the global value when the
    /// type has no entry of its own.
    pub fn get_or_global(&self, name: Option<&str>) -> Option<&ScopedValue<D>> {
        self.get(name).or(self.global.as_ref())
    }

    /// Replace (or create) the entry for the given scope. Returns the previous value.
    ///
    /// The type name is stored without surrounding whitespace.
    pub fn set(&mut self, name: Option<&str>, value: ScopedValue<D>) -> Option<ScopedValue<D>> {
        match typed_name(name) {
            None => self.global.replace(value),
            Some(name) => self.entries.insert(name, value),
        }
    }

    pub fn set_distribution(&mut self, name: Option<&str>, distribution: D) {
        self.set(name, ScopedValue::Distribution(distribution));
    }

    pub fn set_expression(&mut self, name: Option<&str>, expression: &str) {
        self.set(name, ScopedValue::expression(expression));
    }

    /// Clear the entry for the given scope and return its value. Removing the global value
    /// is allowed and leaves the store without a fallback.
    pub fn remove(&mut self, name: Option<&str>) -> Option<ScopedValue<D>> {
        match typed_name(name) {
            None => self.global.take(),
            Some(name) => self.entries.remove(name),
        }
    }

    /// Remove the global value and all typed entries.
    pub fn clear(&mut self) {
        self.global = None;
        self.entries.clear();
    }
}

/// Methods for inspecting the store as a whole.
impl<D> SingleScopeStore<D> {
    /// True if the global value is set or there is at least one typed entry.
    pub fn is_active(&self) -> bool {
        self.global.is_some() || !self.entries.is_empty()
    }

    /// Same as `is_active`. Used when deciding whether the store needs to be written at all.
    pub fn has_data(&self) -> bool {
        self.is_active()
    }

    /// True if there is at least one typed entry (the global value is not considered).
    pub fn has_typed_data(&self) -> bool {
        !self.entries.is_empty()
    }

    /// The number of typed entries (the global value is not counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get_global(&self) -> Option<&ScopedValue<D>> {
        self.global.as_ref()
    }

    /// Names of all types with an entry, in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().map(|it| it.to_string()).collect()
    }

    /// Iterate over all typed entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScopedValue<D>)> {
        self.entries.iter()
    }

    /// True if the given type name (case-insensitive) has an entry.
    pub fn name_in_use(&self, name: &str) -> bool {
        scope_name(name)
            .map(|name| self.entries.contains_key(name))
            .unwrap_or(false)
    }

    /// Move the entry of `old` to `new`, preserving its value.
    ///
    /// An existing entry of `new` is overwritten. Renaming a type without an entry does
    /// nothing, and so does renaming to (or from) a blank name, since a blank name stands
    /// for the global slot. See also `rename_sub_type_guarded`.
    pub fn rename_sub_type(&mut self, old: &str, new: &str) {
        if let Some((old, new)) = rename_names(old, new) {
            self.entries.rename_key(old, new);
        }
    }

    /// Same as `rename_sub_type`, but leaves the store untouched if `new` already has an
    /// entry (unless `new` only differs from `old` in letter case).
    ///
    /// Returns `true` if the rename was performed (or there was nothing to rename), and
    /// `false` on a collision or a blank name.
    pub fn rename_sub_type_guarded(&mut self, old: &str, new: &str) -> bool {
        let Some((old, new)) = rename_names(old, new) else {
            return false;
        };
        if self.name_in_use(new) && !same_name(old, new) {
            return false;
        }
        self.entries.rename_key(old, new);
        true
    }
}

impl<D: Distribution> SingleScopeStore<D> {
    /// Build human-readable `(scope label, value)` lines describing this store.
    ///
    /// One line is produced for each of the given type names that has an entry (using the
    /// given spelling), followed by a line for the global value labelled `None`.
    pub fn describe<S: AsRef<str>>(&self, type_names: &[S]) -> Vec<(Option<String>, String)> {
        let mut result = Vec::new();
        for name in type_names {
            let value = scope_name(name.as_ref()).and_then(|it| self.entries.get(it));
            if let Some(value) = value {
                result.push((Some(name.as_ref().to_string()), value.to_string()));
            }
        }
        if let Some(value) = &self.global {
            result.push((None, value.to_string()));
        }
        result
    }
}
