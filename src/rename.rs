//! Propagation of type renames into scoped stores.
//!
//! When a client type (or any other named entity) is renamed elsewhere in a model, every
//! store of every model element has to follow. An element typically owns several stores
//! and the rename has to be applied to all of them consistently: under
//! `RenamePolicy::SkipIfInUse`, either all stores are renamed, or none of them is.

use crate::_impl_name_map::{rename_names, same_name};
use crate::{PairScopeStore, SingleScopeStore};

/// What to do when the new name already has entries in one of the stores.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RenamePolicy {
    /// Rename anyway. Entries of the new name are overwritten by entries of the old name.
    Overwrite,
    /// Leave all stores untouched if any store already uses the new name.
    SkipIfInUse,
}

/// A store whose keys reference type names.
pub trait RenameScope {
    /// True if the given type name (case-insensitive) appears in any key.
    fn name_in_use(&self, name: &str) -> bool;

    /// Replace `old` with `new` in every key, keeping the values. Colliding entries are
    /// overwritten and renaming an unused name does nothing.
    fn rename_sub_type(&mut self, old: &str, new: &str);
}

impl<D> RenameScope for SingleScopeStore<D> {
    fn name_in_use(&self, name: &str) -> bool {
        SingleScopeStore::name_in_use(self, name)
    }

    fn rename_sub_type(&mut self, old: &str, new: &str) {
        SingleScopeStore::rename_sub_type(self, old, new)
    }
}

impl<D> RenameScope for PairScopeStore<D> {
    fn name_in_use(&self, name: &str) -> bool {
        PairScopeStore::name_in_use(self, name)
    }

    fn rename_sub_type(&mut self, old: &str, new: &str) {
        PairScopeStore::rename_sub_type(self, old, new)
    }
}

/// Rename `old` to `new` in all given stores.
///
/// With `RenamePolicy::SkipIfInUse`, nothing happens if any of the stores already uses
/// `new` (a rename that only changes letter case is never considered a collision).
/// Names are trimmed, and a rename to (or from) a blank name is never applied.
///
/// Returns `true` if the rename was applied.
pub fn propagate_rename(
    stores: &mut [&mut dyn RenameScope],
    old: &str,
    new: &str,
    policy: RenamePolicy,
) -> bool {
    let Some((old, new)) = rename_names(old, new) else {
        return false;
    };
    if policy == RenamePolicy::SkipIfInUse
        && !same_name(old, new)
        && stores.iter().any(|store| store.name_in_use(new))
    {
        tracing::debug!(old, new, "Rename skipped: new name is already in use.");
        return false;
    }
    for store in stores.iter_mut() {
        store.rename_sub_type(old, new);
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::distribution::ParametricDistribution;
    use crate::rename::{propagate_rename, RenamePolicy, RenameScope};
    use crate::{PairScopeStore, ScopedValue, SingleScopeStore};

    fn stores() -> (SingleScopeStore, SingleScopeStore, PairScopeStore) {
        let mut working: SingleScopeStore = SingleScopeStore::new();
        working.set_distribution(
            Some("Gold"),
            ParametricDistribution::new("Normal", &[1.0, 1.0]).unwrap(),
        );
        let mut cancel: SingleScopeStore = SingleScopeStore::new();
        cancel.set_expression(Some("Silver"), "5");
        let mut setup: PairScopeStore = PairScopeStore::new();
        setup.set_expression("Gold", "Silver", "2");
        (working, cancel, setup)
    }

    #[test]
    fn test_guarded_rename_is_all_or_nothing() {
        let (mut working, mut cancel, mut setup) = stores();
        // `Silver` is used by `cancel` and `setup`, so nothing is renamed.
        let applied = propagate_rename(
            &mut [&mut working, &mut cancel, &mut setup],
            "Gold",
            "Silver",
            RenamePolicy::SkipIfInUse,
        );
        assert!(!applied);
        assert!(working.name_in_use("Gold"));
        assert_eq!(Some(&ScopedValue::expression("2")), setup.get("Gold", "Silver"));

        let applied = propagate_rename(
            &mut [&mut working, &mut cancel, &mut setup],
            "Gold",
            "Platinum",
            RenamePolicy::SkipIfInUse,
        );
        assert!(applied);
        assert!(!working.name_in_use("Gold"));
        assert!(working.get(Some("Platinum")).unwrap().is_distribution());
        assert_eq!(Some(&ScopedValue::expression("2")), setup.get("Platinum", "Silver"));
        assert_eq!(vec!["Silver".to_string()], cancel.names());
    }

    #[test]
    fn test_overwriting_rename() {
        let (mut working, mut cancel, mut setup) = stores();
        let applied = propagate_rename(
            &mut [&mut working, &mut cancel, &mut setup],
            "Silver",
            "gold",
            RenamePolicy::Overwrite,
        );
        assert!(applied);
        assert_eq!(Some(&ScopedValue::expression("5")), cancel.get(Some("GOLD")));
        // Bucket `Gold` now maps `gold` to the old `(Gold, Silver)` value.
        assert_eq!(Some(&ScopedValue::expression("2")), setup.get("Gold", "gold"));
        assert!(!setup.name_in_use("Silver"));
        assert!(working.get(Some("gold")).unwrap().is_distribution());
    }

    #[test]
    fn test_case_only_rename() {
        let (mut working, mut cancel, mut setup) = stores();
        assert!(propagate_rename(
            &mut [&mut working, &mut cancel, &mut setup],
            "gold",
            "GOLD",
            RenamePolicy::SkipIfInUse,
        ));
        assert_eq!(vec!["GOLD".to_string()], working.names());
        assert_eq!(vec!["GOLD".to_string(), "Silver".to_string()], setup.names());
    }

    #[test]
    fn test_trait_objects() {
        let (working, _, setup) = stores();
        let scopes: [&dyn RenameScope; 2] = [&working, &setup];
        assert!(scopes.iter().all(|it| it.name_in_use("gold")));
        assert!(!scopes[0].name_in_use("Silver"));
        assert!(scopes[1].name_in_use("Silver"));
    }

    #[test]
    fn test_blank_rename_is_rejected() {
        let (mut working, mut cancel, mut setup) = stores();
        for policy in [RenamePolicy::Overwrite, RenamePolicy::SkipIfInUse] {
            assert!(!propagate_rename(
                &mut [&mut working, &mut cancel, &mut setup],
                "Gold",
                " ",
                policy,
            ));
        }
        assert_eq!(vec!["Gold".to_string()], working.names());
        assert_eq!(vec!["Gold".to_string(), "Silver".to_string()], setup.names());

        assert!(propagate_rename(
            &mut [&mut working, &mut cancel, &mut setup],
            " Gold ",
            " Platinum",
            RenamePolicy::SkipIfInUse,
        ));
        assert_eq!(vec!["Platinum".to_string()], working.names());
    }
}
