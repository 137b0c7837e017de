//! A library of *scoped parameter stores*.
//!
//! A model element of a discrete-event simulation often needs a value (a random
//! distribution or a free-form expression) that can be overridden per client type, or even
//! per ordered pair of client types. This crate provides the two stores that implement this
//! pattern, together with their XML persistence and rename propagation:
//!
//!  - `SingleScopeStore` maps a single type name to a `ScopedValue`, with one optional
//!    global (unnamed) slot.
//!  - `PairScopeStore` maps an ordered pair of type names to a `ScopedValue` (setup time
//!    matrices and similar). There is no global slot.
//!
//! Type names are always compared case-insensitively, but the spelling used when a name was
//! first inserted is preserved for enumeration and persistence.

#[macro_use]
extern crate lazy_static;

use crate::distribution::ParametricDistribution;

pub mod distribution;
pub mod rename;
pub mod xml;

/// **(internal)** Implementation of the case-insensitive `NameMap`.
mod _impl_name_map;
/// **(internal)** Utility methods for `ScopedValue` and `Scope`.
mod _impl_scoped_value;
/// **(internal)** Utility methods for `SingleScopeStore`.
mod _impl_single_scope_store;
/// **(internal)** Utility methods for `PairScopeStore`.
mod _impl_pair_scope_store;
/// **(internal)** Symmetric equality of both store kinds.
mod _impl_eq_stores;

/// The value attached to a scope: either a random distribution or a textual expression,
/// never both.
///
/// Expressions are opaque to this crate: they are stored verbatim and only evaluated later
/// by a simulator. Assigning a value of a different kind to an existing scope replaces the
/// old value.
#[derive(Clone, Debug, PartialEq)]
pub enum ScopedValue<D = ParametricDistribution> {
    Distribution(D),
    Expression(String),
}

/// The two possible kinds of a `ScopedValue`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueKind {
    Distribution,
    Expression,
}

/// Identifies the scope of one stored entry, as reported by the XML readers.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Scope {
    /// The unnamed global slot of a `SingleScopeStore`.
    Global,
    /// A single type name of a `SingleScopeStore`.
    Type(String),
    /// An ordered `(from, to)` pair of type names of a `PairScopeStore`.
    Pair(String, String),
}

/// An insertion-ordered map with `String` keys compared case-insensitively.
///
/// The first spelling of a key is the one that is kept: inserting `"a"` into a map that
/// already contains `"A"` replaces the value, but the key stays `"A"`.
#[derive(Clone, Debug)]
pub struct NameMap<V> {
    entries: Vec<(String, V)>,
    index: fxhash::FxHashMap<String, usize>,
}

/// Assigns a `ScopedValue` to individual type names, with an additional global slot that
/// serves as a fallback for types without their own entry.
///
/// Note that `get` never falls back to the global slot on its own. Use `get_or_global`
/// for the two-tier lookup.
#[derive(Clone, Debug)]
pub struct SingleScopeStore<D = ParametricDistribution> {
    entries: NameMap<ScopedValue<D>>,
    global: Option<ScopedValue<D>>,
}

/// Assigns a `ScopedValue` to ordered pairs of type names.
///
/// Entries are bucketed by the first ("from") component. A bucket never stays empty: when
/// its last entry is removed, the bucket is removed as well.
#[derive(Clone, Debug)]
pub struct PairScopeStore<D = ParametricDistribution> {
    buckets: NameMap<NameMap<ScopedValue<D>>>,
}
