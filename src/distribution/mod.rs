//! Distribution values that can be attached to a scope.
//!
//! The stores do not sample or evaluate distributions, they only need to copy, compare
//! and (de)serialize them. This is captured by the `Distribution` trait. The
//! `ParametricDistribution` type is a simple implementation of this trait which remembers
//! the name of a distribution family and its numeric parameters.

use std::fmt::Debug;

/// **(internal)** Parsing, formatting and comparison of `ParametricDistribution`.
mod _impl_parametric_distribution;

/// Two parameters which differ by at most this value are considered identical.
pub const MAX_PARAMETER_ERROR: f64 = 10E-12;

/// A value type describing a random distribution.
///
/// `Clone` must produce an independent copy and `PartialEq` must compare the distributions
/// structurally (by their parameters, not by identity).
pub trait Distribution: Clone + PartialEq + Debug {
    /// Convert this distribution into the text that is persisted as XML element content.
    fn to_text(&self) -> String;

    /// Parse a distribution from its persisted text. The error is a human-readable
    /// description of the problem.
    fn from_text(text: &str) -> Result<Self, String>;
}

/// A distribution given by the name of its family and a list of numeric parameters.
///
/// The textual form is `Name (p1;p2;...)`, or just `Name` for distributions without
/// parameters. For example `Exponential distribution (50)` or
/// `LogNormalDistribution (1;2)`.
///
/// Family names are compared case-insensitively and parameters with an absolute tolerance
/// of `MAX_PARAMETER_ERROR`.
#[derive(Clone, Debug)]
pub struct ParametricDistribution {
    name: String,
    parameters: Vec<f64>,
}
