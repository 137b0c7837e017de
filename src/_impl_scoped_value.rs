use crate::distribution::Distribution;
use crate::{Scope, ScopedValue, ValueKind};
use std::fmt::{Display, Formatter};

impl<D> ScopedValue<D> {
    /// Create a new expression value.
    pub fn expression(expression: &str) -> ScopedValue<D> {
        ScopedValue::Expression(expression.to_string())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            ScopedValue::Distribution(_) => ValueKind::Distribution,
            ScopedValue::Expression(_) => ValueKind::Expression,
        }
    }

    pub fn is_distribution(&self) -> bool {
        matches!(self, ScopedValue::Distribution(_))
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, ScopedValue::Expression(_))
    }

    /// The distribution stored in this value, or `None` if this is an expression.
    pub fn as_distribution(&self) -> Option<&D> {
        match self {
            ScopedValue::Distribution(d) => Some(d),
            ScopedValue::Expression(_) => None,
        }
    }

    /// The expression stored in this value, or `None` if this is a distribution.
    pub fn as_expression(&self) -> Option<&str> {
        match self {
            ScopedValue::Distribution(_) => None,
            ScopedValue::Expression(e) => Some(e.as_str()),
        }
    }
}

impl<D: Distribution> ScopedValue<D> {
    /// The text that represents this value in XML: the serialized distribution or the raw
    /// expression.
    pub fn to_text(&self) -> String {
        match self {
            ScopedValue::Distribution(d) => d.to_text(),
            ScopedValue::Expression(e) => e.clone(),
        }
    }
}

/// Human-readable form used by model descriptions.
impl<D: Distribution> Display for ScopedValue<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopedValue::Distribution(d) => write!(f, "{}", d.to_text()),
            ScopedValue::Expression(e) => write!(f, "Expression: {}", e),
        }
    }
}

impl Scope {
    /// The type name of a `Scope::Type`, `None` for the other scopes.
    pub fn as_type(&self) -> Option<&str> {
        match self {
            Scope::Type(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// The `(from, to)` names of a `Scope::Pair`, `None` for the other scopes.
    pub fn as_pair(&self) -> Option<(&str, &str)> {
        match self {
            Scope::Pair(from, to) => Some((from.as_str(), to.as_str())),
            _ => None,
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Global => write!(f, "<global>"),
            Scope::Type(name) => write!(f, "{}", name),
            Scope::Pair(from, to) => write!(f, "{} -> {}", from, to),
        }
    }
}
