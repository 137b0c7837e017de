//! Adds XML persistence to `SingleScopeStore` and `PairScopeStore`.
//!
//! Every stored value becomes one child element of a parent element owned by the hosting
//! model element:
//!
//! ```xml
//! <Parent>
//!   <Distribution Type1="A" Type2="B">LogNormalDistribution (1;2)</Distribution>
//!   <Expression Type1="A" Type2="C">1+Random()</Expression>
//! </Parent>
//! ```
//!
//! The tag name says whether the content is a distribution or an expression, the
//! attributes carry the scope. The names of tags and attributes are not fixed, they are
//! supplied by the host through `SingleScopeXml` and `PairScopeXml`.

use crate::ValueKind;
use roxmltree::Node;
use std::borrow::Cow;
use thiserror::Error;

/// A very simple XML writer which dumps store entries using a configurable vocabulary.
pub mod export;

/// Reading of store entries using the roxmltree library. Elements that do not belong to
/// a store are reported as not handled, so that the host can dispatch them elsewhere.
pub mod import;

/// An XML tag or attribute name.
///
/// The `primary` spelling is used when writing. When reading, the primary spelling and all
/// `aliases` are accepted, compared case-insensitively. This allows reading files written
/// with an older (or localized) vocabulary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XmlName {
    pub primary: String,
    pub aliases: Vec<String>,
}

/// The two tag names used to mark distribution and expression entries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XmlTags {
    pub distribution: XmlName,
    pub expression: XmlName,
}

/// An attribute that tells apart several single-scope stores sharing one parent element
/// (e.g. processing and post-processing times of one station).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XmlRole {
    pub attribute: XmlName,
    pub value: XmlName,
}

/// XML vocabulary of a `SingleScopeStore`.
///
/// Typed entries carry the type name in `type_attribute`. The global entry has no such
/// attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SingleScopeXml {
    pub tags: XmlTags,
    pub type_attribute: XmlName,
    pub role: Option<XmlRole>,
}

/// XML vocabulary of a `PairScopeStore`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PairScopeXml {
    pub tags: XmlTags,
    pub type1_attribute: XmlName,
    pub type2_attribute: XmlName,
}

/// Errors raised while reading store entries from XML.
///
/// Note that an element which does not belong to the store is *not* an error, readers
/// return `Ok(None)` for such elements.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ScopeXmlError {
    #[error("Attribute `{attribute}` of element <{element}> in <{parent}> is missing or empty.")]
    MissingScopeAttribute {
        attribute: String,
        element: String,
        parent: String,
    },
    #[error("Element <{element}> in <{parent}> does not contain a valid distribution: {reason}")]
    MalformedValue {
        element: String,
        parent: String,
        reason: String,
    },
    #[error("XML Error: {0}")]
    Document(String),
}

impl XmlName {
    pub fn new(primary: &str) -> XmlName {
        XmlName {
            primary: primary.to_string(),
            aliases: Vec::new(),
        }
    }

    /// Add an alternative spelling that is accepted when reading.
    pub fn with_alias(mut self, alias: &str) -> XmlName {
        self.aliases.push(alias.to_string());
        self
    }

    /// True if `name` is the primary spelling or one of the aliases (case-insensitive).
    pub fn matches(&self, name: &str) -> bool {
        crate::_impl_name_map::same_name(&self.primary, name)
            || self
                .aliases
                .iter()
                .any(|alias| crate::_impl_name_map::same_name(alias, name))
    }
}

impl From<&str> for XmlName {
    fn from(value: &str) -> Self {
        XmlName::new(value)
    }
}

impl XmlTags {
    pub fn new(distribution: XmlName, expression: XmlName) -> XmlTags {
        XmlTags {
            distribution,
            expression,
        }
    }

    /// Decide which kind of value the element with the given tag name holds, or `None`
    /// if the tag is not known.
    pub fn kind_of(&self, tag_name: &str) -> Option<ValueKind> {
        if self.distribution.matches(tag_name) {
            Some(ValueKind::Distribution)
        } else if self.expression.matches(tag_name) {
            Some(ValueKind::Expression)
        } else {
            None
        }
    }

    pub fn is_distribution_node(&self, node: Node) -> bool {
        node.is_element() && self.distribution.matches(node.tag_name().name())
    }

    pub fn is_expression_node(&self, node: Node) -> bool {
        node.is_element() && self.expression.matches(node.tag_name().name())
    }

    /// The tag name written for values of the given kind.
    pub fn tag_for(&self, kind: ValueKind) -> &str {
        match kind {
            ValueKind::Distribution => &self.distribution.primary,
            ValueKind::Expression => &self.expression.primary,
        }
    }
}

impl Default for XmlTags {
    fn default() -> Self {
        XmlTags::new("Distribution".into(), "Expression".into())
    }
}

impl SingleScopeXml {
    pub fn new(tags: XmlTags, type_attribute: XmlName) -> SingleScopeXml {
        SingleScopeXml {
            tags,
            type_attribute,
            role: None,
        }
    }

    /// Mark all entries of this store with `attribute="value"`. Elements with a different
    /// (or missing) role are then not handled by this store.
    pub fn with_role(mut self, attribute: XmlName, value: XmlName) -> SingleScopeXml {
        self.role = Some(XmlRole { attribute, value });
        self
    }
}

impl Default for SingleScopeXml {
    fn default() -> Self {
        SingleScopeXml::new(XmlTags::default(), "Type".into())
    }
}

impl PairScopeXml {
    pub fn new(tags: XmlTags, type1_attribute: XmlName, type2_attribute: XmlName) -> PairScopeXml {
        PairScopeXml {
            tags,
            type1_attribute,
            type2_attribute,
        }
    }
}

impl Default for PairScopeXml {
    fn default() -> Self {
        PairScopeXml::new(XmlTags::default(), "Type1".into(), "Type2".into())
    }
}

/// **(internal)** Escape the content of an element. Carriage returns are escaped too,
/// otherwise the parser would normalize them away.
pub(crate) fn escape_text(value: &str) -> Cow<str> {
    escape(value, false)
}

/// **(internal)** Escape an attribute value, including whitespace which is otherwise
/// normalized to spaces by XML parsers.
pub(crate) fn escape_attribute(value: &str) -> Cow<str> {
    escape(value, true)
}

fn escape(value: &str, attribute: bool) -> Cow<str> {
    let needs_escape = |c: char| match c {
        '&' | '<' | '>' | '\r' => true,
        '"' | '\'' | '\n' | '\t' => attribute,
        _ => false,
    };
    if !value.contains(needs_escape) {
        return Cow::Borrowed(value);
    }
    let mut result = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        if !needs_escape(c) {
            result.push(c);
            continue;
        }
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            '\r' => result.push_str("&#13;"),
            '\n' => result.push_str("&#10;"),
            '\t' => result.push_str("&#9;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
