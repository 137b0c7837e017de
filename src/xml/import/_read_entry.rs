use crate::distribution::Distribution;
use crate::xml::import::{find_attribute, parent_name, scope_attribute, text_content};
use crate::xml::{PairScopeXml, ScopeXmlError, SingleScopeXml, XmlName, XmlTags};
use crate::{Scope, ScopedValue, ValueKind};
use roxmltree::Node;

/// Read a single `SingleScopeStore` entry from `node`.
///
/// Returns `Ok(None)` when the element is not a store entry: its tag is neither the
/// distribution nor the expression tag, or the configured role does not match. An element
/// without a (non-blank) type attribute is the global entry.
pub fn read_single_entry<D: Distribution>(
    node: Node,
    config: &SingleScopeXml,
) -> Result<Option<(Scope, ScopedValue<D>)>, ScopeXmlError> {
    let Some(kind) = entry_kind(node, &config.tags) else {
        return Ok(None);
    };
    if let Some(role) = &config.role {
        let matches = find_attribute(node, &role.attribute)
            .map(|value| role.value.matches(value.trim()))
            .unwrap_or(false);
        if !matches {
            return Ok(None);
        }
    }
    let scope = match scope_attribute(node, &config.type_attribute) {
        Some(name) => Scope::Type(name.to_string()),
        None => Scope::Global,
    };
    let value = read_value(node, kind)?;
    Ok(Some((scope, value)))
}

/// Read a single `PairScopeStore` entry from `node`.
///
/// Returns `Ok(None)` when the element tag is neither the distribution nor the expression
/// tag. Both scope attributes are required.
pub fn read_pair_entry<D: Distribution>(
    node: Node,
    config: &PairScopeXml,
) -> Result<Option<((String, String), ScopedValue<D>)>, ScopeXmlError> {
    let Some(kind) = entry_kind(node, &config.tags) else {
        return Ok(None);
    };
    let from = required_attribute(node, &config.type1_attribute)?;
    let to = required_attribute(node, &config.type2_attribute)?;
    let value = read_value(node, kind)?;
    Ok(Some(((from.to_string(), to.to_string()), value)))
}

/// **(internal)** The kind of value stored in `node`, or `None` if it is not an entry.
fn entry_kind(node: Node, tags: &XmlTags) -> Option<ValueKind> {
    if node.is_element() {
        tags.kind_of(node.tag_name().name())
    } else {
        None
    }
}

fn required_attribute<'a>(node: Node<'a, '_>, name: &XmlName) -> Result<&'a str, ScopeXmlError> {
    scope_attribute(node, name).ok_or_else(|| ScopeXmlError::MissingScopeAttribute {
        attribute: name.primary.clone(),
        element: node.tag_name().name().to_string(),
        parent: parent_name(node).to_string(),
    })
}

/// **(internal)** Read the text content of `node` as a value of the given kind. Expressions
/// are taken verbatim.
fn read_value<D: Distribution>(
    node: Node,
    kind: ValueKind,
) -> Result<ScopedValue<D>, ScopeXmlError> {
    let text = text_content(node);
    match kind {
        ValueKind::Expression => Ok(ScopedValue::Expression(text)),
        ValueKind::Distribution => D::from_text(&text)
            .map(ScopedValue::Distribution)
            .map_err(|reason| ScopeXmlError::MalformedValue {
                element: node.tag_name().name().to_string(),
                parent: parent_name(node).to_string(),
                reason,
            }),
    }
}

#[cfg(test)]
mod tests {
    use crate::distribution::ParametricDistribution;
    use crate::xml::import::{read_pair_entry, read_single_entry};
    use crate::xml::{PairScopeXml, ScopeXmlError, SingleScopeXml};
    use crate::{Scope, ScopedValue};

    #[test]
    fn test_read_entries_directly() {
        let document = roxmltree::Document::parse(
            "<Host>\
            <Distribution Type=\"Gold\">Normal (1;2)</Distribution>\
            <Expression Type1=\"A\" Type2=\"B\">x</Expression>\
            <Distribution Type1=\"A\" Type2=\"B\">Normal</Distribution>\
            <Distribution Type1=\"A\" Type2=\"B\">Normal (</Distribution>\
            </Host>",
        )
        .unwrap();
        let nodes: Vec<_> = document.root_element().children().collect();

        let single =
            read_single_entry::<ParametricDistribution>(nodes[0], &SingleScopeXml::default());
        let expected = ParametricDistribution::new("Normal", &[1.0, 2.0]).unwrap();
        assert_eq!(
            Ok(Some((Scope::Type("Gold".to_string()), ScopedValue::Distribution(expected)))),
            single
        );

        let pair = read_pair_entry::<ParametricDistribution>(nodes[1], &PairScopeXml::default());
        assert_eq!(
            Ok(Some((("A".to_string(), "B".to_string()), ScopedValue::expression("x")))),
            pair
        );

        let pair = read_pair_entry::<ParametricDistribution>(nodes[2], &PairScopeXml::default());
        assert!(pair.unwrap().unwrap().1.is_distribution());

        let pair = read_pair_entry::<ParametricDistribution>(nodes[3], &PairScopeXml::default());
        assert!(matches!(pair, Err(ScopeXmlError::MalformedValue { .. })));

        // The pair element has no `Type` attribute, so it reads as the global entry.
        let single =
            read_single_entry::<ParametricDistribution>(nodes[1], &SingleScopeXml::default());
        assert_eq!(Some(Scope::Global), single.unwrap().map(|it| it.0));
        // Text nodes are never entries.
        let text = document.root_element().first_child().unwrap().first_child().unwrap();
        assert_eq!(
            Ok(None),
            read_single_entry::<ParametricDistribution>(text, &SingleScopeXml::default())
        );
    }
}
