use crate::distribution::Distribution;
use crate::xml::{PairScopeXml, ScopeXmlError, SingleScopeXml, XmlName};
use crate::{PairScopeStore, Scope, SingleScopeStore};
use roxmltree::{Document, Node};

pub use _read_entry::{read_pair_entry, read_single_entry};

mod _read_entry;

impl<D: Distribution> SingleScopeStore<D> {
    /// Try to read a `SingleScopeStore` from an XML string whose root element holds the
    /// entries. The name of the root element is not checked.
    ///
    /// Fails on the first malformed entry. Elements which do not belong to the store
    /// are skipped.
    pub fn try_from_xml(xml: &str, config: &SingleScopeXml) -> Result<Self, ScopeXmlError> {
        let mut errors = Vec::new();
        let store = Self::try_from_xml_lenient(xml, config, &mut errors)?;
        match errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(store),
        }
    }

    /// The same as `try_from_xml`, but malformed entries are only reported in `errors` and
    /// the remaining entries are still loaded. Only an invalid XML document is a hard error.
    pub fn try_from_xml_lenient(
        xml: &str,
        config: &SingleScopeXml,
        errors: &mut Vec<ScopeXmlError>,
    ) -> Result<Self, ScopeXmlError> {
        let document = parse_document(xml)?;
        let mut store = SingleScopeStore::new();
        store.load_children(document.root_element(), config, errors);
        Ok(store)
    }

    /// Load one child element into this store.
    ///
    /// Returns `Ok(None)` if the element does not belong to this store (unknown tag or
    /// different role), otherwise the `Scope` that was assigned.
    pub fn load_entry(
        &mut self,
        node: Node,
        config: &SingleScopeXml,
    ) -> Result<Option<Scope>, ScopeXmlError> {
        let Some((scope, value)) = read_single_entry(node, config)? else {
            return Ok(None);
        };
        match &scope {
            Scope::Type(name) => self.set(Some(name.as_str()), value),
            _ => self.set(None, value),
        };
        Ok(Some(scope))
    }

    /// Load all element children of `parent` which belong to this store. Errors of
    /// individual elements are collected in `errors` and do not stop the loading.
    ///
    /// Returns the number of loaded entries.
    pub fn load_children(
        &mut self,
        parent: Node,
        config: &SingleScopeXml,
        errors: &mut Vec<ScopeXmlError>,
    ) -> usize {
        let mut loaded = 0;
        for node in parent.children().filter(|it| it.is_element()) {
            match self.load_entry(node, config) {
                Ok(Some(_)) => loaded += 1,
                Ok(None) => trace_not_handled(node),
                Err(error) => report(error, errors),
            }
        }
        loaded
    }
}

impl<D: Distribution> PairScopeStore<D> {
    /// Try to read a `PairScopeStore` from an XML string whose root element holds the
    /// entries. The name of the root element is not checked.
    ///
    /// Fails on the first malformed entry. Elements which do not belong to the store
    /// are skipped.
    pub fn try_from_xml(xml: &str, config: &PairScopeXml) -> Result<Self, ScopeXmlError> {
        let mut errors = Vec::new();
        let store = Self::try_from_xml_lenient(xml, config, &mut errors)?;
        match errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(store),
        }
    }

    /// The same as `try_from_xml`, but malformed entries are only reported in `errors`.
    pub fn try_from_xml_lenient(
        xml: &str,
        config: &PairScopeXml,
        errors: &mut Vec<ScopeXmlError>,
    ) -> Result<Self, ScopeXmlError> {
        let document = parse_document(xml)?;
        let mut store = PairScopeStore::new();
        store.load_children(document.root_element(), config, errors);
        Ok(store)
    }

    /// Load one child element into this store.
    ///
    /// Returns `Ok(None)` if the element does not belong to this store, otherwise the
    /// `Scope::Pair` that was assigned.
    pub fn load_entry(
        &mut self,
        node: Node,
        config: &PairScopeXml,
    ) -> Result<Option<Scope>, ScopeXmlError> {
        let Some(((from, to), value)) = read_pair_entry(node, config)? else {
            return Ok(None);
        };
        self.set(&from, &to, value);
        Ok(Some(Scope::Pair(from, to)))
    }

    /// Load all element children of `parent` which belong to this store. Errors of
    /// individual elements are collected in `errors` and do not stop the loading.
    ///
    /// Returns the number of loaded entries.
    pub fn load_children(
        &mut self,
        parent: Node,
        config: &PairScopeXml,
        errors: &mut Vec<ScopeXmlError>,
    ) -> usize {
        let mut loaded = 0;
        for node in parent.children().filter(|it| it.is_element()) {
            match self.load_entry(node, config) {
                Ok(Some(_)) => loaded += 1,
                Ok(None) => trace_not_handled(node),
                Err(error) => report(error, errors),
            }
        }
        loaded
    }
}

/// **(internal)** Parse an XML document, converting syntax errors into `ScopeXmlError`.
fn parse_document(xml: &str) -> Result<Document, ScopeXmlError> {
    Document::parse(xml).map_err(|e| ScopeXmlError::Document(e.to_string()))
}

fn trace_not_handled(node: Node) {
    tracing::trace!(
        element = node.tag_name().name(),
        "Element is not handled by this store."
    );
}

fn report(error: ScopeXmlError, errors: &mut Vec<ScopeXmlError>) {
    tracing::warn!(%error, "Dropping malformed store entry.");
    errors.push(error);
}

/// **(internal)** Find the value of an attribute whose (local) name matches `name`.
fn find_attribute<'a>(node: Node<'a, '_>, name: &XmlName) -> Option<&'a str> {
    node.attributes()
        .find(|attribute| name.matches(attribute.name()))
        .map(|attribute| attribute.value())
}

/// **(internal)** Read a scope attribute. Missing and blank values are both `None`,
/// present values are trimmed.
fn scope_attribute<'a>(node: Node<'a, '_>, name: &XmlName) -> Option<&'a str> {
    find_attribute(node, name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// **(internal)** The full text content of an element (all text descendants, in order).
fn text_content(node: Node) -> String {
    node.descendants()
        .filter(|it| it.is_text())
        .filter_map(|it| it.text())
        .collect()
}

/// **(internal)** The tag name of the parent element (empty for the root element).
fn parent_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.parent_element()
        .map(|parent| parent.tag_name().name())
        .unwrap_or("")
}
