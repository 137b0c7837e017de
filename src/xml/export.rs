use crate::distribution::Distribution;
use crate::xml::{escape_attribute, escape_text, PairScopeXml, SingleScopeXml, XmlTags};
use crate::{PairScopeStore, ScopedValue, SingleScopeStore};
use std::io::{Error, Write};

impl<D: Distribution> SingleScopeStore<D> {
    /// Write the whole store as a `<parent_tag>` element holding one child per entry.
    pub fn to_xml(&self, parent_tag: &str, config: &SingleScopeXml) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        write_parent(&mut buffer, parent_tag, |out| self.write_as_xml(out, config))
            .expect("Cannot write store to XML.");
        String::from_utf8(buffer).expect("Invalid UTF formatting in string.")
    }

    /// Write one child element per entry (the global entry first, if set) into `out`.
    ///
    /// Nothing is written for an empty store.
    pub fn write_as_xml(&self, out: &mut dyn Write, config: &SingleScopeXml) -> Result<(), Error> {
        let role = config
            .role
            .as_ref()
            .map(|role| (role.attribute.primary.as_str(), role.value.primary.as_str()));
        if let Some(global) = &self.global {
            let mut attributes = Vec::new();
            attributes.extend(role);
            write_entry(out, &config.tags, &attributes, global)?;
        }
        for (name, value) in self.entries.iter() {
            let mut attributes = Vec::new();
            attributes.extend(role);
            attributes.push((config.type_attribute.primary.as_str(), name));
            write_entry(out, &config.tags, &attributes, value)?;
        }
        return Ok(());
    }
}

impl<D: Distribution> PairScopeStore<D> {
    /// Write the whole store as a `<parent_tag>` element holding one child per entry.
    pub fn to_xml(&self, parent_tag: &str, config: &PairScopeXml) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        write_parent(&mut buffer, parent_tag, |out| self.write_as_xml(out, config))
            .expect("Cannot write store to XML.");
        String::from_utf8(buffer).expect("Invalid UTF formatting in string.")
    }

    /// Write one child element per `(from, to)` entry into `out`.
    pub fn write_as_xml(&self, out: &mut dyn Write, config: &PairScopeXml) -> Result<(), Error> {
        for (from, to, value) in self.iter() {
            let attributes = [
                (config.type1_attribute.primary.as_str(), from),
                (config.type2_attribute.primary.as_str(), to),
            ];
            write_entry(out, &config.tags, &attributes, value)?;
        }
        return Ok(());
    }
}

/// **(internal)** Write `<parent_tag>`, the content produced by `content`, and the closing tag.
fn write_parent<F>(out: &mut dyn Write, parent_tag: &str, content: F) -> Result<(), Error>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Error>,
{
    write!(out, "<{}>", parent_tag)?;
    content(&mut *out)?;
    write!(out, "</{}>", parent_tag)?;
    return Ok(());
}

/// **(internal)** Write a single entry element with the given scope attributes.
fn write_entry<D: Distribution>(
    out: &mut dyn Write,
    tags: &XmlTags,
    attributes: &[(&str, &str)],
    value: &ScopedValue<D>,
) -> Result<(), Error> {
    let tag = tags.tag_for(value.kind());
    write!(out, "<{}", tag)?;
    for (name, text) in attributes {
        write!(out, " {}=\"{}\"", name, escape_attribute(text))?;
    }
    write!(out, ">{}</{}>", escape_text(&value.to_text()), tag)?;
    return Ok(());
}

#[cfg(test)]
mod tests {
    use crate::distribution::ParametricDistribution;
    use crate::xml::{PairScopeXml, SingleScopeXml, XmlName, XmlTags};
    use crate::{PairScopeStore, SingleScopeStore};
    use pretty_assertions::assert_eq;

    fn normal(mean: f64, sd: f64) -> ParametricDistribution {
        ParametricDistribution::new("Normal", &[mean, sd]).unwrap()
    }

    #[test]
    fn test_pair_store_export() {
        let mut store: PairScopeStore = PairScopeStore::new();
        store.set_distribution("A", "B", normal(1.0, 2.0));
        store.set_expression("A", "C", "1+Random()");
        let xml = store.to_xml("SetupTimes", &PairScopeXml::default());
        assert_eq!(
            "<SetupTimes>\
            <Distribution Type1=\"A\" Type2=\"B\">Normal (1;2)</Distribution>\
            <Expression Type1=\"A\" Type2=\"C\">1+Random()</Expression>\
            </SetupTimes>",
            xml
        );
    }

    #[test]
    fn test_single_store_export() {
        let mut store: SingleScopeStore = SingleScopeStore::new();
        store.set_expression(Some("Gold"), "a<b");
        store.set_distribution(None, normal(5.0, 1.0));
        let config = SingleScopeXml::new(
            XmlTags::new(XmlName::new("Delay"), XmlName::new("DelayExpression")),
            XmlName::new("ClientType"),
        )
        .with_role(XmlName::new("Mode"), XmlName::new("Release"));
        let xml = store.to_xml("Release", &config);
        assert_eq!(
            "<Release>\
            <Delay Mode=\"Release\">Normal (5;1)</Delay>\
            <DelayExpression Mode=\"Release\" ClientType=\"Gold\">a&lt;b</DelayExpression>\
            </Release>",
            xml
        );
    }

    #[test]
    fn test_empty_store_export() {
        let store: SingleScopeStore = SingleScopeStore::new();
        assert_eq!("<P></P>", store.to_xml("P", &SingleScopeXml::default()));
        let mut buffer: Vec<u8> = Vec::new();
        store
            .write_as_xml(&mut buffer, &SingleScopeXml::default())
            .unwrap();
        assert!(buffer.is_empty());
    }
}
