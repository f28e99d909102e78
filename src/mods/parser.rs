//! MODS record parser
//!
//! Parses LibraryCloud XML responses into owned MODS element trees that the
//! matcher and extractor can query by path.

use crate::error::{AppError, AppResult};

/// MODS v3 namespace URI
pub const MODS_NS: &str = "http://www.loc.gov/mods/v3";

/// An XML attribute (local name only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An element of a MODS record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Local tag name (`titleInfo`, `namePart`, ...)
    pub name: String,
    /// Namespace URI, if any
    pub namespace: Option<String>,
    pub attributes: Vec<Attribute>,
    /// Text before the first child element, untrimmed
    pub text: Option<String>,
    pub children: Vec<Element>,
}

/// One `<mods:mods>` record from a catalog response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModsRecord {
    pub root: Element,
}

impl ModsRecord {
    /// Parse every `mods` record found anywhere in an XML document
    pub fn parse_collection(xml: &str) -> AppResult<Vec<ModsRecord>> {
        let document = roxmltree::Document::parse(xml)
            .map_err(|e| AppError::Parse(format!("Invalid catalog XML: {}", e)))?;

        let records = document
            .descendants()
            .filter(|node| is_mods_node(node, "mods"))
            .map(|node| ModsRecord {
                root: Element::from_node(node),
            })
            .collect();

        Ok(records)
    }

    /// Parse an XML document holding a single record
    pub fn parse(xml: &str) -> AppResult<ModsRecord> {
        Self::parse_collection(xml)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Parse("No mods record in document".to_string()))
    }

    /// Text of the first element at a child path below the record root, or ""
    pub fn text_at(&self, path: &[&str]) -> String {
        self.root
            .find_path(path)
            .map(|el| el.text().to_string())
            .unwrap_or_default()
    }

    /// First matching element anywhere below the root
    pub fn find_descendant(&self, name: &str) -> Option<&Element> {
        self.root.descendants_named(name).into_iter().next()
    }

    pub fn descendants(&self, name: &str) -> Vec<&Element> {
        self.root.descendants_named(name)
    }

    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.root.children_named(name)
    }

    pub fn find_path_all(&self, path: &[&str]) -> Vec<&Element> {
        self.root.find_path_all(path)
    }
}

impl Element {
    fn from_node(node: roxmltree::Node) -> Self {
        Element {
            name: node.tag_name().name().to_string(),
            namespace: node.tag_name().namespace().map(String::from),
            attributes: node
                .attributes()
                .map(|attr| Attribute {
                    name: attr.name().to_string(),
                    value: attr.value().to_string(),
                })
                .collect(),
            text: node.text().map(String::from),
            children: node
                .children()
                .filter(|child| child.is_element())
                .map(Element::from_node)
                .collect(),
        }
    }

    /// Whether this is the MODS element `name`
    pub fn is(&self, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(MODS_NS)
    }

    /// Trimmed text, "" when absent
    pub fn text(&self) -> &str {
        self.text.as_deref().map(str::trim).unwrap_or("")
    }

    /// Trimmed text, `None` when absent or blank
    pub fn non_empty_text(&self) -> Option<&str> {
        Some(self.text()).filter(|t| !t.is_empty())
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.is(name))
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.is(name))
    }

    /// All MODS descendants named `name`, in document order, excluding self
    pub fn descendants_named(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.is(name) {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// Every element reached by following `path` through direct children
    pub fn find_path_all(&self, path: &[&str]) -> Vec<&Element> {
        let Some((first, rest)) = path.split_first() else {
            return vec![self];
        };
        self.children
            .iter()
            .filter(|child| child.is(first))
            .flat_map(|child| child.find_path_all(rest))
            .collect()
    }

    /// First element reached by following `path` through direct children
    pub fn find_path(&self, path: &[&str]) -> Option<&Element> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        self.children
            .iter()
            .filter(|child| child.is(first))
            .find_map(|child| child.find_path(rest))
    }
}

fn is_mods_node(node: &roxmltree::Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(MODS_NS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<results xmlns:mods="http://www.loc.gov/mods/v3">
  <pagination><numFound>2</numFound></pagination>
  <items>
    <mods:mods>
      <mods:titleInfo><mods:subTitle>only a subtitle</mods:subTitle></mods:titleInfo>
      <mods:titleInfo><mods:title>  Second title  </mods:title></mods:titleInfo>
      <mods:location>
        <mods:physicalLocation type="container">AWM LP 2078</mods:physicalLocation>
        <mods:shelfLocator>AWM LP 2078 side A</mods:shelfLocator>
      </mods:location>
    </mods:mods>
    <mods:mods>
      <mods:titleInfo><mods:title/></mods:titleInfo>
    </mods:mods>
  </items>
</results>"#;

    #[test]
    fn test_parse_collection() {
        let records = ModsRecord::parse_collection(RESPONSE).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_invalid_xml() {
        assert!(matches!(
            ModsRecord::parse_collection("<results><mods:mods>"),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_requires_a_record() {
        assert!(ModsRecord::parse("<results/>").is_err());
    }

    #[test]
    fn test_find_path_skips_branches_without_match() {
        let records = ModsRecord::parse_collection(RESPONSE).unwrap();
        assert_eq!(records[0].text_at(&["titleInfo", "title"]), "Second title");
        assert_eq!(records[1].text_at(&["titleInfo", "title"]), "");
        assert_eq!(records[1].text_at(&["originInfo", "publisher"]), "");
    }

    #[test]
    fn test_descendants_and_attributes() {
        let record = ModsRecord::parse(RESPONSE).unwrap();
        let container = record.find_path_all(&["location", "physicalLocation"]);
        assert_eq!(container.len(), 1);
        assert_eq!(container[0].attr("type"), Some("container"));
        assert!(container[0].has_attributes());

        let shelf = record.find_descendant("shelfLocator").unwrap();
        assert_eq!(shelf.text(), "AWM LP 2078 side A");
        assert!(!shelf.has_attributes());
    }

    #[test]
    fn test_non_mods_elements_are_ignored() {
        let xml = r#"<mods xmlns="http://www.loc.gov/mods/v3">
            <extension><title xmlns="urn:other">not mods</title></extension>
            <titleInfo><title>Mods title</title></titleInfo>
        </mods>"#;
        let record = ModsRecord::parse(xml).unwrap();
        let titles = record.descendants("title");
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].text(), "Mods title");
        assert_eq!(titles[0].non_empty_text(), Some("Mods title"));
    }
}
