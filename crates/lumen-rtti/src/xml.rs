//! XML parameter encoding
//!
//! Parameters in XML form are exactly the ordered attribute list of one
//! element. [`XmlElement`] is the minimal model the runtime needs, an
//! element name plus its attributes in document order, read and written
//! through `quick-xml`. [`XmlParamParser`] walks that attribute list with
//! the same state machine contract as the textual parser.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::RttiError;

/// One XML element: a name and its ordered attribute list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
}

impl XmlElement {
    /// Create an empty element with the given name.
    pub fn new(name: impl Into<String>) -> XmlElement {
        XmlElement {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Parse the first element of an XML document.
    ///
    /// Attributes are captured in document order; anything past the opening
    /// tag (children, text) is outside this runtime's data model and is
    /// ignored.
    pub fn parse(input: &str) -> Result<XmlElement, RttiError> {
        let mut reader = Reader::from_str(input);
        loop {
            match reader.read_event()? {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    let attributes = e
                        .attributes()
                        .filter_map(|a| {
                            a.ok().map(|attr| {
                                let key =
                                    String::from_utf8_lossy(attr.key.as_ref()).to_string();
                                let value = attr
                                    .unescape_value()
                                    .map(|v| v.into_owned())
                                    .unwrap_or_default();
                                (key, value)
                            })
                        })
                        .collect();
                    return Ok(XmlElement { name, attributes });
                }
                Event::Eof => return Err(RttiError::NoElement),
                _ => {}
            }
        }
    }

    /// Serialize as a self-closing element, attribute values escaped.
    pub fn write(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 3);
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
        out.push_str("/>");
        out
    }

    /// Element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing one in place or appending
    /// at the end (document order is preserved either way).
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// Attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of attributes
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

/// Lazy pair source over an element's attribute list.
///
/// Same state machine as [`TextParamParser`](crate::TextParamParser):
/// unstarted, positioned, exhausted; one parse in flight; restartable via
/// [`parse_xml`](XmlParamParser::parse_xml).
#[derive(Debug, Default)]
pub struct XmlParamParser {
    attributes: Vec<(String, String)>,
    index: usize,
}

impl XmlParamParser {
    /// Create an unstarted parser.
    pub fn new() -> XmlParamParser {
        XmlParamParser::default()
    }

    /// Restart over the attribute list of `element`.
    ///
    /// Returns `true` when the element has at least one attribute.
    pub fn parse_xml(&mut self, element: &XmlElement) -> bool {
        self.attributes = element
            .attributes()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        self.index = 0;
        !self.attributes.is_empty()
    }

    /// Advance to the next attribute; idempotent `false` once exhausted.
    pub fn next(&mut self) -> bool {
        if self.index < self.attributes.len() {
            self.index += 1;
        }
        self.index < self.attributes.len()
    }

    /// Whether the parser is positioned on a pair.
    pub fn has_param(&self) -> bool {
        self.index < self.attributes.len()
    }

    /// Name of the current pair, empty when not positioned.
    pub fn name(&self) -> &str {
        self.attributes
            .get(self.index)
            .map_or("", |(name, _)| name.as_str())
    }

    /// Value of the current pair, empty when not positioned.
    pub fn value(&self) -> &str {
        self.attributes
            .get(self.index)
            .map_or("", |(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_element_with_ordered_attributes() {
        let element =
            XmlElement::parse("<?xml version=\"1.0\" ?><Call Param0=\"1\" Param1=\"2.5\"/>")
                .unwrap();
        assert_eq!(element.name(), "Call");
        assert_eq!(element.attribute_count(), 2);
        let pairs: Vec<_> = element.attributes().collect();
        assert_eq!(pairs, vec![("Param0", "1"), ("Param1", "2.5")]);
    }

    #[test]
    fn no_element_is_an_error() {
        assert!(matches!(
            XmlElement::parse("  \n "),
            Err(RttiError::NoElement)
        ));
    }

    #[test]
    fn write_round_trips_with_escaping() {
        let mut element = XmlElement::new("Node");
        element.set_attribute("Name", "a<b");
        element.set_attribute("Text", "it's");
        let xml = element.write();
        assert_eq!(XmlElement::parse(&xml).unwrap(), element);
    }

    #[test]
    fn set_attribute_replaces_in_place() {
        let mut element = XmlElement::new("Node");
        element.set_attribute("a", "1");
        element.set_attribute("b", "2");
        element.set_attribute("a", "3");
        let pairs: Vec<_> = element.attributes().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn attribute_walk_matches_text_parser_contract() {
        let element = XmlElement::parse("<E x=\"1\" y=\"2\" z=\"3\"/>").unwrap();
        let mut parser = XmlParamParser::new();
        assert!(parser.parse_xml(&element));
        assert_eq!((parser.name(), parser.value()), ("x", "1"));
        assert!(parser.next());
        assert!(parser.next());
        assert_eq!((parser.name(), parser.value()), ("z", "3"));
        assert!(!parser.next());
        assert!(!parser.has_param());
        assert!(!parser.next());
        assert_eq!(parser.name(), "");
    }

    #[test]
    fn empty_element_is_exhausted_immediately() {
        let element = XmlElement::new("E");
        let mut parser = XmlParamParser::new();
        assert!(!parser.parse_xml(&element));
        assert!(!parser.has_param());
    }
}
