//! Owned XML element tree with mixed-content text.
//!
//! Doxygen documentation XML interleaves character data with markup
//! elements (`<para>Use <bold>this</bold> carefully</para>`). Each
//! [`XmlElement`] therefore keeps the character data before its first child
//! in `text` and the character data following its own end tag in `tail`, so
//! that document order can be reconstructed exactly.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ParserError;

/// A parsed XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Character data between the start tag and the first child element.
    pub text: String,
    pub children: Vec<XmlElement>,
    /// Character data between the end tag and the next sibling (or the
    /// parent's end tag).
    pub tail: String,
}

impl XmlElement {
    /// Value of the attribute `name`, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child element called `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct child elements called `name`, in document order.
    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Self> + use<'a, 'n> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// All elements reached by a slash-separated path of child names,
    /// e.g. `sectiondef/memberdef`.
    #[must_use]
    pub fn find_all(&self, path: &str) -> Vec<&Self> {
        let mut current = vec![self];
        for step in path.split('/') {
            current = current
                .into_iter()
                .flat_map(move |node| node.children.iter().filter(move |c| c.name == step))
                .collect();
        }
        current
    }

    /// Depth-first iterator over every descendant element (excluding `self`).
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Whether the element carries non-whitespace text before its first child.
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Whether any character data directly inside the element is
    /// non-whitespace, including text between and after its children.
    #[must_use]
    pub fn has_direct_text(&self) -> bool {
        self.has_text() || self.children.iter().any(|c| !c.tail.trim().is_empty())
    }
}

/// Iterator returned by [`XmlElement::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Parse a complete XML document and return its root element.
///
/// # Errors
/// Returns `ParserError::Xml` for malformed input or a document without a
/// root element.
pub fn parse_document(content: &str) -> Result<XmlElement, ParserError> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(open_element(e)?),
            Ok(Event::Empty(ref e)) => {
                let element = open_element(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ParserError::Xml("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| xml_error(&reader, &err))?;
                push_text(&mut stack, &text);
            }
            Ok(Event::CData(ref e)) => {
                push_text(&mut stack, &String::from_utf8_lossy(e));
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(xml_error(&reader, &err)),
            // Declarations, comments, processing instructions, doctypes.
            Ok(_) => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ParserError::Xml(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| ParserError::Xml("document has no root element".to_string()))
}

fn open_element(start: &BytesStart<'_>) -> Result<XmlElement, ParserError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParserError::Xml(format!("bad attribute in <{name}>: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| ParserError::Xml(format!("bad attribute value in <{name}>: {e}")))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name,
        attributes,
        ..XmlElement::default()
    })
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), ParserError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(ParserError::Xml(format!(
            "second root element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

/// Text goes to the open element's `text` until it has a child, after which
/// it belongs to the tail of the most recent child.
fn push_text(stack: &mut [XmlElement], text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    match parent.children.last_mut() {
        Some(last) => last.tail.push_str(text),
        None => parent.text.push_str(text),
    }
}

fn xml_error(reader: &Reader<&[u8]>, err: &quick_xml::Error) -> ParserError {
    ParserError::Xml(format!(
        "at position {}: {err}",
        reader.buffer_position()
    ))
}
