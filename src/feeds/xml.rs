//! XML parsing capability used by the feed parser.
//!
//! Feed mapping code never talks to an XML library directly. It asks an
//! [`XmlParser`] for an [`XmlNode`] tree and walks that. [`QuickXmlParser`]
//! is the stock implementation, built on `quick-xml`'s pull reader.
//!
//! Element and attribute names are stored by local name. Each element also
//! keeps the namespace URI its prefix (or the default namespace) resolves to,
//! so `<media:title>` and `<title>` stay distinguishable: both are named
//! `title`, only one has [`XmlNode::namespace`] set to the Media RSS URI.

use crate::error::FeedError;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

/// Something that can turn XML text into a node tree.
pub trait XmlParser {
    /// Parse a whole document and return its root element.
    fn parse(&self, xml: &str) -> Result<XmlNode, FeedError>;
}

/// One element of a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Local name of the element.
    pub name: String,
    /// Namespace URI the element's name resolves to; `None` when unbound.
    ///
    /// A prefix with no declaration in scope is kept as `"prefix:"` so the
    /// element is still told apart from unprefixed ones.
    pub namespace: Option<String>,
    /// Attributes in document order, keyed by local name.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlChild>,
}

/// Content of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlChild {
    Element(XmlNode),
    Text(String),
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Value of the attribute with the given local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter_map(|child| match child {
            XmlChild::Element(node) => Some(node),
            XmlChild::Text(_) => None,
        })
    }

    /// First direct child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.elements().find(|node| node.name == name)
    }

    /// True when the element is in one of `namespaces`; `None` in the list
    /// stands for "no namespace".
    pub fn in_namespace(&self, namespaces: &[Option<&str>]) -> bool {
        namespaces.contains(&self.namespace.as_deref())
    }

    /// Concatenated text of this element and all of its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlChild::Text(text) => out.push_str(text),
                XmlChild::Element(node) => node.collect_text(out),
            }
        }
    }

    /// Descendants whose local name is one of `names`, in document order.
    ///
    /// The search does not continue inside a matching element.
    pub fn find_all<'a>(&'a self, names: &[&str]) -> Vec<&'a XmlNode> {
        let mut found = Vec::new();
        self.find_into(names, &mut found);
        found
    }

    fn find_into<'a>(&'a self, names: &[&str], found: &mut Vec<&'a XmlNode>) {
        for node in self.elements() {
            if names.contains(&node.name.as_str()) {
                found.push(node);
            } else {
                node.find_into(names, found);
            }
        }
    }
}

/// [`XmlParser`] backed by `quick-xml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickXmlParser;

impl XmlParser for QuickXmlParser {
    fn parse(&self, xml: &str) -> Result<XmlNode, FeedError> {
        let mut reader = NsReader::from_str(xml);
        let mut tree = TreeBuilder::default();

        loop {
            let (resolved, event) = reader.read_resolved_event()?;
            match event {
                Event::Start(start) => tree.open(element(&start, resolved)?),
                Event::Empty(start) => tree.attach(element(&start, resolved)?)?,
                Event::End(end) => {
                    let name = String::from_utf8_lossy(end.local_name().as_ref()).into_owned();
                    tree.close(name)?;
                }
                Event::Text(text) => {
                    let raw = String::from_utf8_lossy(&text);
                    let value = unescape(&raw)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| raw.clone().into_owned());
                    tree.text(value)?;
                }
                Event::CData(data) => {
                    tree.text(String::from_utf8_lossy(&data).into_owned())?;
                }
                Event::GeneralRef(entity) => {
                    let reference = format!("&{};", String::from_utf8_lossy(&entity));
                    // Undeclared entities (HTML's &nbsp; and friends) are kept
                    // verbatim for the markup stripper to decode.
                    let value = unescape(&reference)
                        .map(|v| v.into_owned())
                        .unwrap_or(reference);
                    tree.text(value)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        tree.finish()
    }
}

fn namespace_of(resolved: ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Unbound => None,
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        ResolveResult::Unknown(prefix) => Some(format!("{}:", String::from_utf8_lossy(&prefix))),
    }
}

fn element(start: &BytesStart<'_>, resolved: ResolveResult<'_>) -> Result<XmlNode, FeedError> {
    let mut node = XmlNode::new(String::from_utf8_lossy(start.local_name().as_ref()));
    node.namespace = namespace_of(resolved);
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
        node.attributes.push((key, value));
    }
    Ok(node)
}

#[derive(Default)]
struct TreeBuilder {
    open: Vec<XmlNode>,
    root: Option<XmlNode>,
}

impl TreeBuilder {
    fn open(&mut self, node: XmlNode) {
        self.open.push(node);
    }

    fn close(&mut self, name: String) -> Result<(), FeedError> {
        match self.open.pop() {
            Some(node) if node.name == name => self.attach(node),
            Some(node) => Err(FeedError::UnclosedElement(node.name)),
            None => Err(FeedError::UnmatchedEnd(name)),
        }
    }

    fn attach(&mut self, node: XmlNode) -> Result<(), FeedError> {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(XmlChild::Element(node));
            Ok(())
        } else if self.root.is_none() {
            self.root = Some(node);
            Ok(())
        } else {
            Err(FeedError::OutsideRoot)
        }
    }

    fn text(&mut self, text: String) -> Result<(), FeedError> {
        match self.open.last_mut() {
            Some(parent) => {
                // Adjacent text and entity events belong to one run.
                if let Some(XmlChild::Text(last)) = parent.children.last_mut() {
                    last.push_str(&text);
                } else {
                    parent.children.push(XmlChild::Text(text));
                }
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(FeedError::OutsideRoot),
        }
    }

    fn finish(mut self) -> Result<XmlNode, FeedError> {
        if let Some(node) = self.open.pop() {
            return Err(FeedError::UnclosedElement(node.name));
        }
        self.root.ok_or(FeedError::MissingRoot)
    }
}
