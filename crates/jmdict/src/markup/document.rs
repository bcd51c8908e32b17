//! XML document parsing on top of quick-xml.
//!
//! JMdict declares its code values (`&v1;`, `&n;`, ...) as general entities
//! in the DOCTYPE internal subset. Those declarations are collected while
//! parsing and used to resolve entity references in character data.
//! References to undeclared entities resolve to the bare entity name.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use regex::Regex;
use tracing::debug;

use crate::errors::MarkupError;
use crate::markup::node::{Element, Node};

/// `<!ENTITY name "value">` inside a DOCTYPE internal subset
static ENTITY_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<!ENTITY\s+([^\s%"']+)\s+(?:"([^"]*)"|'([^']*)')\s*>"#)
    .expect("entity declaration pattern is valid")
});

/// `&name;` general entity reference (character references excluded)
static ENTITY_REFERENCE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"&([^#;&\s]+);").expect("entity reference pattern is valid"));

/// A fully parsed XML document.
#[derive(Debug, Clone)]
pub struct Document {
  root: Element,
  entities: HashMap<String, String>,
}

impl Document {
  /// Parses an XML document held in memory.
  ///
  /// # Errors
  /// - `MarkupError::Xml` when quick-xml rejects the input
  /// - `MarkupError::Malformed` for unbalanced tags or a missing root element
  pub fn parse(xml: &str) -> Result<Self, MarkupError> {
    let mut reader = Reader::from_str(xml);
    let mut entities = HashMap::new();

    // Stack of open elements; the finished root lands in `root`
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
      let event = reader.read_event().map_err(|e| MarkupError::Xml {
        position: reader.buffer_position() as u64,
        source: Arc::new(e),
      })?;

      match event {
        Event::DocType(doctype) => {
          let doctype = utf8(&doctype)?;
          entities = parse_entity_declarations(doctype);
          debug!(entities = entities.len(), "Collected DTD entity declarations");
        }
        Event::Start(start) => {
          stack.push(open_element(&start, &entities)?);
        }
        Event::Empty(start) => {
          let element = open_element(&start, &entities)?;
          attach(&mut stack, &mut root, element)?;
        }
        Event::End(end) => {
          let name = utf8(end.name().as_ref())?.to_owned();
          let element = stack.pop().ok_or_else(|| MarkupError::Malformed {
            reason: format!("unexpected closing tag </{name}>"),
          })?;
          if element.name() != name {
            return Err(MarkupError::Malformed {
              reason: format!("expected </{}>, found </{name}>", element.name()),
            });
          }
          attach(&mut stack, &mut root, element)?;
        }
        Event::Text(text) => {
          if let Some(parent) = stack.last_mut() {
            let text = unescape(utf8(&text)?, &entities)?;
            parent.push(Node::Text(text));
          }
        }
        Event::CData(cdata) => {
          if let Some(parent) = stack.last_mut() {
            parent.push(Node::Text(utf8(&cdata)?.to_owned()));
          }
        }
        Event::Eof => break,
        // Declarations, comments and processing instructions carry no content
        _ => {}
      }
    }

    if let Some(open) = stack.last() {
      return Err(MarkupError::Malformed {
        reason: format!("unclosed element <{}>", open.name()),
      });
    }

    let root = root.ok_or_else(|| MarkupError::Malformed {
      reason: "document has no root element".to_string(),
    })?;

    Ok(Self { root, entities })
  }

  /// Reads and parses the XML file at `path`.
  ///
  /// # Errors
  /// - `MarkupError::Io` when the file cannot be read
  /// - Any error returned by [`Document::parse`]
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MarkupError> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|e| MarkupError::Io {
      path: path.to_path_buf(),
      source: Arc::new(e),
    })?;
    Self::parse(&xml)
  }

  /// Root element of the document
  pub fn root(&self) -> &Element {
    &self.root
  }

  /// Entities declared in the DOCTYPE internal subset
  pub fn entities(&self) -> &HashMap<String, String> {
    &self.entities
  }

  /// Every element named `name` anywhere in the document (the `//name` query)
  pub fn descendants<'a>(&'a self, name: &'a str) -> crate::markup::node::Descendants<'a> {
    self.root.descendants(name)
  }
}

/// Appends a finished element to its parent, or makes it the root.
fn attach(
  stack: &mut [Element],
  root: &mut Option<Element>,
  element: Element,
) -> Result<(), MarkupError> {
  match stack.last_mut() {
    Some(parent) => {
      parent.push(Node::Element(element));
      Ok(())
    }
    None if root.is_none() => {
      *root = Some(element);
      Ok(())
    }
    None => Err(MarkupError::Malformed {
      reason: format!("second root element <{}>", element.name()),
    }),
  }
}

fn open_element(
  start: &BytesStart<'_>,
  entities: &HashMap<String, String>,
) -> Result<Element, MarkupError> {
  let mut element = Element::new(utf8(start.name().as_ref())?);

  for attribute in start.attributes() {
    let attribute = attribute.map_err(|e| MarkupError::Malformed {
      reason: format!("invalid attribute: {e}"),
    })?;
    let key = utf8(attribute.key.as_ref())?;
    let value = unescape(utf8(&attribute.value)?, entities)?;
    element = element.with_attribute(key, value);
  }

  Ok(element)
}

fn utf8(bytes: &[u8]) -> Result<&str, MarkupError> {
  std::str::from_utf8(bytes).map_err(|e| MarkupError::Malformed {
    reason: format!("invalid UTF-8: {e}"),
  })
}

/// Collects `<!ENTITY name "value">` declarations from a DOCTYPE body.
///
/// Character references and predefined entities inside a value are resolved.
/// Parameter entities (`<!ENTITY % name ...>`) are ignored.
pub(crate) fn parse_entity_declarations(doctype: &str) -> HashMap<String, String> {
  ENTITY_DECLARATION
    .captures_iter(doctype)
    .map(|caps| {
      let raw = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
      let value = unescape_with(raw, resolve_predefined_entity)
        .map_or_else(|_| raw.to_string(), |value| value.into_owned());
      (caps[1].to_string(), value)
    })
    .collect()
}

/// Resolves character references, predefined entities and declared entities.
///
/// A reference to an undeclared entity resolves to its bare name.
fn unescape(raw: &str, entities: &HashMap<String, String>) -> Result<String, MarkupError> {
  if !raw.contains('&') {
    return Ok(raw.to_owned());
  }

  let undeclared: HashMap<&str, &str> = ENTITY_REFERENCE
    .captures_iter(raw)
    .filter_map(|caps| caps.get(1))
    .map(|name| name.as_str())
    .filter(|name| resolve_predefined_entity(name).is_none() && !entities.contains_key(*name))
    .map(|name| (name, name))
    .collect();

  let text = unescape_with(raw, |name| {
    resolve_predefined_entity(name)
      .or_else(|| entities.get(name).map(String::as_str))
      .or_else(|| undeclared.get(name).copied())
  })
  .map_err(|e| MarkupError::Malformed {
    reason: format!("invalid entity reference in {raw:?}: {e}"),
  })?;

  Ok(text.into_owned())
}
