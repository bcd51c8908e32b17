//! Owned element tree returned by the markup facade.
//!
//! The tree is deliberately small: tag name, attributes in source order and
//! an ordered list of child nodes. It offers exactly the queries the
//! extraction pipeline needs (`./name` and `//name`).

/// A node inside an element's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  /// Nested element
  Element(Element),
  /// Character data (entities already resolved)
  Text(String),
}

/// An XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  name: String,
  attributes: Vec<(String, String)>,
  children: Vec<Node>,
}

impl Element {
  /// Creates an element without attributes or content.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      attributes: Vec::new(),
      children: Vec::new(),
    }
  }

  /// Builder that adds one attribute
  #[must_use]
  pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.attributes.push((key.into(), value.into()));
    self
  }

  /// Builder that appends a child element
  #[must_use]
  pub fn with_child(mut self, child: Element) -> Self {
    self.children.push(Node::Element(child));
    self
  }

  /// Builder that appends a text node
  #[must_use]
  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.children.push(Node::Text(text.into()));
    self
  }

  pub(crate) fn push(&mut self, node: Node) {
    self.children.push(node);
  }

  /// Tag name, including any namespace prefix
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Value of the attribute `key` (e.g. `"xml:lang"`), if present
  pub fn attribute(&self, key: &str) -> Option<&str> {
    self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
  }

  /// All attributes in source order
  pub fn attributes(&self) -> &[(String, String)] {
    &self.attributes
  }

  /// Ordered child nodes
  pub fn nodes(&self) -> &[Node] {
    &self.children
  }

  /// Ordered child elements
  pub fn children(&self) -> impl Iterator<Item = &Element> {
    self.children.iter().filter_map(|node| match node {
      Node::Element(element) => Some(element),
      Node::Text(_) => None,
    })
  }

  /// Ordered child elements named `name` (the `./name` query)
  pub fn select<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Element> + use<'a, 'n> {
    self.children().filter(move |child| child.name == name)
  }

  /// First child element named `name`
  pub fn child(&self, name: &str) -> Option<&Element> {
    self.select(name).next()
  }

  /// Every descendant element named `name`, in document order (the `//name` query).
  ///
  /// The element itself is included when it matches.
  pub fn descendants<'a>(&'a self, name: &'a str) -> Descendants<'a> {
    Descendants {
      name,
      stack: vec![self],
    }
  }

  /// Concatenated character data of this element and all its descendants
  pub fn text(&self) -> String {
    let mut out = String::new();
    self.collect_text(&mut out);
    out
  }

  fn collect_text(&self, out: &mut String) {
    for node in &self.children {
      match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => element.collect_text(out),
      }
    }
  }
}

/// Depth-first, document-order iterator returned by [`Element::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
  name: &'a str,
  stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
  type Item = &'a Element;

  fn next(&mut self) -> Option<Self::Item> {
    while let Some(element) = self.stack.pop() {
      // Push in reverse so the first child is visited first
      let mut children: Vec<&Element> = element.children().collect();
      children.reverse();
      self.stack.extend(children);

      if element.name == self.name {
        return Some(element);
      }
    }
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Element {
    Element::new("entry")
      .with_child(Element::new("ent_seq").with_text("1000"))
      .with_child(Element::new("k_ele").with_child(Element::new("keb").with_text("明白")))
      .with_child(Element::new("k_ele").with_child(Element::new("keb").with_text("偸閑")))
      .with_child(
        Element::new("sense").with_child(
          Element::new("lsource").with_attribute("xml:lang", "ger").with_text("Arbeit"),
        ),
      )
  }

  #[test]
  fn select_returns_direct_children_in_order() {
    let entry = sample();
    let kebs: Vec<String> = entry.select("k_ele").map(|k| k.text()).collect();
    assert_eq!(kebs, vec!["明白", "偸閑"]);
    assert_eq!(entry.select("keb").count(), 0);
  }

  #[test]
  fn child_outlives_the_queried_name() {
    let entry = sample();
    let ent_seq = {
      let name = String::from("ent_seq");
      entry.child(&name)
    };
    assert_eq!(ent_seq.map(Element::text), Some("1000".to_string()));
  }

  #[test]
  fn descendants_walks_in_document_order() {
    let entry = sample();
    let kebs: Vec<String> = entry.descendants("keb").map(Element::text).collect();
    assert_eq!(kebs, vec!["明白", "偸閑"]);
  }

  #[test]
  fn descendants_includes_self() {
    let entry = sample();
    assert_eq!(entry.descendants("entry").count(), 1);
  }

  #[test]
  fn attribute_lookup() {
    let entry = sample();
    let lsource = entry.descendants("lsource").next().unwrap();
    assert_eq!(lsource.attribute("xml:lang"), Some("ger"));
    assert_eq!(lsource.attribute("ls_type"), None);
  }

  #[test]
  fn text_concatenates_descendants() {
    let gloss = Element::new("gloss")
      .with_text("to ")
      .with_child(Element::new("pri").with_text("eat"));
    assert_eq!(gloss.text(), "to eat");
  }
}
