use serde::ser::{Serialize, SerializeMap, Serializer};

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
///
/// An attribute on a start tag token or an element. The name is the
/// qualified name as it appears in markup after any foreign-content
/// adjustment (`xlink:href`, `viewBox`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

/// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// Attributes of foreign elements that live in another namespace, as
/// `(qualified name, prefix, local name)`. The qualified name is kept as the
/// attribute name.
const FOREIGN_ATTRIBUTES: &[(&str, &str, &str)] = &[
    ("xlink:actuate", "xlink", "actuate"),
    ("xlink:arcrole", "xlink", "arcrole"),
    ("xlink:href", "xlink", "href"),
    ("xlink:role", "xlink", "role"),
    ("xlink:show", "xlink", "show"),
    ("xlink:title", "xlink", "title"),
    ("xlink:type", "xlink", "type"),
    ("xml:lang", "xml", "lang"),
    ("xml:space", "xml", "space"),
    ("xmlns", "", "xmlns"),
    ("xmlns:xlink", "xmlns", "xlink"),
];

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }

    /// `(prefix, local name)` if this attribute, on an SVG or MathML
    /// element, belongs to the XLink, XML or XMLNS namespace.
    #[must_use]
    pub fn foreign_parts(&self) -> Option<(&'static str, &'static str)> {
        FOREIGN_ATTRIBUTES
            .iter()
            .find(|(qualified, _, _)| *qualified == self.name)
            .map(|&(_, prefix, local)| (prefix, local))
    }
}

/// An ordered attribute list with unique names.
///
/// Insertion order is preserved, and the first attribute with a given name
/// wins: later duplicates are rejected by [`Attributes::push`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    /// An empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an attribute unless one with the same name exists.
    /// Returns `false` if the attribute was a duplicate and was dropped.
    pub fn push(&mut self, attr: Attribute) -> bool {
        if self.contains(&attr.name) {
            return false;
        }
        self.0.push(attr);
        true
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// True if an attribute with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|a| a.name == name)
    }

    /// Copy every attribute of `other` whose name is not present yet.
    /// Returns the number of attributes added.
    pub fn merge_missing(&mut self, other: &Self) -> usize {
        let before = self.0.len();
        for attr in other.iter() {
            let _ = self.push(attr.clone());
        }
        self.0.len() - before
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    /// Mutable iteration, used for foreign attribute name adjustment.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Attribute> {
        self.0.iter_mut()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for attr in iter {
            let _ = attrs.push(attr);
        }
        attrs
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, value)| Attribute::new(name.into(), value.into()))
            .collect()
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for attr in &self.0 {
            map.serialize_entry(&attr.name, &attr.value)?;
        }
        map.end()
    }
}
