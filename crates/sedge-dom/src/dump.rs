//! Textual and structured views of a [`DomTree`].

use std::fmt::Write;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{Attribute, DomTree, Namespace, NodeId, NodeType};

impl DomTree {
    /// Dump the document in the html5lib tree-construction test format.
    ///
    /// ```text
    /// | <html>
    /// |   <head>
    /// |   <body>
    /// |     <p>
    /// |       class="x"
    /// |       "Hello"
    /// ```
    #[must_use]
    pub fn dump(&self) -> String {
        self.dump_children(NodeId::ROOT)
    }

    /// Dump the children of `id` in the html5lib format, at depth zero.
    #[must_use]
    pub fn dump_children(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.dump_node(child, 0, &mut out);
        }
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        match &node.node_type {
            NodeType::Document | NodeType::DocumentFragment => {}
            NodeType::Doctype {
                name,
                public_id,
                system_id,
            } => {
                if public_id.is_empty() && system_id.is_empty() {
                    let _ = writeln!(out, "| {indent}<!DOCTYPE {name}>");
                } else {
                    let _ = writeln!(
                        out,
                        "| {indent}<!DOCTYPE {name} \"{public_id}\" \"{system_id}\">"
                    );
                }
            }
            NodeType::Text(text) => {
                let _ = writeln!(out, "| {indent}\"{text}\"");
            }
            NodeType::Comment(text) => {
                let _ = writeln!(out, "| {indent}<!-- {text} -->");
            }
            NodeType::Element(data) => {
                match data.namespace {
                    Namespace::Html => {
                        let _ = writeln!(out, "| {indent}<{}>", data.tag_name);
                    }
                    ns => {
                        let _ = writeln!(out, "| {indent}<{ns} {}>", data.tag_name);
                    }
                }

                let mut attrs: Vec<(String, &str)> = data
                    .attrs
                    .iter()
                    .map(|a| (display_attribute_name(data.namespace, a), a.value.as_str()))
                    .collect();
                attrs.sort();
                for (name, value) in attrs {
                    let _ = writeln!(out, "| {indent}  {name}=\"{value}\"");
                }

                if let Some(contents) = data.template_contents {
                    let _ = writeln!(out, "| {indent}  content");
                    for &child in self.children(contents) {
                        self.dump_node(child, depth + 2, out);
                    }
                }
            }
        }
        for &child in &node.children {
            self.dump_node(child, depth + 1, out);
        }
    }

    /// A serializable view of the subtree rooted at `id`.
    #[must_use]
    pub const fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }
}

/// Adjusted foreign attributes are shown as `prefix localname`.
fn display_attribute_name(namespace: Namespace, attr: &Attribute) -> String {
    match attr.foreign_parts() {
        Some((prefix, local)) if namespace != Namespace::Html && !prefix.is_empty() => {
            format!("{prefix} {local}")
        }
        _ => attr.name.clone(),
    }
}

/// A borrowed node that serializes as a nested JSON-style object.
pub struct NodeRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(node) = self.tree.get(self.id) else {
            return serializer.serialize_none();
        };
        let mut map = serializer.serialize_map(None)?;
        match &node.node_type {
            NodeType::Document => {
                map.serialize_entry("type", "document")?;
                map.serialize_entry("mode", &self.tree.quirks_mode())?;
            }
            NodeType::DocumentFragment => map.serialize_entry("type", "fragment")?,
            NodeType::Doctype {
                name,
                public_id,
                system_id,
            } => {
                map.serialize_entry("type", "doctype")?;
                map.serialize_entry("name", name)?;
                map.serialize_entry("publicId", public_id)?;
                map.serialize_entry("systemId", system_id)?;
            }
            NodeType::Element(data) => {
                map.serialize_entry("type", "element")?;
                map.serialize_entry("tagName", &data.tag_name)?;
                map.serialize_entry("namespace", &data.namespace)?;
                map.serialize_entry("attributes", &data.attrs)?;
                if let Some(contents) = data.template_contents {
                    map.serialize_entry("content", &self.tree.node_ref(contents))?;
                }
            }
            NodeType::Text(text) => {
                map.serialize_entry("type", "text")?;
                map.serialize_entry("content", text)?;
            }
            NodeType::Comment(text) => {
                map.serialize_entry("type", "comment")?;
                map.serialize_entry("content", text)?;
            }
        }
        if !node.children.is_empty() {
            let children: Vec<NodeRef<'_>> = node
                .children
                .iter()
                .map(|&child| self.tree.node_ref(child))
                .collect();
            map.serialize_entry("children", &children)?;
        }
        map.end()
    }
}
