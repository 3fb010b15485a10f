//! Serialization of a [`Document`] back to HTML

use super::parse::VOID_ELEMENTS;
use super::{Document, NodeId, NodeKind};
use quick_xml::escape::{escape, partial_escape};

impl Document {
    /// Render the whole document as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = self.doctype() {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype);
            out.push('>');
        }
        for child in self.children(self.root()) {
            self.write_node(*child, &mut out);
        }
        out
    }

    /// Render the children of a node
    #[cfg(test)]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Document => {
                for child in self.children(id) {
                    self.write_node(*child, out);
                }
            }
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape(value.as_str()));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }

                for child in self.children(id) {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
            NodeKind::Text(text) => out.push_str(&partial_escape(text.as_str())),
            NodeKind::RawText(text) => out.push_str(text),
            NodeKind::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }
}
