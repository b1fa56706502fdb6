//! HTML serialization

use crate::{DomTree, NodeData, NodeId};

impl DomTree {
    /// Serialize a node and its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize a node's children
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for (child, _) in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Document => {
                for (child, _) in self.children(id) {
                    self.write_node(child, out);
                }
            }
            NodeData::Text(t) => escape_into(&t.content, false, out),
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.name);
                for attr in &el.attrs {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    escape_into(&attr.value, true, out);
                    out.push('"');
                }
                out.push('>');
                if is_void(&el.name) {
                    return;
                }
                for (child, _) in self.children(id) {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&el.name);
                out.push('>');
            }
        }
    }
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "source"
            | "wbr"
    )
}

fn escape_into(s: &str, attr: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' if !attr => out.push_str("&lt;"),
            '>' if !attr => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested() {
        let mut tree = DomTree::new();
        let h1 = tree.create_element("h1");
        let text = tree.create_text("Hi");
        tree.append_child(tree.root(), h1).unwrap();
        tree.append_child(h1, text).unwrap();
        tree.set_attribute(h1, "title", "t".into()).unwrap();

        assert_eq!(tree.outer_html(h1), r#"<h1 title="t">Hi</h1>"#);
        assert_eq!(tree.inner_html(h1), "Hi");
        assert_eq!(tree.outer_html(tree.root()), r#"<h1 title="t">Hi</h1>"#);
    }

    #[test]
    fn test_void_and_escaping() {
        let mut tree = DomTree::new();
        let form = tree.create_element("form");
        let input = tree.create_element("input");
        let note = tree.create_text("a < b & c");
        tree.append_child(form, input).unwrap();
        tree.append_child(form, note).unwrap();
        tree.set_attribute(input, "value", "say \"hi\"".into()).unwrap();

        assert_eq!(
            tree.outer_html(form),
            r#"<form><input value="say &quot;hi&quot;">a &lt; b &amp; c</form>"#
        );
    }
}
