//! Document serialization back to XML text

use indextree::NodeId;

use crate::dom::tree::Document;

impl Document {
    /// Serialize the whole document to an XML string.
    ///
    /// Attributes keep insertion order, childless elements self-close, and
    /// text is entity-escaped. Whitespace-only text nodes from the input are
    /// preserved, so formatting survives a parse/serialize round trip.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root(), &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        if let Some(text) = self.text(node) {
            push_escaped_text(out, text);
            return;
        }
        let Some(name) = self.tag_name(node) else {
            return;
        };

        out.push('<');
        out.push_str(name);
        for (attr, value) in self.attributes(node) {
            out.push(' ');
            out.push_str(attr);
            out.push_str("=\"");
            push_escaped_attr(out, value);
            out.push('"');
        }

        let children: Vec<NodeId> = self.children(node).collect();
        if children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in children {
            self.write_node(child, out);
        }
        out.push_str("</");
        out.push_str(self.tag_name(node).unwrap_or_default());
        out.push('>');
    }
}

fn push_escaped_text(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_escaped_attr(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
