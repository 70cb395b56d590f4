//! Renderers turn a layout tree into bytes

use super::layout::LayoutNode;
use super::InvoiceError;

pub trait InvoiceRenderer {
    /// File extension for rendered output, without the dot
    fn extension(&self) -> &'static str;

    fn render(&self, layout: &LayoutNode) -> Result<Vec<u8>, InvoiceError>;
}

/// Serializes the layout tree as JSON for an external document renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLayoutRenderer {
    pub pretty: bool,
}

impl JsonLayoutRenderer {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl InvoiceRenderer for JsonLayoutRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, layout: &LayoutNode) -> Result<Vec<u8>, InvoiceError> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(layout)?
        } else {
            serde_json::to_vec(layout)?
        };
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::layout::TextStyle;

    #[test]
    fn json_is_tagged_by_node_type() {
        let layout = LayoutNode::Page {
            children: vec![
                LayoutNode::text("Hello", TextStyle::Title),
                LayoutNode::Spacer { height: 1 },
            ],
        };
        let bytes = JsonLayoutRenderer::default().render(&layout).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["type"], "page");
        assert_eq!(json["children"][0]["type"], "text");
        assert_eq!(json["children"][0]["style"], "title");
        assert_eq!(json["children"][0]["align"], "left");
        assert_eq!(json["children"][1]["height"], 1);
    }
}
