use crate::app::calculators::{MODAL, MODAL_CONTENT, MODAL_TITLE};
use crate::domain::ports::View;
use crate::domain::view::{FieldKind, Node};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub text: String,
    pub children: Vec<Node>,
    pub hidden: bool,
    pub attrs: BTreeMap<String, String>,
}

/// In-memory page. Elements are created on first write and kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryView {
    order: Vec<String>,
    elements: HashMap<String, Element>,
    /// child element id -> parent id, for ids introduced by appended nodes
    owners: HashMap<String, String>,
    alerts: Vec<String>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page skeleton: card grid plus the shared calculator modal (hidden).
    pub fn page() -> Self {
        let mut view = Self::with_elements(&["cardsContainer", MODAL, MODAL_TITLE, MODAL_CONTENT]);
        view.set_hidden(MODAL, true);
        view
    }

    pub fn with_elements(ids: &[&str]) -> Self {
        let mut view = Self::new();
        for id in ids {
            view.entry(id);
        }
        view
    }

    fn entry(&mut self, id: &str) -> &mut Element {
        if !self.elements.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.elements.entry(id.to_string()).or_default()
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    fn remove_owned_by(&mut self, parent: &str) {
        let owned: Vec<String> = self
            .owners
            .iter()
            .filter(|(_, owner)| owner.as_str() == parent)
            .map(|(child, _)| child.clone())
            .collect();
        for child in owned {
            self.remove(&child);
        }
    }

    /// Plain-text dump of visible, non-empty elements followed by alerts.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for id in &self.order {
            let Some(el) = self.elements.get(id) else { continue };
            if el.hidden || (el.text.is_empty() && el.children.is_empty() && el.attrs.is_empty()) {
                continue;
            }
            let _ = writeln!(out, "[{}] {}", id, el.text);
            for (name, value) in &el.attrs {
                let _ = writeln!(out, "  @{}={}", name, value);
            }
            for child in &el.children {
                render_node(&mut out, child);
            }
        }
        for alert in &self.alerts {
            let _ = writeln!(out, "! {}", alert);
        }
        out
    }
}

fn render_node(out: &mut String, node: &Node) {
    let _ = match node {
        Node::Text(text) | Node::ListItem(text) => writeln!(out, "  {}", text),
        Node::Link { url, text } => writeln!(out, "  {} <{}>", text, url),
        Node::Block { title, body } => writeln!(out, "  {}\n    {}", title, body),
        Node::Card {
            badge,
            title,
            subtitle,
            opens,
            ..
        } => writeln!(out, "  [{}] {}: {} (abre '{}')", badge, title, subtitle, opens),
        Node::Form(spec) => {
            for field in &spec.fields {
                let hint = match &field.kind {
                    FieldKind::Number { required: true, .. } => "número".to_string(),
                    FieldKind::Number { .. } => "número, opcional".to_string(),
                    FieldKind::Date => "fecha AAAA-MM-DD".to_string(),
                    FieldKind::Text => "texto".to_string(),
                    FieldKind::Select { options } => options
                        .iter()
                        .map(|(value, _)| if value.is_empty() { "\"\"" } else { value.as_str() })
                        .collect::<Vec<_>>()
                        .join("|"),
                };
                let _ = writeln!(out, "  {} ({}): {}", field.label, field.id, hint);
            }
            writeln!(out, "  -> {}", spec.submit_label)
        }
    };
}

impl View for MemoryView {
    fn set_text(&mut self, id: &str, text: &str) {
        self.entry(id).text = text.to_string();
    }

    fn text(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|el| el.text.clone())
    }

    fn clear(&mut self, id: &str) {
        self.entry(id).children.clear();
        self.remove_owned_by(id);
    }

    fn append(&mut self, id: &str, node: Node) {
        let child_id = node.id().map(str::to_string);
        self.entry(id).children.push(node);
        if let Some(child_id) = child_id {
            self.entry(&child_id);
            self.owners.insert(child_id, id.to_string());
        }
    }

    fn children(&self, id: &str) -> Vec<Node> {
        self.elements
            .get(id)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    fn set_hidden(&mut self, id: &str, hidden: bool) {
        self.entry(id).hidden = hidden;
    }

    fn is_hidden(&self, id: &str) -> bool {
        self.elements.get(id).map(|el| el.hidden).unwrap_or(false)
    }

    fn set_attr(&mut self, id: &str, name: &str, value: &str) {
        self.entry(id).attrs.insert(name.to_string(), value.to_string());
    }

    fn attr(&self, id: &str, name: &str) -> Option<String> {
        self.elements.get(id).and_then(|el| el.attrs.get(name).cloned())
    }

    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn remove(&mut self, id: &str) {
        if self.elements.remove(id).is_some() {
            self.order.retain(|existing| existing != id);
            self.owners.remove(id);
            self.remove_owned_by(id);
        }
    }

    fn alert(&mut self, message: &str) {
        tracing::debug!("alert: {}", message);
        self.alerts.push(message.to_string());
    }
}
