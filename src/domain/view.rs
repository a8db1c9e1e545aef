//! View-model nodes: what a calculator renders, independent of how it is displayed.

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Number { min: Option<f64>, required: bool },
    Select { options: Vec<(String, String)> },
    Date,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FormField {
    pub fn number(id: &str, label: &str, min: f64, required: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Number {
                min: Some(min),
                required,
            },
        }
    }

    pub fn select(id: &str, label: &str, options: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Select {
                options: options
                    .iter()
                    .map(|(value, text)| (value.to_string(), text.to_string()))
                    .collect(),
            },
        }
    }

    pub fn date(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Date,
        }
    }

    pub fn text(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormSpec {
    pub id: String,
    pub fields: Vec<FormField>,
    pub submit_label: String,
}

impl FormSpec {
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    ListItem(String),
    Link { url: String, text: String },
    Block { title: String, body: String },
    Card {
        id: String,
        badge: String,
        title: String,
        subtitle: String,
        opens: String,
    },
    Form(FormSpec),
}

impl Node {
    /// Nodes that carry their own element id become addressable once appended.
    pub fn id(&self) -> Option<&str> {
        match self {
            Node::Card { id, .. } => Some(id),
            Node::Form(spec) => Some(&spec.id),
            _ => None,
        }
    }
}
