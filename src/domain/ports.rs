use crate::domain::view::Node;
use crate::utils::error::Result;
use std::collections::{BTreeMap, HashMap};

/// Presentation surface addressed by element id.
pub trait View: Send {
    fn set_text(&mut self, id: &str, text: &str);
    fn text(&self, id: &str) -> Option<String>;
    /// Removes every child of `id`.
    fn clear(&mut self, id: &str);
    fn append(&mut self, id: &str, node: Node);
    fn children(&self, id: &str) -> Vec<Node>;
    fn set_hidden(&mut self, id: &str, hidden: bool);
    fn is_hidden(&self, id: &str) -> bool;
    fn set_attr(&mut self, id: &str, name: &str, value: &str);
    fn attr(&self, id: &str, name: &str) -> Option<String>;
    fn contains(&self, id: &str) -> bool;
    fn remove(&mut self, id: &str);
    /// Blocking user notification.
    fn alert(&mut self, message: &str);
}

/// Raw form input, keyed by input id. Missing inputs read as empty.
pub trait FormSource: Sync {
    fn value(&self, id: &str) -> String;
}

impl FormSource for HashMap<String, String> {
    fn value(&self, id: &str) -> String {
        self.get(id).cloned().unwrap_or_default()
    }
}

impl FormSource for BTreeMap<String, String> {
    fn value(&self, id: &str) -> String {
        self.get(id).cloned().unwrap_or_default()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn timezone(&self) -> Option<&str>;
    fn reminder_minutes(&self) -> Option<i64>;
    fn thousands_separator(&self) -> &str;
    fn decimal_separator(&self) -> &str;
    fn output_path(&self) -> &str;
}

/// Destination for exported files, addressed by relative path.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
