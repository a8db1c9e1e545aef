//! Maintenance tips by category.

use super::{CalcContext, Calculator, ErrorDisplay};
use crate::domain::model::TipsResponse;
use crate::domain::ports::{FormSource, View};
use crate::domain::view::{FormField, FormSpec, Node};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const ID: &str = "tips";
pub const IN_CATEGORY: &str = "tips-category";
pub const OUT_CONTENT: &str = "tipsContent";

pub const CATEGORIES: &[(&str, &str)] = &[
    ("mantenimiento", "Mantenimiento"),
    ("conduccion", "Conducción"),
    ("seguridad", "Seguridad"),
    ("emergencia", "Emergencia"),
];

pub fn endpoint(category: &str) -> String {
    format!("/tips/{}", category.trim())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TipsLoader;

impl TipsLoader {
    pub fn render(data: &TipsResponse, view: &mut dyn View) {
        view.clear(OUT_CONTENT);
        for item in &data.items {
            view.append(
                OUT_CONTENT,
                Node::Block {
                    title: format!("• {}", item.title),
                    body: item.body.clone(),
                },
            );
        }
    }

    /// Loads and renders one category. Failures are only logged.
    pub async fn show(&self, ctx: &CalcContext, category: &str, view: &mut dyn View) -> bool {
        let form = std::collections::HashMap::from([(IN_CATEGORY.to_string(), category.to_string())]);
        self.submit(ctx, &form, view).await.is_ok()
    }
}

#[async_trait]
impl Calculator for TipsLoader {
    fn id(&self) -> &'static str {
        ID
    }

    fn title(&self) -> &'static str {
        "Consejos"
    }

    fn form(&self) -> FormSpec {
        FormSpec {
            id: "tips-form".to_string(),
            fields: vec![FormField::select(IN_CATEGORY, "Categoría", CATEGORIES)],
            submit_label: "Ver consejos".to_string(),
        }
    }

    fn error_display(&self) -> ErrorDisplay {
        ErrorDisplay::LogOnly
    }

    async fn run(&self, ctx: &CalcContext, form: &dyn FormSource, view: &mut dyn View) -> Result<()> {
        let category = form.value(IN_CATEGORY);
        let data: TipsResponse = ctx.client.get_json(&endpoint(&category)).await?;
        tracing::debug!("Loaded {} tips for '{}'", data.items.len(), category);
        Self::render(&data, view);
        Ok(())
    }
}
