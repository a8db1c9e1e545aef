//! Auto-parts search links.

use super::{CalcContext, Calculator, ErrorDisplay};
use crate::core::form::FormReader;
use crate::domain::model::{PartsSearchRequest, PartsSearchResponse};
use crate::domain::ports::{FormSource, View};
use crate::domain::view::{FormField, FormSpec, Node};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const ID: &str = "autopartes";
pub const ENDPOINT: &str = "/autopartes/search";

pub const IN_BRAND: &str = "parts-brand";
pub const IN_MODEL: &str = "parts-model";
pub const IN_YEAR: &str = "parts-year";
pub const IN_TYPE: &str = "parts-type";

pub const OUT_RESULTS: &str = "partsResults";

#[derive(Debug, Default, Clone, Copy)]
pub struct PartsSearch;

impl PartsSearch {
    pub fn build_request(form: &dyn FormSource) -> PartsSearchRequest {
        let form = FormReader::new(form);
        PartsSearchRequest {
            brand: form.text(IN_BRAND),
            model: form.text(IN_MODEL),
            year: form.optional_int(IN_YEAR),
            part_type: form.text(IN_TYPE),
        }
    }

    pub fn render(data: &PartsSearchResponse, view: &mut dyn View) {
        let query = data
            .query
            .as_deref()
            .filter(|q| !q.is_empty())
            .unwrap_or("(genérica)");

        view.clear(OUT_RESULTS);
        view.append(OUT_RESULTS, Node::Text(format!("Consulta generada: {}", query)));
        for link in &data.links {
            view.append(
                OUT_RESULTS,
                Node::Link {
                    url: link.url.clone(),
                    text: format!("🔎 {}", link.site),
                },
            );
        }
    }
}

#[async_trait]
impl Calculator for PartsSearch {
    fn id(&self) -> &'static str {
        ID
    }

    fn title(&self) -> &'static str {
        "Buscar Autopartes"
    }

    fn form(&self) -> FormSpec {
        FormSpec {
            id: "parts-form".to_string(),
            fields: vec![
                FormField::text(IN_BRAND, "Marca"),
                FormField::text(IN_MODEL, "Modelo"),
                FormField::number(IN_YEAR, "Año", 1950.0, false),
                FormField::text(IN_TYPE, "Autoparte"),
            ],
            submit_label: "Buscar".to_string(),
        }
    }

    fn error_display(&self) -> ErrorDisplay {
        ErrorDisplay::Alert { prefix: "Error: " }
    }

    async fn run(&self, ctx: &CalcContext, form: &dyn FormSource, view: &mut dyn View) -> Result<()> {
        let request = Self::build_request(form);
        let data: PartsSearchResponse = ctx.client.post_json(ENDPOINT, &request).await?;
        Self::render(&data, view);
        Ok(())
    }
}
