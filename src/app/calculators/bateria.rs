//! Battery life evaluation.

use super::{render_bullets, CalcContext, Calculator, ErrorDisplay};
use crate::core::form::FormReader;
use crate::core::format::plain;
use crate::domain::model::{BatteryRequest, BatteryResponse};
use crate::domain::ports::{FormSource, View};
use crate::domain::view::{FormField, FormSpec};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const ID: &str = "bateria";
pub const ENDPOINT: &str = "/bateria/evaluate";

pub const IN_INSTALL: &str = "bat-install";
pub const IN_TYPE: &str = "bat-type";
pub const IN_USAGE: &str = "bat-usage";
pub const IN_CLIMATE: &str = "bat-climate";

pub const OUT_PERCENT: &str = "bat-percent";
pub const OUT_MONTHS_LEFT: &str = "bat-months-left";
pub const OUT_STATUS: &str = "bat-status";
pub const OUT_RECOMMENDATIONS: &str = "bat-reco";

#[derive(Debug, Default, Clone, Copy)]
pub struct BatteryCalculator;

impl BatteryCalculator {
    pub fn build_request(form: &dyn FormSource) -> BatteryRequest {
        let form = FormReader::new(form);
        BatteryRequest {
            install_date: form.text(IN_INSTALL),
            battery_type: form.text(IN_TYPE),
            usage: form.text(IN_USAGE),
            climate: form.text(IN_CLIMATE),
        }
    }

    pub fn render(data: &BatteryResponse, view: &mut dyn View) {
        view.set_text(OUT_PERCENT, &format!("{}%", plain(data.percent_remaining)));
        view.set_text(OUT_MONTHS_LEFT, &format!("{} meses", plain(data.months_left)));
        view.set_text(
            OUT_STATUS,
            &format!(
                "Estado: {}. Vida base: {} meses, Ajustada: {} meses.",
                data.status,
                plain(data.base_months),
                plain(data.adjusted_total_months)
            ),
        );
        render_bullets(view, OUT_RECOMMENDATIONS, &data.recommendations);
    }
}

#[async_trait]
impl Calculator for BatteryCalculator {
    fn id(&self) -> &'static str {
        ID
    }

    fn title(&self) -> &'static str {
        "Salud de Batería"
    }

    fn form(&self) -> FormSpec {
        FormSpec {
            id: "bat-form".to_string(),
            fields: vec![
                FormField::date(IN_INSTALL, "Fecha de instalación"),
                FormField::select(
                    IN_TYPE,
                    "Tipo de batería",
                    &[
                        ("convencional", "Convencional"),
                        ("agm", "AGM"),
                        ("gel", "Gel"),
                        ("litio", "Litio"),
                    ],
                ),
                FormField::select(
                    IN_USAGE,
                    "Uso",
                    &[
                        ("diario", "Diario"),
                        ("ocasional", "Ocasional"),
                        ("esporadico", "Esporádico"),
                    ],
                ),
                FormField::select(
                    IN_CLIMATE,
                    "Clima",
                    &[
                        ("templado", "Templado"),
                        ("calido", "Cálido"),
                        ("frio", "Frío"),
                        ("extremo", "Extremo"),
                    ],
                ),
            ],
            submit_label: "Evaluar".to_string(),
        }
    }

    fn error_display(&self) -> ErrorDisplay {
        ErrorDisplay::Alert { prefix: "Error: " }
    }

    async fn run(&self, ctx: &CalcContext, form: &dyn FormSource, view: &mut dyn View) -> Result<()> {
        let request = Self::build_request(form);
        let data: BatteryResponse = ctx.client.post_json(ENDPOINT, &request).await?;
        Self::render(&data, view);
        Ok(())
    }
}
