//! Fuel consumption and cost.

use super::{CalcContext, Calculator, ErrorDisplay};
use crate::core::form::FormReader;
use crate::core::format::plain;
use crate::domain::model::{ConsumptionRequest, ConsumptionResponse};
use crate::domain::ports::{FormSource, View};
use crate::domain::view::{FormField, FormSpec};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const ID: &str = "consumo";
pub const ENDPOINT: &str = "/consumo/calculate";

pub const IN_DISTANCE: &str = "cons-distance";
pub const IN_LITERS: &str = "cons-liters";
pub const IN_PRICE: &str = "cons-price";
pub const IN_DRIVING_TYPE: &str = "cons-driving-type";

pub const OUT_KMPL: &str = "cons-kmpl";
pub const OUT_COST_PER_KM: &str = "cons-cost-per-km";
pub const OUT_TOTAL: &str = "cons-total";
pub const OUT_CO2: &str = "cons-co2";
pub const OUT_RATING: &str = "cons-rating";

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsumptionCalculator;

impl ConsumptionCalculator {
    pub fn build_request(form: &dyn FormSource) -> ConsumptionRequest {
        let form = FormReader::new(form);
        ConsumptionRequest {
            distance_km: form.number(IN_DISTANCE),
            liters: form.number(IN_LITERS),
            price_per_liter: form.number(IN_PRICE),
            driving_type: form.text(IN_DRIVING_TYPE),
        }
    }

    pub fn render(data: &ConsumptionResponse, view: &mut dyn View) {
        view.set_text(OUT_KMPL, &format!("{} km/L", plain(data.km_per_liter)));
        view.set_text(OUT_COST_PER_KM, &format!("${} /km", plain(data.cost_per_km)));
        view.set_text(OUT_TOTAL, &format!("${}", plain(data.total_cost)));
        view.set_text(OUT_CO2, &format!("{} kg CO₂", plain(data.co2_kg)));
        view.set_text(
            OUT_RATING,
            &format!(
                "{} (típico {} km/L)",
                data.rating_text,
                plain(data.typical_km_per_liter)
            ),
        );
    }
}

#[async_trait]
impl Calculator for ConsumptionCalculator {
    fn id(&self) -> &'static str {
        ID
    }

    fn title(&self) -> &'static str {
        "Consumo de Combustible"
    }

    fn form(&self) -> FormSpec {
        FormSpec {
            id: "cons-form".to_string(),
            fields: vec![
                FormField::number(IN_DISTANCE, "Distancia recorrida (km)", 0.0, true),
                FormField::number(IN_LITERS, "Litros consumidos", 0.0, true),
                FormField::number(IN_PRICE, "Precio por litro", 0.0, true),
                FormField::select(
                    IN_DRIVING_TYPE,
                    "Tipo de manejo",
                    &[("ciudad", "Ciudad"), ("carretera", "Carretera"), ("mixto", "Mixto")],
                ),
            ],
            submit_label: "Calcular".to_string(),
        }
    }

    fn error_display(&self) -> ErrorDisplay {
        ErrorDisplay::Alert { prefix: "Error: " }
    }

    async fn run(&self, ctx: &CalcContext, form: &dyn FormSource, view: &mut dyn View) -> Result<()> {
        let request = Self::build_request(form);
        let data: ConsumptionResponse = ctx.client.post_json(ENDPOINT, &request).await?;
        Self::render(&data, view);
        Ok(())
    }
}
