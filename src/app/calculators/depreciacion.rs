//! Vehicle depreciation estimate.

use super::{render_bullets, CalcContext, Calculator, ErrorDisplay};
use crate::core::form::FormReader;
use crate::core::format::{plain, NumberFormat};
use crate::domain::model::{DepreciationRequest, DepreciationResponse};
use crate::domain::ports::{FormSource, View};
use crate::domain::view::{FormField, FormSpec};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const ID: &str = "depreciacion";
pub const ENDPOINT: &str = "/depreciacion/calculate";

pub const IN_PRICE: &str = "dep-price";
pub const IN_YEAR: &str = "dep-year";
pub const IN_KM: &str = "dep-km";
pub const IN_CONDITION: &str = "dep-condition";
pub const IN_BRAND: &str = "dep-brand";

pub const OUT_VALUE: &str = "dep-value";
pub const OUT_PERCENT: &str = "dep-percent";
pub const OUT_ANNUAL: &str = "dep-annual";
pub const OUT_BREAKDOWN: &str = "dep-breakdown";

#[derive(Debug, Default, Clone, Copy)]
pub struct DepreciationCalculator;

impl DepreciationCalculator {
    pub fn build_request(form: &dyn FormSource) -> DepreciationRequest {
        let form = FormReader::new(form);
        DepreciationRequest {
            purchase_price: form.number(IN_PRICE),
            purchase_year: form.int(IN_YEAR),
            current_km: form.number(IN_KM),
            condition: form.text(IN_CONDITION),
            brand_class: form.text(IN_BRAND),
        }
    }

    pub fn render(data: &DepreciationResponse, fmt: &NumberFormat, view: &mut dyn View) {
        view.set_text(OUT_VALUE, &format!("${}", fmt.grouped(data.estimated_value)));
        view.set_text(OUT_PERCENT, &format!("{}%", plain(data.depreciation_percent)));
        view.set_text(OUT_ANNUAL, &format!("${} /año", fmt.grouped(data.annual_loss_avg)));

        let bd = &data.breakdown;
        render_bullets(
            view,
            OUT_BREAKDOWN,
            [
                format!("Edad (años): {}", plain(bd.age_years)),
                format!("Factor residual base: {}", plain(bd.base_residual_factor)),
                format!("Marca (factor): {}", plain(bd.brand_factor)),
                format!("Condición (factor): {}", plain(bd.condition_factor)),
                format!("Kilometraje (factor): {}", plain(bd.mileage_factor)),
                format!("Factor residual final: {}", plain(bd.final_residual_factor)),
            ],
        );
    }
}

#[async_trait]
impl Calculator for DepreciationCalculator {
    fn id(&self) -> &'static str {
        ID
    }

    fn title(&self) -> &'static str {
        "Depreciación del Vehículo"
    }

    fn form(&self) -> FormSpec {
        FormSpec {
            id: "dep-form".to_string(),
            fields: vec![
                FormField::number(IN_PRICE, "Precio de compra", 0.0, true),
                FormField::number(IN_YEAR, "Año de compra", 1980.0, true),
                FormField::number(IN_KM, "Kilometraje actual", 0.0, true),
                FormField::select(
                    IN_CONDITION,
                    "Condición",
                    &[
                        ("excelente", "Excelente"),
                        ("bueno", "Bueno"),
                        ("regular", "Regular"),
                        ("malo", "Malo"),
                    ],
                ),
                FormField::select(
                    IN_BRAND,
                    "Tipo de marca",
                    &[
                        ("premium", "Premium"),
                        ("japonesa", "Japonesa"),
                        ("americana", "Americana"),
                        ("europea", "Europea"),
                        ("coreana", "Coreana"),
                    ],
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
        let data: DepreciationResponse = ctx.client.post_json(ENDPOINT, &request).await?;
        Self::render(&data, &ctx.format, view);
        Ok(())
    }
}
