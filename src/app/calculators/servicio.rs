//! Next-service estimate.

use super::{CalcContext, Calculator, ErrorDisplay};
use crate::core::form::FormReader;
use crate::core::format::NumberFormat;
use crate::domain::model::{ServiceRequest, ServiceResponse};
use crate::domain::ports::{FormSource, View};
use crate::domain::view::{FormField, FormSpec};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const ID: &str = "servicio";
pub const ENDPOINT: &str = "/servicio/calculate";

pub const IN_CURRENT_KM: &str = "svc-current-km";
pub const IN_LAST_SERVICE_KM: &str = "svc-last-service-km";
pub const IN_INTERVAL_KM: &str = "svc-interval-km";
pub const IN_AVG_KM_MONTH: &str = "svc-avg-km-month";

pub const OUT_KM_REMAINING: &str = "svc-km-remaining";
pub const OUT_DAYS_REMAINING: &str = "svc-days-remaining";
pub const OUT_DATE_ESTIMATED: &str = "svc-date-estimated";
pub const OUT_MESSAGE: &str = "svc-message";
pub const OUT_WARNINGS: &str = "svc-warnings";

#[derive(Debug, Default, Clone, Copy)]
pub struct ServiceCalculator;

impl ServiceCalculator {
    pub fn build_request(form: &dyn FormSource) -> ServiceRequest {
        let form = FormReader::new(form);
        ServiceRequest {
            current_km: form.number(IN_CURRENT_KM),
            last_service_km: form.number(IN_LAST_SERVICE_KM),
            service_interval_km: form.number(IN_INTERVAL_KM),
            avg_km_per_month: form.number(IN_AVG_KM_MONTH),
        }
    }

    pub fn render(data: &ServiceResponse, fmt: &NumberFormat, view: &mut dyn View) {
        let km_text = format!("{} km", fmt.grouped(data.km_remaining));
        let km_text = if data.is_overdue {
            format!("Atrasado por {}", km_text)
        } else {
            km_text
        };
        view.set_text(OUT_KM_REMAINING, &km_text);

        let days = match data.days_to_service {
            Some(days) => format!("{} días", days),
            None => "-- días".to_string(),
        };
        view.set_text(OUT_DAYS_REMAINING, &days);

        let date = match data.estimated_date.as_deref() {
            Some(date) if !date.is_empty() => format!("Fecha estimada: {}", date),
            _ => String::new(),
        };
        view.set_text(OUT_DATE_ESTIMATED, &date);
        view.set_text(OUT_MESSAGE, &data.message);
        view.set_text(OUT_WARNINGS, "");
    }
}

#[async_trait]
impl Calculator for ServiceCalculator {
    fn id(&self) -> &'static str {
        ID
    }

    fn title(&self) -> &'static str {
        "Próximo Servicio"
    }

    fn form(&self) -> FormSpec {
        FormSpec {
            id: "svc-form".to_string(),
            fields: vec![
                FormField::number(IN_CURRENT_KM, "Kilometraje actual", 0.0, true),
                FormField::number(IN_LAST_SERVICE_KM, "Km último servicio", 0.0, true),
                FormField::number(IN_INTERVAL_KM, "Intervalo de servicio (km)", 1.0, true),
                FormField::number(IN_AVG_KM_MONTH, "Promedio km por mes", 0.0, false),
            ],
            submit_label: "Calcular".to_string(),
        }
    }

    fn error_display(&self) -> ErrorDisplay {
        ErrorDisplay::Inline {
            element: OUT_WARNINGS,
            prefix: "⚠️ ",
        }
    }

    async fn run(&self, ctx: &CalcContext, form: &dyn FormSource, view: &mut dyn View) -> Result<()> {
        let request = Self::build_request(form);
        let data: ServiceResponse = ctx.client.post_json(ENDPOINT, &request).await?;
        Self::render(&data, &ctx.format, view);
        Ok(())
    }
}
