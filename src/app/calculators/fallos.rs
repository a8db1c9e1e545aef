//! Failure projection: risk curve for a part if its service is skipped.
//!
//! Contributes its own card and registry entry, renders a chart plus a 1/3/6
//! month risk summary, and can schedule a reminder for the projected service.

use super::{render_modal, CalcContext, Calculator, ErrorDisplay};
use crate::core::calendar::{self, CalendarRequest};
use crate::core::client::ApiClient;
use crate::core::form::FormReader;
use crate::core::format::plain;
use crate::core::registry::CalculatorRegistry;
use crate::domain::model::{CalendarResponse, FailureProjectionRequest, FailureProjectionResponse};
use crate::domain::ports::{FormSource, Storage, View};
use crate::domain::view::{FormField, FormSpec, Node};
use crate::utils::error::{CalcError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

pub const ID: &str = "fallos";
pub const ENDPOINT: &str = "/fallos/proyeccion";
pub const TITLE: &str = "Proyección de Fallos";

pub const CARD_ID: &str = "card-fallos";
pub const CARD_CONTAINERS: &[&str] = &["cardsContainer", "calc-grid"];
pub const FALLBACK_CONTAINER: &str = "body";

pub const FORM_ID: &str = "fallos-form";
pub const IN_PART: &str = "fallos-part";
pub const IN_CLIMA: &str = "fallos-clima";
pub const IN_CURRENT_KM: &str = "fallos-current-km";
pub const IN_LAST_KM: &str = "fallos-last-km";
pub const IN_INTERVAL_KM: &str = "fallos-interval-km";
pub const IN_MONTHS: &str = "fallos-months";
pub const IN_INTERVAL_MONTHS: &str = "fallos-interval-months";
pub const IN_HORIZON_KM: &str = "fallos-horizon-km";
pub const IN_POINTS: &str = "fallos-points";

pub const OUT_RESULT: &str = "fallos-result";
pub const OUT_IMAGE: &str = "fallos-img";
pub const OUT_SUMMARY: &str = "fallos-resumen";
pub const BTN_CALENDAR: &str = "fallos-agendar";

pub const DEFAULT_SUMMARY: &str = "Servicio automotriz";

pub const PARTS: &[(&str, &str)] = &[
    ("aceite", "Aceite del motor"),
    ("frenos", "Pastillas de freno"),
    ("correa", "Correa de distribución"),
    ("bateria", "Batería"),
    ("neumaticos", "Neumáticos"),
    ("filtro_aire", "Filtro de aire"),
    ("refrigerante_mangueras", "Refrigerante / mangueras"),
];

/// Adds the failure-projection card unless the page already has it.
pub fn ensure_card(view: &mut dyn View) -> bool {
    if view.contains(CARD_ID) {
        return false;
    }
    let container = CARD_CONTAINERS
        .iter()
        .copied()
        .find(|id| view.contains(id))
        .unwrap_or(FALLBACK_CONTAINER);

    view.append(
        container,
        Node::Card {
            id: CARD_ID.to_string(),
            badge: "SALUD".to_string(),
            title: TITLE.to_string(),
            subtitle: "Riesgo de falla si NO haces el servicio".to_string(),
            opens: ID.to_string(),
        },
    );
    true
}

/// Registers the calculator (replacing any earlier `fallos` entry) and injects its card.
pub fn register(registry: &mut CalculatorRegistry, view: &mut dyn View) -> Arc<FailureProjection> {
    let calculator = Arc::new(FailureProjection::default());
    registry.register(calculator.clone());
    ensure_card(view);
    calculator
}

pub fn risk_summary(data: &FailureProjectionResponse) -> String {
    let risks = match &data.temporal {
        Some(t) => format!(
            "{}% / {}% / {}%",
            plain(t.risk_next_1m_pct),
            plain(t.risk_next_3m_pct),
            plain(t.risk_next_6m_pct)
        ),
        None => "N/A".to_string(),
    };
    format!("Riesgo próximo 1/3/6 meses (si aplica): {}", risks)
}

/// Resolves a server-relative chart path against the API origin.
pub fn chart_link(client: &ApiClient, chart_url: &str) -> String {
    url::Url::parse(client.base_url())
        .and_then(|base| base.join(chart_url))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| chart_url.to_string())
}

#[derive(Debug, Default)]
pub struct FailureProjection {
    last: Mutex<Option<FailureProjectionResponse>>,
}

impl FailureProjection {
    pub fn build_request(form: &dyn FormSource) -> FailureProjectionRequest {
        let form = FormReader::new(form);
        FailureProjectionRequest {
            part_type: form.text(IN_PART),
            current_km: form.optional_number(IN_CURRENT_KM),
            last_service_km: form.optional_number(IN_LAST_KM),
            service_interval_km: form.optional_number(IN_INTERVAL_KM),
            months_since_service: form.optional_number(IN_MONTHS),
            service_interval_months: form.optional_number(IN_INTERVAL_MONTHS),
            clima: form.optional_text(IN_CLIMA),
            horizon_km: form.optional_number(IN_HORIZON_KM),
            points: form
                .optional_int(IN_POINTS)
                .and_then(|p| u32::try_from(p).ok()),
        }
    }

    pub fn render(
        request: &FailureProjectionRequest,
        data: &FailureProjectionResponse,
        client: &ApiClient,
        view: &mut dyn View,
    ) {
        view.set_attr(OUT_IMAGE, "src", &chart_link(client, &data.chart_url));
        view.set_hidden(OUT_RESULT, false);
        view.set_text(OUT_SUMMARY, &risk_summary(data));

        view.set_hidden(BTN_CALENDAR, false);
        view.set_attr(
            BTN_CALENDAR,
            "data-summary",
            &format!("Servicio de {} (proyección de fallos)", request.part_type),
        );
        view.set_attr(
            BTN_CALENDAR,
            "data-description",
            &format!(
                "Proyección generada. Intervalo {} km. Imagen: {}",
                plain(request.service_interval_km.unwrap_or(f64::NAN)),
                data.chart_url
            ),
        );
    }

    pub fn last_projection(&self) -> Option<FailureProjectionResponse> {
        self.last.lock().ok().and_then(|guard| guard.clone())
    }

    /// Schedules the reminder prepared by the last successful projection:
    /// one hour, 48 hours after `now`.
    pub async fn schedule_reminder(
        &self,
        ctx: &CalcContext,
        view: &mut dyn View,
        now: DateTime<Utc>,
    ) -> CalendarResponse {
        let (start, end) = calendar::reminder_window(now);
        let request = CalendarRequest {
            summary: view
                .attr(BTN_CALENDAR, "data-summary")
                .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            description: view.attr(BTN_CALENDAR, "data-description"),
            start,
            end,
            timezone: None,
            reminder_minutes: None,
        };
        calendar::schedule(&ctx.client, &ctx.calendar, &request, view).await
    }

    /// Writes the last projected curve as `km,risk_pct` rows.
    pub async fn export_curve<S: Storage>(&self, storage: &S, filename: &str) -> Result<usize> {
        let data = self.last_projection().ok_or(CalcError::NoProjection)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["km", "risk_pct"])?;
        for (km, risk) in data.x_km.iter().zip(&data.risk_pct) {
            writer.write_record([plain(*km), plain(*risk)])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CalcError::Io(e.into_error()))?;

        storage.write_file(filename, &bytes).await?;
        let rows = data.x_km.len().min(data.risk_pct.len());
        tracing::info!("Exported {} curve points to {}", rows, filename);
        Ok(rows)
    }
}

#[async_trait]
impl Calculator for FailureProjection {
    fn id(&self) -> &'static str {
        ID
    }

    fn title(&self) -> &'static str {
        TITLE
    }

    fn form(&self) -> FormSpec {
        FormSpec {
            id: FORM_ID.to_string(),
            fields: vec![
                FormField::select(IN_PART, "Autoparte", PARTS),
                FormField::select(
                    IN_CLIMA,
                    "Clima",
                    &[
                        ("", "—"),
                        ("templado", "Templado"),
                        ("calido", "Cálido"),
                        ("frio", "Frío"),
                    ],
                ),
                FormField::number(IN_CURRENT_KM, "Km actual", 0.0, true),
                FormField::number(IN_LAST_KM, "Km último servicio", 0.0, true),
                FormField::number(IN_INTERVAL_KM, "Intervalo (km)", 1.0, true),
                FormField::number(IN_MONTHS, "Meses desde servicio (opcional)", 0.0, false),
                FormField::number(IN_INTERVAL_MONTHS, "Intervalo (meses, opcional)", 1.0, false),
                FormField::number(IN_HORIZON_KM, "Horizonte (km, opcional)", 1.0, false),
                FormField::number(IN_POINTS, "Puntos de la curva (opcional)", 51.0, false),
            ],
            submit_label: "Calcular proyección".to_string(),
        }
    }

    fn error_display(&self) -> ErrorDisplay {
        ErrorDisplay::Alert { prefix: "" }
    }

    fn open(&self, view: &mut dyn View) -> bool {
        if !render_modal(view, TITLE, self.form()) {
            return false;
        }
        // A fresh form starts without the previous result or reminder data.
        for id in [OUT_RESULT, OUT_IMAGE, OUT_SUMMARY, BTN_CALENDAR] {
            view.remove(id);
        }
        view.set_hidden(OUT_RESULT, true);
        view.set_hidden(BTN_CALENDAR, true);
        true
    }

    async fn run(&self, ctx: &CalcContext, form: &dyn FormSource, view: &mut dyn View) -> Result<()> {
        let request = Self::build_request(form);
        let data: FailureProjectionResponse = ctx.client.post_json(ENDPOINT, &request).await?;
        tracing::debug!(
            "Projection for '{}': {} points, chart {}",
            request.part_type,
            data.x_km.len(),
            data.chart_url
        );
        Self::render(&request, &data, &ctx.client, view);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(data);
        }
        Ok(())
    }
}
