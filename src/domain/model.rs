//! Request/response contracts of the calculator API.
//!
//! Field names match the backend JSON exactly; every payload lives for one request only.

use serde::{Deserialize, Serialize};

// ---------- Servicio ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub current_km: f64,
    pub last_service_km: f64,
    pub service_interval_km: f64,
    pub avg_km_per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    #[serde(default)]
    pub next_service_km: Option<f64>,
    pub km_remaining: f64,
    pub is_overdue: bool,
    #[serde(default)]
    pub months_to_service: Option<f64>,
    #[serde(default)]
    pub days_to_service: Option<i64>,
    #[serde(default)]
    pub estimated_date: Option<String>,
    pub message: String,
}

// ---------- Consumo ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRequest {
    pub distance_km: f64,
    pub liters: f64,
    pub price_per_liter: f64,
    pub driving_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionResponse {
    pub km_per_liter: f64,
    pub cost_per_km: f64,
    pub total_cost: f64,
    pub co2_kg: f64,
    pub rating_text: String,
    pub typical_km_per_liter: f64,
}

// ---------- Batería ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryRequest {
    pub install_date: String,
    pub battery_type: String,
    pub usage: String,
    pub climate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryResponse {
    pub percent_remaining: f64,
    pub months_left: f64,
    pub status: String,
    pub base_months: f64,
    pub adjusted_total_months: f64,
    #[serde(default)]
    pub months_elapsed: Option<f64>,
    pub recommendations: Vec<String>,
}

// ---------- Tips ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipsResponse {
    #[serde(default)]
    pub category: Option<String>,
    pub items: Vec<Tip>,
}

// ---------- Autopartes ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartsSearchRequest {
    pub brand: String,
    pub model: String,
    pub year: Option<i64>,
    pub part_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartLink {
    pub url: String,
    pub site: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartsSearchResponse {
    #[serde(default)]
    pub query: Option<String>,
    pub links: Vec<PartLink>,
}

// ---------- Depreciación ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationRequest {
    pub purchase_price: f64,
    pub purchase_year: i64,
    pub current_km: f64,
    pub condition: String,
    pub brand_class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationBreakdown {
    pub age_years: f64,
    pub base_residual_factor: f64,
    pub brand_factor: f64,
    pub condition_factor: f64,
    pub mileage_factor: f64,
    pub final_residual_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationResponse {
    pub estimated_value: f64,
    pub depreciation_percent: f64,
    pub annual_loss_avg: f64,
    pub breakdown: DepreciationBreakdown,
}

// ---------- Proyección de fallos ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureProjectionRequest {
    pub part_type: String,
    /// `None` when the input is blank or not a number; the backend rejects it.
    pub current_km: Option<f64>,
    pub last_service_km: Option<f64>,
    pub service_interval_km: Option<f64>,
    pub months_since_service: Option<f64>,
    pub service_interval_months: Option<f64>,
    pub clima: Option<String>,
    pub horizon_km: Option<f64>,
    /// Curve resolution; omitted so the backend applies its own default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalRisk {
    pub risk_next_1m_pct: f64,
    pub risk_next_3m_pct: f64,
    pub risk_next_6m_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureProjectionResponse {
    #[serde(default)]
    pub part_type: Option<String>,
    #[serde(default)]
    pub x_km: Vec<f64>,
    #[serde(default)]
    pub risk_pct: Vec<f64>,
    pub chart_url: String,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub temporal: Option<TemporalRisk>,
}

// ---------- Calendario ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventPayload {
    pub summary: String,
    pub description: String,
    pub start_iso: String,
    pub end_iso: String,
    pub timezone: String,
    pub reminder_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarStatus {
    Created,
    NotConfigured,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub status: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub html_link: Option<String>,
    #[serde(default)]
    pub how_to_enable: Option<serde_json::Value>,
}

impl CalendarResponse {
    /// Normalized result returned when the request itself failed.
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            detail: Some(detail.into()),
            event_id: None,
            html_link: None,
            how_to_enable: None,
        }
    }

    pub fn kind(&self) -> CalendarStatus {
        match self.status.as_str() {
            "created" => CalendarStatus::Created,
            "not_configured" => CalendarStatus::NotConfigured,
            other => CalendarStatus::Other(other.to_string()),
        }
    }
}
