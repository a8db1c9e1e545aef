//! Reminder scheduling through the backend calendar endpoint.
//!
//! Used both by the standalone `agendar` action and by the failure-projection
//! result, so status interpretation lives in one place.

use crate::core::client::ApiClient;
use crate::domain::model::{CalendarEventPayload, CalendarResponse, CalendarStatus};
use crate::domain::ports::View;
use crate::utils::error::{CalcError, GENERIC_FAILURE_MESSAGE};
use chrono::{DateTime, Duration, Utc};

pub const CALENDAR_PATH: &str = "/calendar/agendar";
pub const FALLBACK_TIMEZONE: &str = "America/Mexico_City";
pub const DEFAULT_REMINDER_MINUTES: i64 = 60;

pub const MSG_CREATED: &str = "Evento creado en Google Calendar.";
pub const MSG_NOT_CONFIGURED: &str =
    "Google Calendar no está configurado. Revisa README para configurarlo.";
pub const MSG_FAILED: &str = "No se pudo agendar.";

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarRequest {
    pub summary: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub timezone: Option<String>,
    pub reminder_minutes: Option<i64>,
}

/// Fallbacks applied when a request leaves timezone or reminder unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarDefaults {
    pub timezone: Option<String>,
    pub reminder_minutes: Option<i64>,
}

impl CalendarDefaults {
    /// Request value, then configured zone, then `TZ`, then the host zone.
    pub fn resolve_timezone(&self, explicit: Option<&str>) -> String {
        let candidates = [
            explicit.map(str::to_string),
            self.timezone.clone(),
            std::env::var("TZ").ok(),
            system_timezone(),
        ];
        candidates
            .into_iter()
            .flatten()
            .map(|tz| tz.trim().to_string())
            .find(|tz| !tz.is_empty())
            .unwrap_or_else(|| FALLBACK_TIMEZONE.to_string())
    }

    pub fn payload(&self, request: &CalendarRequest) -> CalendarEventPayload {
        CalendarEventPayload {
            summary: request.summary.clone(),
            description: request.description.clone().unwrap_or_default(),
            start_iso: iso_seconds(&request.start),
            end_iso: iso_seconds(&request.end),
            timezone: self.resolve_timezone(request.timezone.as_deref()),
            reminder_minutes: request
                .reminder_minutes
                .or(self.reminder_minutes)
                .unwrap_or(DEFAULT_REMINDER_MINUTES),
        }
    }
}

/// IANA name of the host zone, the same source `chrono::Local` reads.
pub fn system_timezone() -> Option<String> {
    match iana_time_zone::get_timezone() {
        Ok(tz) => Some(tz),
        Err(e) => {
            tracing::debug!("Host timezone unavailable: {}", e);
            None
        }
    }
}

/// Second-precision ISO text without offset, e.g. `2025-11-05T10:00:00`.
pub fn iso_seconds(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// A one-hour slot starting 48 hours after `now`.
pub fn reminder_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now + Duration::hours(48);
    (start, start + Duration::hours(1))
}

/// Posts the event and reports the outcome through `view`. Never fails: request
/// errors are alerted and returned as a normalized `error` response.
pub async fn schedule(
    client: &ApiClient,
    defaults: &CalendarDefaults,
    request: &CalendarRequest,
    view: &mut dyn View,
) -> CalendarResponse {
    let payload = defaults.payload(request);
    tracing::info!(
        "Scheduling '{}' {} -> {} ({})",
        payload.summary,
        payload.start_iso,
        payload.end_iso,
        payload.timezone
    );

    let response: CalendarResponse = match client.post_json(CALENDAR_PATH, &payload).await {
        Ok(response) => response,
        Err(e) => {
            let message = match &e {
                // A rejected event without a detail reads the same as an unknown status.
                CalcError::Api { message, .. } if message == GENERIC_FAILURE_MESSAGE => {
                    MSG_FAILED.to_string()
                }
                other => other.user_friendly_message(),
            };
            tracing::error!("Calendar scheduling failed: {}", message);
            view.alert(&message);
            return CalendarResponse::error(message);
        }
    };

    match response.kind() {
        CalendarStatus::Created => {
            if let Some(link) = &response.html_link {
                tracing::info!("Calendar event created: {}", link);
            }
            view.alert(MSG_CREATED);
        }
        CalendarStatus::NotConfigured => {
            view.alert(MSG_NOT_CONFIGURED);
            if let Some(how_to) = &response.how_to_enable {
                tracing::info!("Calendar setup instructions: {}", how_to);
            }
        }
        CalendarStatus::Other(status) => {
            tracing::warn!("Calendar returned status '{}'", status);
            let detail = response
                .detail
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(MSG_FAILED);
            view.alert(detail);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> CalendarRequest {
        let start = Utc.with_ymd_and_hms(2025, 11, 5, 10, 0, 0).unwrap();
        CalendarRequest {
            summary: "Cambio de aceite".to_string(),
            description: None,
            start,
            end: start + Duration::hours(1),
            timezone: Some("Europe/Madrid".to_string()),
            reminder_minutes: None,
        }
    }

    #[test]
    fn payload_applies_defaults() {
        let payload = CalendarDefaults::default().payload(&request());
        assert_eq!(payload.description, "");
        assert_eq!(payload.start_iso, "2025-11-05T10:00:00");
        assert_eq!(payload.end_iso, "2025-11-05T11:00:00");
        assert_eq!(payload.timezone, "Europe/Madrid");
        assert_eq!(payload.reminder_minutes, 60);
    }

    #[test]
    fn configured_reminder_beats_builtin_default() {
        let defaults = CalendarDefaults {
            timezone: None,
            reminder_minutes: Some(15),
        };
        assert_eq!(defaults.payload(&request()).reminder_minutes, 15);
    }

    #[test]
    fn configured_timezone_used_when_request_has_none() {
        let defaults = CalendarDefaults {
            timezone: Some("America/Bogota".to_string()),
            reminder_minutes: None,
        };
        assert_eq!(defaults.resolve_timezone(None), "America/Bogota");
        assert_eq!(defaults.resolve_timezone(Some("  ")), "America/Bogota");
    }

    #[test]
    fn host_zone_used_before_fallback() {
        // Only meaningful where TZ is unset and the host zone is known.
        if std::env::var("TZ").is_ok() {
            return;
        }
        let Some(host) = system_timezone() else { return };

        let defaults = CalendarDefaults::default();
        assert_eq!(defaults.resolve_timezone(None), host);

        let request = CalendarRequest {
            timezone: None,
            ..request()
        };
        assert_eq!(defaults.payload(&request).timezone, host);
    }

    #[test]
    fn explicit_timezone_beats_host_zone() {
        let defaults = CalendarDefaults::default();
        assert_eq!(defaults.resolve_timezone(Some("Asia/Tokyo")), "Asia/Tokyo");
    }

    #[test]
    fn iso_seconds_truncates_subsecond_precision() {
        let t = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap() + Duration::milliseconds(678);
        assert_eq!(iso_seconds(&t), "2025-01-02T03:04:05");
    }

    #[test]
    fn reminder_window_is_one_hour_two_days_out() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
        let (start, end) = reminder_window(now);
        assert_eq!(iso_seconds(&start), "2025-03-03T08:30:00");
        assert_eq!(iso_seconds(&end), "2025-03-03T09:30:00");
    }
}
