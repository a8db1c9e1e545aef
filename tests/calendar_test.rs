use autocalc::core::calendar::{
    self, CalendarDefaults, CalendarRequest, MSG_CREATED, MSG_FAILED, MSG_NOT_CONFIGURED,
};
use autocalc::domain::model::CalendarStatus;
use autocalc::{ApiClient, MemoryView};
use chrono::{Duration, TimeZone, Utc};
use httpmock::prelude::*;
use serde_json::json;

fn request() -> CalendarRequest {
    let start = Utc.with_ymd_and_hms(2025, 11, 5, 10, 0, 0).unwrap();
    CalendarRequest {
        summary: "Cambio de aceite".to_string(),
        description: Some("Aceite sintético 5W-30".to_string()),
        start,
        end: start + Duration::hours(1),
        timezone: Some("America/Mexico_City".to_string()),
        reminder_minutes: Some(30),
    }
}

#[tokio::test]
async fn created_event_is_reported() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/calendar/agendar").json_body(json!({
                "summary": "Cambio de aceite",
                "description": "Aceite sintético 5W-30",
                "start_iso": "2025-11-05T10:00:00",
                "end_iso": "2025-11-05T11:00:00",
                "timezone": "America/Mexico_City",
                "reminder_minutes": 30
            }));
            then.status(200).json_body(json!({
                "status": "created",
                "event_id": "abc",
                "html_link": "https://calendar.google.com/event?eid=abc"
            }));
        })
        .await;

    let client = ApiClient::new(server.url("/api"));
    let mut view = MemoryView::page();

    let response =
        calendar::schedule(&client, &CalendarDefaults::default(), &request(), &mut view).await;

    api_mock.assert_async().await;
    assert_eq!(response.kind(), CalendarStatus::Created);
    assert_eq!(
        response.html_link.as_deref(),
        Some("https://calendar.google.com/event?eid=abc")
    );
    assert_eq!(view.alerts(), [MSG_CREATED]);
}

#[tokio::test]
async fn not_configured_points_to_setup() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/calendar/agendar");
            then.status(200).json_body(json!({
                "status": "not_configured",
                "how_to_enable": ["Crear credenciales OAuth", "Definir GOOGLE_CALENDAR_ID"]
            }));
        })
        .await;

    let client = ApiClient::new(server.url("/api"));
    let mut view = MemoryView::page();

    let response =
        calendar::schedule(&client, &CalendarDefaults::default(), &request(), &mut view).await;

    assert_eq!(response.kind(), CalendarStatus::NotConfigured);
    assert!(response.how_to_enable.is_some());
    assert_eq!(view.alerts(), [MSG_NOT_CONFIGURED]);
}

#[tokio::test]
async fn other_status_shows_detail_or_fallback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/calendar/agendar")
                .json_body_partial(r#"{"summary": "con detalle"}"#);
            then.status(200)
                .json_body(json!({"status": "error", "detail": "Token expirado"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/calendar/agendar")
                .json_body_partial(r#"{"summary": "sin detalle"}"#);
            then.status(200).json_body(json!({"status": "pending"}));
        })
        .await;

    let client = ApiClient::new(server.url("/api"));
    let mut view = MemoryView::page();
    let defaults = CalendarDefaults::default();

    let mut with_detail = request();
    with_detail.summary = "con detalle".to_string();
    calendar::schedule(&client, &defaults, &with_detail, &mut view).await;

    let mut without_detail = request();
    without_detail.summary = "sin detalle".to_string();
    let response = calendar::schedule(&client, &defaults, &without_detail, &mut view).await;

    assert_eq!(response.kind(), CalendarStatus::Other("pending".to_string()));
    assert_eq!(view.alerts(), ["Token expirado", MSG_FAILED]);
}

#[tokio::test]
async fn request_failure_is_normalized() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/calendar/agendar");
            then.status(500)
                .json_body(json!({"detail": "Calendar API no disponible"}));
        })
        .await;

    let client = ApiClient::new(server.url("/api"));
    let mut view = MemoryView::page();

    let response =
        calendar::schedule(&client, &CalendarDefaults::default(), &request(), &mut view).await;

    assert_eq!(response.status, "error");
    assert_eq!(response.detail.as_deref(), Some("Calendar API no disponible"));
    assert_eq!(view.alerts(), ["Calendar API no disponible"]);
}

#[tokio::test]
async fn rejected_event_without_detail_reports_not_scheduled() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/calendar/agendar");
            then.status(502).json_body(json!({"status": "error"}));
        })
        .await;

    let client = ApiClient::new(server.url("/api"));
    let mut view = MemoryView::page();

    let response =
        calendar::schedule(&client, &CalendarDefaults::default(), &request(), &mut view).await;

    api_mock.assert_async().await;
    assert_eq!(response.status, "error");
    assert_eq!(response.detail.as_deref(), Some(MSG_FAILED));
    assert_eq!(view.alerts(), [MSG_FAILED]);
}
