use autocalc::app::calculators::fallos::{self, FailureProjection};
use autocalc::app::calculators::{Calculator, MODAL, MODAL_CONTENT};
use autocalc::core::calendar::{CalendarDefaults, MSG_CREATED};
use autocalc::domain::ports::View;
use autocalc::domain::view::{FieldKind, Node};
use autocalc::{ApiClient, CalcContext, CalcError, CalculatorRegistry, LocalStorage, MemoryView};
use anyhow::Result;
use chrono::{TimeZone, Utc};
use httpmock::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use tempfile::TempDir;

fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn projection_body() -> serde_json::Value {
    json!({
        "part_type": "frenos",
        "x_km": [48000, 50000, 52000],
        "risk_pct": [5, 12.5, 30],
        "chart_url": "/static/charts/fallos_frenos.png",
        "meta": {"weibull_k": 2.2},
        "temporal": {
            "risk_next_1m_pct": 8.2,
            "risk_next_3m_pct": 19,
            "risk_next_6m_pct": 37.5
        }
    })
}

fn frenos_form() -> HashMap<String, String> {
    form(&[
        (fallos::IN_PART, "frenos"),
        (fallos::IN_CURRENT_KM, "48000"),
        (fallos::IN_LAST_KM, "30000"),
        (fallos::IN_INTERVAL_KM, "20000"),
    ])
}

#[test]
fn card_is_injected_once() {
    let mut view = MemoryView::page();
    let mut registry = CalculatorRegistry::new();

    fallos::register(&mut registry, &mut view);
    fallos::register(&mut registry, &mut view);

    let cards: Vec<Node> = view
        .children("cardsContainer")
        .into_iter()
        .filter(|node| node.id() == Some(fallos::CARD_ID))
        .collect();
    assert_eq!(cards.len(), 1);
    assert!(registry.get(fallos::ID).is_some());
}

#[test]
fn card_falls_back_to_page_body() {
    let mut view = MemoryView::new();
    assert!(fallos::ensure_card(&mut view));
    assert!(view.contains(fallos::CARD_ID));
    assert_eq!(view.children(fallos::FALLBACK_CONTAINER).len(), 1);
}

#[test]
fn opening_shows_form_with_result_hidden() {
    let mut view = MemoryView::page();
    let (registry, _) = CalculatorRegistry::with_defaults(&mut view);

    assert!(registry.open(fallos::ID, &mut view));

    assert!(!view.is_hidden(MODAL));
    assert!(view.contains(fallos::FORM_ID));
    assert!(view.is_hidden(fallos::OUT_RESULT));
    assert!(view.is_hidden(fallos::BTN_CALENDAR));
    assert!(matches!(
        view.children(MODAL_CONTENT).first(),
        Some(Node::Form(spec)) if spec.id == fallos::FORM_ID
    ));
}

#[test]
fn form_offers_every_part_and_optional_resolution() {
    let spec = FailureProjection::default().form();

    let part = spec.field(fallos::IN_PART).map(|f| f.kind.clone());
    assert!(matches!(
        part,
        Some(FieldKind::Select { options }) if options.len() == fallos::PARTS.len()
    ));
    assert!(matches!(
        spec.field(fallos::IN_POINTS).map(|f| &f.kind),
        Some(FieldKind::Number { required: false, .. })
    ));
}

#[tokio::test]
async fn blank_optionals_are_sent_as_null() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/fallos/proyeccion").json_body(json!({
                "part_type": "frenos",
                "current_km": 48000.0,
                "last_service_km": 30000.0,
                "service_interval_km": 20000.0,
                "months_since_service": null,
                "service_interval_months": null,
                "clima": null,
                "horizon_km": null
            }));
            then.status(200).json_body(projection_body());
        })
        .await;

    let ctx = CalcContext::new(ApiClient::new(server.url("/api")));
    let mut view = MemoryView::page();
    let (registry, projection) = CalculatorRegistry::with_defaults(&mut view);

    registry
        .submit(fallos::ID, &ctx, &frenos_form(), &mut view)
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert!(!view.is_hidden(fallos::OUT_RESULT));
    assert!(!view.is_hidden(fallos::BTN_CALENDAR));
    assert_eq!(
        view.attr(fallos::OUT_IMAGE, "src"),
        Some(server.url("/static/charts/fallos_frenos.png"))
    );
    assert_eq!(
        view.text(fallos::OUT_SUMMARY).as_deref(),
        Some("Riesgo próximo 1/3/6 meses (si aplica): 8.2% / 19% / 37.5%")
    );
    assert_eq!(
        view.attr(fallos::BTN_CALENDAR, "data-summary").as_deref(),
        Some("Servicio de frenos (proyección de fallos)")
    );
    assert_eq!(
        view.attr(fallos::BTN_CALENDAR, "data-description").as_deref(),
        Some("Proyección generada. Intervalo 20000 km. Imagen: /static/charts/fallos_frenos.png")
    );
    assert_eq!(projection.last_projection().map(|p| p.x_km.len()), Some(3));
}

#[tokio::test]
async fn blank_required_numbers_are_sent_as_null() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/fallos/proyeccion").json_body(json!({
                "part_type": "aceite",
                "current_km": null,
                "last_service_km": null,
                "service_interval_km": null,
                "months_since_service": null,
                "service_interval_months": null,
                "clima": null,
                "horizon_km": null
            }));
            then.status(422)
                .json_body(json!({"detail": "current_km es obligatorio"}));
        })
        .await;

    let ctx = CalcContext::new(ApiClient::new(server.url("/api")));
    let mut view = MemoryView::page();
    let (registry, _) = CalculatorRegistry::with_defaults(&mut view);
    let input = form(&[
        (fallos::IN_PART, "aceite"),
        (fallos::IN_LAST_KM, "n/a"),
    ]);

    assert!(registry.submit(fallos::ID, &ctx, &input, &mut view).await.is_err());

    api_mock.assert_async().await;
    assert_eq!(view.alerts(), ["current_km es obligatorio"]);
}

#[tokio::test]
async fn optional_inputs_and_points_are_forwarded() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/fallos/proyeccion")
                .json_body_partial(
                    r#"{"clima": "calido", "months_since_service": 7.0, "horizon_km": 15000.0, "points": 31}"#,
                );
            then.status(200).json_body(json!({
                "x_km": [],
                "risk_pct": [],
                "chart_url": "/static/charts/fallos_aceite.png",
                "temporal": null
            }));
        })
        .await;

    let ctx = CalcContext::new(ApiClient::new(server.url("/api")));
    let mut view = MemoryView::page();
    let (registry, _) = CalculatorRegistry::with_defaults(&mut view);
    let input = form(&[
        (fallos::IN_PART, "aceite"),
        (fallos::IN_CLIMA, "calido"),
        (fallos::IN_MONTHS, "7"),
        (fallos::IN_HORIZON_KM, "15000"),
        (fallos::IN_POINTS, "31"),
    ]);

    registry.submit(fallos::ID, &ctx, &input, &mut view).await.unwrap();

    api_mock.assert_async().await;
    assert_eq!(
        view.text(fallos::OUT_SUMMARY).as_deref(),
        Some("Riesgo próximo 1/3/6 meses (si aplica): N/A")
    );
}

#[tokio::test]
async fn projection_error_alerts_bare_detail() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/fallos/proyeccion");
            then.status(400)
                .json_body(json!({"detail": "Tipo de autoparte no soportado"}));
        })
        .await;

    let ctx = CalcContext::new(ApiClient::new(server.url("/api")));
    let mut view = MemoryView::page();
    let (registry, projection) = CalculatorRegistry::with_defaults(&mut view);

    assert!(registry
        .submit(fallos::ID, &ctx, &form(&[(fallos::IN_PART, "motor")]), &mut view)
        .await
        .is_err());

    assert_eq!(view.alerts(), ["Tipo de autoparte no soportado"]);
    assert!(projection.last_projection().is_none());
}

#[tokio::test]
async fn reminder_uses_projection_summary_two_days_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/fallos/proyeccion");
            then.status(200).json_body(projection_body());
        })
        .await;
    let calendar_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/calendar/agendar").json_body(json!({
                "summary": "Servicio de frenos (proyección de fallos)",
                "description": "Proyección generada. Intervalo 20000 km. Imagen: /static/charts/fallos_frenos.png",
                "start_iso": "2025-11-07T09:00:00",
                "end_iso": "2025-11-07T10:00:00",
                "timezone": "America/Monterrey",
                "reminder_minutes": 60
            }));
            then.status(200).json_body(json!({
                "status": "created",
                "event_id": "evt123",
                "html_link": "https://calendar.google.com/event?eid=evt123"
            }));
        })
        .await;

    let ctx = CalcContext::new(ApiClient::new(server.url("/api"))).with_calendar(CalendarDefaults {
        timezone: Some("America/Monterrey".to_string()),
        reminder_minutes: None,
    });
    let mut view = MemoryView::page();
    let (registry, projection) = CalculatorRegistry::with_defaults(&mut view);
    registry
        .submit(fallos::ID, &ctx, &frenos_form(), &mut view)
        .await
        .unwrap();

    let now = Utc.with_ymd_and_hms(2025, 11, 5, 9, 0, 0).unwrap();
    let response = projection.schedule_reminder(&ctx, &mut view, now).await;

    calendar_mock.assert_async().await;
    assert_eq!(response.event_id.as_deref(), Some("evt123"));
    assert_eq!(view.alerts(), [MSG_CREATED]);
}

#[tokio::test]
async fn reminder_without_projection_uses_default_summary() {
    let server = MockServer::start_async().await;
    let calendar_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/calendar/agendar")
                .json_body_partial(r#"{"summary": "Servicio automotriz", "description": ""}"#);
            then.status(200).json_body(json!({"status": "created"}));
        })
        .await;

    let ctx = CalcContext::new(ApiClient::new(server.url("/api")));
    let mut view = MemoryView::page();
    let projection = FailureProjection::default();

    projection.schedule_reminder(&ctx, &mut view, Utc::now()).await;

    calendar_mock.assert_async().await;
}

#[tokio::test]
async fn curve_exports_as_csv() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/fallos/proyeccion");
            then.status(200).json_body(projection_body());
        })
        .await;

    let ctx = CalcContext::new(ApiClient::new(server.url("/api")));
    let mut view = MemoryView::page();
    let projection = FailureProjection::default();
    projection.submit(&ctx, &frenos_form(), &mut view).await?;

    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());

    let rows = projection.export_curve(&storage, "curvas/frenos.csv").await?;

    assert_eq!(rows, 3);
    let written = std::fs::read_to_string(temp_dir.path().join("curvas/frenos.csv"))?;
    assert_eq!(written, "km,risk_pct\n48000,5\n50000,12.5\n52000,30\n");
    Ok(())
}

#[tokio::test]
async fn export_before_projection_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());

    let err = FailureProjection::default()
        .export_curve(&storage, "curva.csv")
        .await
        .unwrap_err();

    assert!(matches!(err, CalcError::NoProjection));
    assert!(!temp_dir.path().join("curva.csv").exists());
    Ok(())
}
