use std::sync::Arc;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path};

use directory_cell::router::directory_routes;
use directory_cell::services::DirectoryService;
use directory_cell::LoadStatus;
use shared_utils::test_utils::{scenario_doctors, DoctorFixture, TestConfig};

async fn mount_feed(mock_server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/doctors.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

async fn create_loaded_app(mock_server: &MockServer) -> (Router, Arc<DirectoryService>) {
    let service = Arc::new(DirectoryService::new(TestConfig::with_feed(&mock_server.uri()).to_arc()));
    service.load().await;
    (directory_routes(service.clone()), service)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn card_names(body: &Value) -> Vec<String> {
    body["doctors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|card| card["name"]["text"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_doctors_without_criteria_returns_everything() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, scenario_doctors()).await;
    let (app, _) = create_loaded_app(&mock_server).await;

    let (status, body) = get(app, "/doctors").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "loaded");
    assert_eq!(body["total"], 2);
    assert_eq!(card_names(&body), vec!["Dr. A", "Dr. B"]);
    assert_eq!(body["query"], "");
}

#[tokio::test]
async fn test_sort_by_fees() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, scenario_doctors()).await;
    let (app, _) = create_loaded_app(&mock_server).await;

    let (_, body) = get(app, "/doctors?sort=fees").await;

    assert_eq!(card_names(&body), vec!["Dr. B", "Dr. A"]);
    assert_eq!(body["query"], "sort=fees");
}

#[tokio::test]
async fn test_filter_by_video_consult() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, scenario_doctors()).await;
    let (app, _) = create_loaded_app(&mock_server).await;

    let (_, body) = get(app, "/doctors?mode=video").await;

    assert_eq!(card_names(&body), vec!["Dr. A"]);
    assert_eq!(body["criteria"]["mode"], "Video Consult");
}

#[tokio::test]
async fn test_filter_by_specialty_drops_unknown_values() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, scenario_doctors()).await;
    let (app, _) = create_loaded_app(&mock_server).await;

    let (_, body) = get(app, "/doctors?specialties=Dentist%2CAstrologer&utm_source=mail").await;

    assert_eq!(card_names(&body), vec!["Dr. B"]);
    assert_eq!(body["query"], "specialties=Dentist");
}

#[tokio::test]
async fn test_card_carries_test_ids_and_raw_strings() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, json!([
        DoctorFixture::new("1", "Dr. Photo").photo("https://cdn.example.com/p.jpg").to_json(),
        DoctorFixture::new("2", "Dr. Relative").photo("/static/p.jpg").to_json(),
    ])).await;
    let (app, _) = create_loaded_app(&mock_server).await;

    let (_, body) = get(app, "/doctors").await;
    let cards = body["doctors"].as_array().unwrap();

    assert_eq!(cards[0]["test_id"], "doctor-card");
    assert_eq!(cards[0]["fee"]["test_id"], "doctor-fee");
    assert_eq!(cards[0]["fee"]["text"], "₹ 500");
    assert_eq!(cards[0]["photo"]["kind"], "image");
    assert_eq!(cards[1]["photo"]["kind"], "placeholder");
    assert_eq!(cards[0]["specialty"]["text"], "Specialty not specified");
}

#[tokio::test]
async fn test_specialties_are_sorted_and_unique() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, json!([
        DoctorFixture::new("1", "Dr. One").speciality("Dentist").speciality("Ayurveda").to_json(),
        DoctorFixture::new("2", "Dr. Two").speciality("Dentist").to_json(),
        {"id": "3", "name": "Dr. Malformed", "specialities": "Cardiologist"},
    ])).await;
    let (app, _) = create_loaded_app(&mock_server).await;

    let (_, body) = get(app, "/specialties").await;

    assert_eq!(body["specialties"], json!(["Ayurveda", "Dentist"]));
}

#[tokio::test]
async fn test_suggestions_are_capped() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, json!([
        DoctorFixture::new("1", "Dr. Rahul Sen").to_json(),
        DoctorFixture::new("2", "Dr. Rahul Bose").to_json(),
        DoctorFixture::new("3", "Dr. Meera Rahul").to_json(),
        DoctorFixture::new("4", "Dr. Rahul Nair").to_json(),
    ])).await;
    let (app, _) = create_loaded_app(&mock_server).await;

    let (_, body) = get(app.clone(), "/suggestions?q=rahul").await;
    let ids: Vec<&str> = body["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();

    assert_eq!(body["show"], true);
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(body["suggestions"][0]["test_id"], "suggestion-item");

    let (_, body) = get(app, "/suggestions?q=%20%20").await;
    assert_eq!(body["show"], false);
    assert_eq!(body["suggestions"], json!([]));
}

#[tokio::test]
async fn test_filter_panel_marks_selection() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, scenario_doctors()).await;
    let (app, _) = create_loaded_app(&mock_server).await;

    let (_, body) = get(app, "/filters?mode=clinic&specialties=Dentist").await;
    let panel = &body["panel"];

    assert_eq!(panel["mode"]["header_test_id"], "filter-header-moc");
    assert_eq!(panel["mode"]["options"][1]["test_id"], "filter-in-clinic");
    assert_eq!(panel["mode"]["options"][1]["checked"], true);
    assert_eq!(panel["specialties"]["options"][0]["test_id"], "filter-specialty-Dentist");
    assert_eq!(panel["specialties"]["options"][0]["checked"], true);
    assert_eq!(panel["specialties"]["options"][1]["checked"], false);
}

#[tokio::test]
async fn test_criteria_event_updates_query() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, scenario_doctors()).await;
    let (app, _) = create_loaded_app(&mock_server).await;

    let (status, body) = post_json(app.clone(), "/criteria", json!({
        "query": "?sort=fees",
        "event": {"type": "set_mode", "mode": "Video Consult"}
    })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "mode=video&sort=fees");

    let (_, body) = post_json(app, "/criteria", json!({
        "query": "mode=video&sort=fees",
        "event": {"type": "select_suggestion", "name": "Dr. A"}
    })).await;

    assert_eq!(body["query"], "q=Dr.+A&mode=video&sort=fees");
    assert_eq!(body["criteria"]["search"], "Dr. A");
}

#[tokio::test]
async fn test_criteria_event_rejects_unknown_specialty() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, scenario_doctors()).await;
    let (app, _) = create_loaded_app(&mock_server).await;

    let (status, body) = post_json(app, "/criteria", json!({
        "query": "",
        "event": {"type": "toggle_specialty", "name": "Astrologer", "checked": true}
    })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Astrologer"));
}

#[tokio::test]
async fn test_criteria_event_rejects_malformed_body() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, scenario_doctors()).await;
    let (app, _) = create_loaded_app(&mock_server).await;

    let (status, _) = post_json(app, "/criteria", json!({"event": {"type": "teleport"}})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upstream_failure_is_reported_as_failed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;
    let (app, service) = create_loaded_app(&mock_server).await;

    assert_eq!(service.catalogue().await.status(), LoadStatus::Failed);

    let (status, body) = get(app.clone(), "/doctors?mode=video").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["total"], 0);
    assert_eq!(body["query"], "mode=video");
    assert!(body["error"].as_str().unwrap().contains("500"));

    let (_, body) = get(app, "/status").await;
    assert_eq!(body["status"], "failed");
}

#[tokio::test]
async fn test_reload_recovers_after_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_feed(&mock_server, scenario_doctors()).await;

    let (app, service) = create_loaded_app(&mock_server).await;
    assert_eq!(service.catalogue().await.status(), LoadStatus::Failed);

    assert_eq!(service.load().await, LoadStatus::Loaded);

    let (_, body) = get(app, "/status").await;
    assert_eq!(body["status"], "loaded");
    assert_eq!(body["doctors"], 2);
}

#[tokio::test]
async fn test_requests_before_load_echo_query() {
    let service = Arc::new(DirectoryService::new(TestConfig::default().to_arc()));
    let app = directory_routes(service);

    let (status, body) = get(app, "/doctors?specialties=Dentist&sort=fees").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "loading");
    assert_eq!(body["doctors"], json!([]));
    assert_eq!(body["query"], "specialties=Dentist&sort=fees");
}

#[tokio::test]
async fn test_reload_endpoint_accepts() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server, scenario_doctors()).await;
    let service = Arc::new(DirectoryService::new(TestConfig::with_feed(&mock_server.uri()).to_arc()));
    let app = directory_routes(service.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/reload")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "loading");
}
