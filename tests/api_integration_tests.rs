use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::{get, post},
};
use cafe_like_star::config::{ApiConfig, IndicatorConfig, ToggleConfig};
use cafe_like_star::{
    CafeLikesClient, ClickOutcome, EntityId, IndicatorState, LikeAction, LikeIndicatorController, LikesApi, StarIcon,
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    path: String,
    query: Option<String>,
    content_type: Option<String>,
    body: Option<serde_json::Value>,
}

#[derive(Clone)]
struct StubState {
    likes_status: StatusCode,
    likes_body: &'static str,
    toggle_status: StatusCode,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubState {
    fn record(&self, method: &str, uri: &Uri, headers: &HeaderMap, body: Option<serde_json::Value>) {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            content_type,
            body,
        });
    }
}

async fn likes_handler(State(stub): State<StubState>, uri: Uri, headers: HeaderMap) -> impl IntoResponse {
    stub.record("GET", &uri, &headers, None);
    (stub.likes_status, [(CONTENT_TYPE, "application/json")], stub.likes_body)
}

async fn toggle_handler(
    State(stub): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    stub.record("POST", &uri, &headers, Some(body));
    (stub.toggle_status, Json(serde_json::json!({})))
}

/// Likes API on a local port: GET /api/likes answers `likes_body`, the
/// toggle endpoints answer `toggle_status`.
struct StubLikesServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubLikesServer {
    async fn start(likes_status: u16, likes_body: &'static str, toggle_status: u16) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            likes_status: StatusCode::from_u16(likes_status).unwrap(),
            likes_body,
            toggle_status: StatusCode::from_u16(toggle_status).unwrap(),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/api/likes", get(likes_handler))
            .route("/api/like", post(toggle_handler))
            .route("/api/unlike", post(toggle_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            requests,
        }
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            request_timeout_seconds: 5,
            ..ApiConfig::default()
        }
    }

    fn client(&self) -> CafeLikesClient {
        CafeLikesClient::from_config(&self.api_config()).expect("build client")
    }
}

fn star_controller(client: CafeLikesClient, track_state: bool) -> LikeIndicatorController<StarIcon> {
    LikeIndicatorController::new(
        Arc::new(client),
        StarIcon::new(&IndicatorConfig::default()),
        ToggleConfig { track_state },
    )
}

#[tokio::test]
async fn test_fetch_like_status() {
    let server = StubLikesServer::start(200, r#"{"likes": true}"#, 200).await;
    let client = server.client();

    let likes = client.fetch_like_status(&EntityId::new("42")).await.unwrap();

    assert!(likes);
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/likes");
    assert_eq!(requests[0].query.as_deref(), Some("cafe_id=42"));
}

#[tokio::test]
async fn test_fetch_like_status_rejects_non_json() {
    let server = StubLikesServer::start(500, "<html>oops</html>", 200).await;
    let err = server.client().fetch_like_status(&EntityId::new("1")).await.unwrap_err();
    assert!(err.to_string().contains("500"), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_fetch_like_status_reads_json_error_bodies() {
    let server = StubLikesServer::start(404, r#"{"error": "no cafe"}"#, 200).await;
    let likes = server.client().fetch_like_status(&EntityId::new("1")).await.unwrap();
    assert!(!likes);
}

#[tokio::test]
async fn test_logged_out_page_shows_empty_star_and_likes_on_click() {
    let server = StubLikesServer::start(401, r#"{"error": "Not logged in"}"#, 200).await;
    let controller = star_controller(server.client(), true);

    assert!(!controller.initialize("http://localhost:5000/cafes/12").await.unwrap());
    assert_eq!(controller.icon().class_attr(), "bi bi-star");

    let outcome = controller.click().await.unwrap();
    assert_eq!(outcome, ClickOutcome::Sent { action: LikeAction::Like, status: true });

    let requests = server.requests();
    assert_eq!(requests[1].path, "/api/like");
    assert_eq!(requests[1].body, Some(serde_json::json!({ "cafe_id": 12 })));
}

#[tokio::test]
async fn test_send_toggle_posts_json_body() {
    let server = StubLikesServer::start(200, r#"{"likes": false}"#, 201).await;

    let status = server.client().send_toggle(LikeAction::Like, &EntityId::new("42")).await.unwrap();

    assert_eq!(status, 201);
    let requests = server.requests();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/like");
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(requests[0].body, Some(serde_json::json!({ "cafe_id": 42 })));
}

#[tokio::test]
async fn test_api_log_records_calls() {
    let server = StubLikesServer::start(200, r#"{"likes": false}"#, 200).await;
    let log_path = std::env::temp_dir().join(format!("cafe_like_star_api_{}.log", std::process::id()));
    let _ = std::fs::remove_file(&log_path);

    let client = CafeLikesClient::from_config(&ApiConfig {
        api_logging: true,
        api_log_path: log_path.to_string_lossy().to_string(),
        ..server.api_config()
    })
    .unwrap();

    client.fetch_like_status(&EntityId::new("42")).await.unwrap();
    client.send_toggle(LikeAction::Like, &EntityId::new("42")).await.unwrap();

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Method: GET"));
    assert!(log.contains("/likes?cafe_id=42"));
    assert!(log.contains("Method: POST"));
    assert!(log.contains(r#"Request Body: {"cafe_id":42}"#));
    assert!(log.contains("Response Status: 200"));

    let _ = std::fs::remove_file(&log_path);
}

#[tokio::test]
async fn test_liked_page_click_unlikes() {
    let server = StubLikesServer::start(200, r#"{"likes": true}"#, 200).await;
    let controller = star_controller(server.client(), true);

    assert!(controller.initialize("http://localhost:5000/cafes/42").await.unwrap());
    assert_eq!(controller.icon().class_attr(), "bi bi-star-fill");

    let outcome = controller.click().await.unwrap();
    assert_eq!(outcome, ClickOutcome::Sent { action: LikeAction::Unlike, status: false });
    assert_eq!(controller.icon().class_attr(), "bi bi-star");

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].path, "/api/unlike");
    assert_eq!(requests[1].body, Some(serde_json::json!({ "cafe_id": 42 })));
}

#[tokio::test]
async fn test_rejected_toggle_restores_star() {
    let server = StubLikesServer::start(200, r#"{"likes": false}"#, 401).await;
    let controller = star_controller(server.client(), true);
    controller.initialize("http://localhost:5000/cafes/8").await.unwrap();

    assert!(controller.click().await.is_err());
    assert_eq!(controller.indicator_state(), Some(IndicatorState::Empty));
    assert_eq!(controller.icon().class_attr(), "bi bi-star");
}

#[tokio::test]
async fn test_load_time_mode_ignores_toggle_response() {
    let server = StubLikesServer::start(200, r#"{"likes": false}"#, 500).await;
    let controller = star_controller(server.client(), false);
    controller.initialize("http://localhost:5000/cafes/11").await.unwrap();

    controller.click().await.unwrap();
    controller.click().await.unwrap();

    let paths: Vec<String> = server.requests().into_iter().skip(1).map(|r| r.path).collect();
    assert_eq!(paths, vec!["/api/like", "/api/like"]);
    assert_eq!(controller.indicator_state(), Some(IndicatorState::Empty));
}
