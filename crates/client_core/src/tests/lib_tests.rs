use super::*;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response as AxumResponse},
    Router,
};
use serde_json::{json, Value};
use shared::domain::{RideStatus, Role};
use std::{collections::HashMap, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: Method,
    path: String,
    query: Option<String>,
    content_type: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct MockBackend {
    routes: Arc<HashMap<(Method, String), (StatusCode, String)>>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    async fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().await.clone()
    }
}

async fn handle_any(
    State(state): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> AxumResponse {
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    state.recorded.lock().await.push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body,
    });

    match state.routes.get(&(method, uri.path().to_string())) {
        Some((status, payload)) => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            payload.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_backend(routes: Vec<(Method, &str, StatusCode, String)>) -> (String, MockBackend) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = MockBackend {
        routes: Arc::new(
            routes
                .into_iter()
                .map(|(method, path, status, body)| ((method, path.to_string()), (status, body)))
                .collect(),
        ),
        recorded: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new().fallback(handle_any).with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

fn ok_json(value: Value) -> (StatusCode, String) {
    (StatusCode::OK, value.to_string())
}

#[tokio::test]
async fn create_user_posts_payload_and_returns_id() {
    let (status, body) = ok_json(json!({ "id": "r1", "name": "Alex Rider", "role": "rider" }));
    let (url, backend) = spawn_backend(vec![(Method::POST, "/api/users", status, body)]).await;
    let client = BikeTaxiClient::new(&url).expect("client");

    let id = client
        .create_user(&NewUser::active("Alex Rider", Role::Rider))
        .await
        .expect("create");
    assert_eq!(id, UserId::from("r1"));

    let requests = backend.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(
        requests[0].body,
        json!({ "name": "Alex Rider", "role": "rider", "is_active": true })
    );
}

#[tokio::test]
async fn list_drivers_parses_nested_status() {
    let (status, body) = ok_json(json!([
        { "id": "d1", "name": "Blaze Driver", "status": { "is_available": true, "lat": 12.97, "lng": 77.59 } },
        { "id": "d2", "name": "Idle Driver", "status": null },
    ]));
    let (url, backend) = spawn_backend(vec![(Method::GET, "/api/drivers", status, body)]).await;
    let client = BikeTaxiClient::new(&url).expect("client");

    let drivers = client.list_drivers().await.expect("drivers");
    assert_eq!(drivers.len(), 2);
    assert!(drivers[0].is_available());
    assert_eq!(
        drivers[0].status.as_ref().and_then(|s| s.coordinates()),
        Some((12.97, 77.59))
    );
    assert!(!drivers[1].is_available());

    let requests = backend.requests().await;
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn driver_status_update_serializes_blank_coordinates_as_null() {
    let (url, backend) = spawn_backend(vec![(
        Method::POST,
        "/api/driver/status",
        StatusCode::OK,
        "{}".to_string(),
    )])
    .await;
    let client = BikeTaxiClient::new(&url).expect("client");

    client
        .update_driver_status(&DriverStatusUpdate {
            user_id: UserId::from("d1"),
            is_available: false,
            lat: None,
            lng: None,
        })
        .await
        .expect("update");

    let requests = backend.requests().await;
    assert_eq!(
        requests[0].body,
        json!({ "user_id": "d1", "is_available": false, "lat": null, "lng": null })
    );
}

#[tokio::test]
async fn list_rides_url_encodes_rider_id() {
    let (url, backend) = spawn_backend(vec![(
        Method::GET,
        "/api/rides",
        StatusCode::OK,
        "[]".to_string(),
    )])
    .await;
    let client = BikeTaxiClient::new(&url).expect("client");

    let rides = client
        .list_rides(Some(&UserId::from("a&b=c d")))
        .await
        .expect("rides");
    assert!(rides.is_empty());

    let requests = backend.requests().await;
    assert_eq!(requests[0].query.as_deref(), Some("rider_id=a%26b%3Dc+d"));
}

#[tokio::test]
async fn list_rides_without_rider_sends_empty_filter() {
    let (status, body) = ok_json(json!([
        { "id": "ride1", "pickup": "Downtown Plaza", "dropoff": "City Park Gate", "status": "requested", "driver_id": null },
        { "id": "ride2", "pickup": "A", "dropoff": "B", "status": "en_route", "driver_id": "d1" },
    ]));
    let (url, backend) = spawn_backend(vec![(Method::GET, "/api/rides", status, body)]).await;
    let client = BikeTaxiClient::new(&url).expect("client");

    let rides = client.list_rides(None).await.expect("rides");
    assert_eq!(rides[0].status, RideStatus::Requested);
    assert_eq!(rides[1].status, RideStatus::Other("en_route".to_string()));
    assert_eq!(rides[1].driver_id, Some(UserId::from("d1")));

    let requests = backend.requests().await;
    assert_eq!(requests[0].query.as_deref(), Some("rider_id="));
}

#[tokio::test]
async fn ride_actions_target_encoded_ride_path() {
    let (url, backend) = spawn_backend(vec![
        (
            Method::POST,
            "/api/rides/ride%2F1/assign",
            StatusCode::OK,
            "{}".to_string(),
        ),
        (
            Method::POST,
            "/api/rides/ride%2F1/status",
            StatusCode::OK,
            "{}".to_string(),
        ),
    ])
    .await;
    let client = BikeTaxiClient::new(&url).expect("client");
    let ride_id = RideId::from("ride/1");

    client
        .assign_driver(&ride_id, &UserId::from("d1"))
        .await
        .expect("assign");
    client
        .update_ride_status(&ride_id, RideTransition::PickedUp)
        .await
        .expect("status");

    let requests = backend.requests().await;
    assert_eq!(requests[0].body, json!({ "driver_id": "d1" }));
    assert_eq!(requests[1].body, json!({ "status": "picked_up" }));
}

#[tokio::test]
async fn request_ride_returns_created_ride_id() {
    let (status, body) = ok_json(json!({ "id": "ride1", "status": "requested" }));
    let (url, backend) = spawn_backend(vec![(Method::POST, "/api/rides", status, body)]).await;
    let client = BikeTaxiClient::new(&format!("{url}/")).expect("client");

    let ride_id = client
        .request_ride(&RideRequest {
            rider_id: UserId::from("r1"),
            pickup: "Downtown Plaza".to_string(),
            dropoff: "City Park Gate".to_string(),
        })
        .await
        .expect("ride");
    assert_eq!(ride_id, RideId::from("ride1"));

    let requests = backend.requests().await;
    assert_eq!(requests[0].path, "/api/rides");
    assert_eq!(
        requests[0].body,
        json!({ "rider_id": "r1", "pickup": "Downtown Plaza", "dropoff": "City Park Gate" })
    );
}

#[tokio::test]
async fn non_success_status_is_reported_with_operation() {
    let (url, _backend) = spawn_backend(vec![(
        Method::POST,
        "/api/users",
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "detail": "name required" }).to_string(),
    )])
    .await;
    let client = BikeTaxiClient::new(&url).expect("client");

    let err = client
        .create_user(&NewUser::active("", Role::Driver))
        .await
        .expect_err("must fail");
    match err {
        ClientError::Status { operation, status } => {
            assert_eq!(operation, Operation::CreateUser);
            assert_eq!(status, reqwest::StatusCode::UNPROCESSABLE_ENTITY);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (url, _backend) = spawn_backend(vec![(
        Method::GET,
        "/api/drivers",
        StatusCode::OK,
        "not json".to_string(),
    )])
    .await;
    let client = BikeTaxiClient::new(&url).expect("client");

    let err = client.list_drivers().await.expect_err("must fail");
    assert!(matches!(
        err,
        ClientError::Decode {
            operation: Operation::ListDrivers,
            ..
        }
    ));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = BikeTaxiClient::new(&format!("http://{addr}")).expect("client");
    let err = client.list_rides(None).await.expect_err("must fail");
    assert_eq!(err.operation(), Some(Operation::ListRides));
    assert!(matches!(err, ClientError::Transport { .. }));
}

#[test]
fn rejects_unusable_base_urls() {
    assert!(matches!(
        BikeTaxiClient::new("not a url"),
        Err(ClientError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        BikeTaxiClient::new("mailto:ops@example.com"),
        Err(ClientError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn endpoints_keep_base_path_prefix() {
    let client = BikeTaxiClient::new("http://example.com/taxi/").expect("client");
    assert_eq!(
        client.endpoint(&["api", "drivers"]).as_str(),
        "http://example.com/taxi/api/drivers"
    );
}
