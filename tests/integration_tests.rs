//! Integration tests using wiremock to simulate the OpenDota API, plus a
//! scripted transport for timing-sensitive retry and cancellation behavior.

use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, StatusCode};
use opendota::cancel::CancelSource;
use opendota::models::{Hero, WinLoss};
use opendota::resources::PlayerQuery;
use opendota::transport::{Transport, TransportError, TransportRequest, TransportResponse};
use opendota::{
    ApiRequest, Client, Error, ErrorKind, OpenDota, Query, RequestOptions, TimeoutReason,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> OpenDota {
    OpenDota::from_client(
        Client::builder()
            .base_url(server.uri())
            .unwrap()
            .retry_base_delay(Duration::from_millis(10))
            .build()
            .unwrap(),
    )
}

/// A transport that plays back canned outcomes and records every request.
/// Once the script runs out it waits for the request's signal forever.
#[derive(Clone, Default)]
struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Result<TransportResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self::default()
    }

    fn respond(self, status: u16, body: Value) -> Self {
        self.respond_with_headers(status, body, &[])
    }

    fn respond_with_headers(self, status: u16, body: Value, headers: &[(&str, &str)]) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        self.script.lock().unwrap().push_back(Ok(TransportResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: map,
            body: serde_json::to_vec(&body).unwrap(),
        }));
        self
    }

    fn fail(self, error: TransportError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> TransportRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let signal = request.signal.clone();
        self.requests.lock().unwrap().push(request);

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(outcome) => outcome,
            None => {
                match signal {
                    Some(signal) => signal.cancelled().await,
                    None => std::future::pending().await,
                }
                Err(TransportError::Cancelled)
            }
        }
    }
}

fn scripted_client(transport: &ScriptedTransport, max_retries: u32, base_delay_ms: u64) -> Client {
    Client::builder()
        .max_retries(max_retries)
        .retry_base_delay(Duration::from_millis(base_delay_ms))
        .transport(transport.clone())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_successful_get_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/123/wl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "win": 10, "lose": 5 }))
                .insert_header("X-Rate-Limit-Remaining-Minute", "45")
                .insert_header("X-Rate-Limit-Remaining-Day", "1500"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let response = api
        .players()
        .win_loss(123, &PlayerQuery::default())
        .await
        .unwrap();

    assert_eq!(response.data, WinLoss { win: 10, lose: 5 });
    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.attempts, 1);
    assert!(!response.was_retried());
    assert_eq!(response.rate_limit.remaining_minute, Some(45));
    assert_eq!(response.rate_limit.remaining_day, Some(1500));
}

#[tokio::test]
async fn test_rate_limit_headers_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&mock_server)
        .await;

    let response = api_for(&mock_server).health().get().await.unwrap();

    assert_eq!(response.data, json!({ "ok": true }));
    assert_eq!(response.rate_limit.remaining_minute, None);
    assert_eq!(response.rate_limit.remaining_day, None);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/matches/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Not Found" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = api_for(&mock_server).matches().get(1).await;

    match result {
        Err(err @ Error::NotFound { .. }) => {
            assert_eq!(err.kind(), ErrorKind::NotFound);
            assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
            assert!(err.to_string().starts_with("Not found: "));
            assert!(err.to_string().ends_with("/matches/1"));
        }
        other => panic!("Expected NotFound, got {:?}", other.map(|r| r.data)),
    }
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid account id" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = api_for(&mock_server).players().get(1).await;

    match result {
        Err(err @ Error::Api { .. }) => {
            assert_eq!(err.kind(), ErrorKind::Api);
            assert_eq!(err.to_string(), "API error: 400");
            assert!(!err.is_retryable());
            if let Error::Api { status, body, .. } = err {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, Some(json!({ "error": "invalid account id" })));
            }
        }
        other => panic!("Expected Api error, got {:?}", other.map(|r| r.data)),
    }
}

#[tokio::test]
async fn test_retry_on_5xx_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/heroes"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/heroes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "npc_dota_hero_antimage", "localized_name": "Anti-Mage",
              "primary_attr": "agi", "attack_type": "Melee", "roles": ["Carry"] }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = api_for(&mock_server).heroes().list().await.unwrap();

    assert_eq!(response.attempts, 2);
    assert!(response.was_retried());
    let heroes: &Vec<Hero> = &response;
    assert_eq!(heroes[0].localized_name, "Anti-Mage");
}

#[tokio::test]
async fn test_deserialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/5/wl"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = api_for(&mock_server)
        .players()
        .win_loss(5, &PlayerQuery::default())
        .await;

    match result {
        Err(err @ Error::Deserialization { .. }) => {
            assert_eq!(err.kind(), ErrorKind::Generic);
            if let Error::Deserialization { raw_body, status, .. } = err {
                assert_eq!(raw_body, "not json");
                assert_eq!(status, StatusCode::OK);
            }
        }
        other => panic!("Expected Deserialization error, got {:?}", other.map(|r| r.data)),
    }
}

#[tokio::test]
async fn test_absent_query_values_are_dropped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/7/matches"))
        .and(query_param("limit", "10"))
        .and(query_param("significant", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = PlayerQuery {
        limit: Some(10),
        significant: Some(0),
        ..Default::default()
    };
    api_for(&mock_server)
        .players()
        .matches(7, &query)
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let url = &requests[0].url;
    let keys: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
    assert_eq!(keys, vec!["limit".to_string(), "significant".to_string()]);
}

#[tokio::test]
async fn test_query_with_only_absent_values_has_no_query_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/proMatches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap();
    let _: opendota::Response<Value> = client
        .get(
            "/proMatches",
            Query::new().param_opt("less_than_match_id", None::<u64>),
            RequestOptions::default(),
        )
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_auth_header_only_with_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let keyed = OpenDota::from_client(
        Client::builder()
            .base_url(mock_server.uri())
            .unwrap()
            .api_key("test-api-key")
            .build()
            .unwrap(),
    );
    keyed.status().get().await.unwrap();
    api_for(&mock_server).status().get().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].headers.get("authorization").unwrap(),
        "Bearer test-api-key"
    );
    assert!(requests[1].headers.get("authorization").is_none());
    assert_eq!(requests[1].headers.get("accept").unwrap(), "application/json");
}

#[tokio::test]
async fn test_custom_base_url_with_trailing_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/api/heroStats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = OpenDota::from_client(
        Client::builder()
            .base_url(format!("{}/v2/api/", mock_server.uri()))
            .unwrap()
            .build()
            .unwrap(),
    );
    let response = api.hero_stats().list().await.unwrap();
    assert!(response.data.is_empty());
}

#[tokio::test]
async fn test_post_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/players/42/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "length": 1 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/request/7000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "job": { "jobId": 9 } })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let refreshed = api.players().refresh(42).await.unwrap();
    assert_eq!(refreshed.data, json!({ "length": 1 }));

    let job = api.parse_requests().submit(7000000000).await.unwrap();
    assert_eq!(job.data["job"]["jobId"], 9);

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.headers.get("content-type").is_none()));
}

#[tokio::test]
async fn test_explorer_sends_sql_as_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/explorer"))
        .and(query_param("sql", "SELECT * FROM matches LIMIT 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "command": "SELECT",
            "rowCount": 1,
            "rows": [{ "match_id": 1 }],
            "fields": [{ "name": "match_id", "dataTypeID": 20 }],
            "err": null,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = api_for(&mock_server)
        .explorer()
        .query("SELECT * FROM matches LIMIT 1")
        .await
        .unwrap();

    assert_eq!(result.data.row_count, 1);
    assert_eq!(result.data.fields[0].name, "match_id");
}

#[tokio::test]
async fn test_resource_paths_and_queries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Dendi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "account_id": 70388657, "personaname": "Dendi", "similarity": 1.0 }
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rankings"))
        .and(query_param("hero_id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hero_id": 1, "rankings": [] })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/teams/15/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "account_id": 1, "name": "Puppey", "games_played": 100, "wins": 60,
              "is_current_team_member": true }
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/scenarios/itemTimings"))
        .and(query_param("hero_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/players/9/histograms/kills"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);

    let found = api.search().players("Dendi").await.unwrap();
    assert_eq!(found.data[0].account_id, 70388657);

    let rankings = api.rankings().get(1).await.unwrap();
    assert_eq!(rankings.data.hero_id, 1);

    let players = api.teams().players(15).await.unwrap();
    assert_eq!(players.data[0].is_current_team_member, Some(true));

    let query = opendota::resources::ScenarioQuery {
        hero_id: Some(2),
        lane_role: None,
    };
    api.scenarios().item_timings(&query).await.unwrap();

    api.players()
        .histograms(9, "kills", &PlayerQuery::default())
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_server_errors_exhaust_retries() {
    let transport = ScriptedTransport::new()
        .respond(500, json!({ "error": "boom" }))
        .respond(500, json!({ "error": "boom" }))
        .respond(500, json!({ "error": "boom" }));
    let client = scripted_client(&transport, 2, 100);

    let started = tokio::time::Instant::now();
    let result = client
        .call::<(), Value>(ApiRequest::get("/health"), None)
        .await;
    let elapsed = started.elapsed();

    assert_eq!(transport.calls(), 3);
    match result {
        Err(err @ Error::Api { .. }) => {
            assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
            assert_eq!(err.to_string(), "Server error: 500");
        }
        other => panic!("Expected Api error, got {:?}", other.map(|r| r.data)),
    }

    // 100ms + 200ms of backoff, plus up to 500ms of jitter per retry.
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_millis(1300));
}

#[tokio::test(start_paused = true)]
async fn test_server_error_then_success() {
    let transport = ScriptedTransport::new()
        .respond(500, json!({}))
        .respond(200, json!({ "ok": true }));
    let client = scripted_client(&transport, 3, 100);

    let response = client
        .call::<(), Value>(ApiRequest::get("/health"), None)
        .await
        .unwrap();

    assert_eq!(transport.calls(), 2);
    assert_eq!(response.data, json!({ "ok": true }));
    assert_eq!(response.attempts, 2);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_exhausts_retries() {
    let headers = [
        ("Retry-After", "30"),
        ("X-Rate-Limit-Remaining-Minute", "0"),
        ("X-Rate-Limit-Remaining-Day", "100"),
    ];
    let mut transport = ScriptedTransport::new();
    for _ in 0..4 {
        transport = transport.respond_with_headers(429, json!({}), &headers);
    }
    let client = scripted_client(&transport, 3, 1000);

    let result = client
        .call::<(), Value>(ApiRequest::get("/heroes"), None)
        .await;

    assert_eq!(transport.calls(), 4);
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
    let info = err.rate_limit_info().unwrap();
    assert_eq!(info.remaining_minute, Some(0));
    assert_eq!(info.remaining_day, Some(100));
    assert!(err.to_string().starts_with("Rate limited: "));
}

#[tokio::test(start_paused = true)]
async fn test_zero_retries_makes_one_attempt() {
    let transport = ScriptedTransport::new().respond(502, json!({}));
    let client = scripted_client(&transport, 0, 100);

    let err = client
        .call::<(), Value>(ApiRequest::get("/live"), None)
        .await
        .unwrap_err();

    assert_eq!(transport.calls(), 1);
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
}

#[tokio::test(start_paused = true)]
async fn test_connect_error_is_not_retried() {
    let transport = ScriptedTransport::new()
        .fail(TransportError::Connect("connection refused".into()))
        .respond(200, json!({}));
    let client = scripted_client(&transport, 3, 100);

    let err = client
        .call::<(), Value>(ApiRequest::get("/health"), None)
        .await
        .unwrap_err();

    assert_eq!(transport.calls(), 1);
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn test_other_transport_error_is_generic() {
    let transport = ScriptedTransport::new().fail(TransportError::Other("body stream reset".into()));
    let client = scripted_client(&transport, 3, 100);

    let err = client
        .call::<(), Value>(ApiRequest::get("/health"), None)
        .await
        .unwrap_err();

    assert_eq!(transport.calls(), 1);
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert!(err.to_string().contains("body stream reset"));
}

#[tokio::test(start_paused = true)]
async fn test_caller_cancellation_mid_request() {
    let transport = ScriptedTransport::new();
    let api = OpenDota::from_client(scripted_client(&transport, 3, 100));
    let source = CancelSource::new();

    let canceller = {
        let source = source.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            source.cancel();
        })
    };

    let err = api
        .heroes()
        .with_options(RequestOptions::new().signal(source.signal()))
        .list()
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert_eq!(transport.calls(), 1);
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(err.to_string(), "Request was aborted");
    assert!(matches!(
        err,
        Error::Timeout {
            reason: TimeoutReason::Cancelled,
            ..
        }
    ));
    assert!(!err.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn test_pre_cancelled_signal_skips_the_network() {
    let transport = ScriptedTransport::new().respond(200, json!({}));
    let client = scripted_client(&transport, 3, 100);
    let source = CancelSource::new();
    source.cancel();

    let request = ApiRequest::get("/health")
        .with_options(RequestOptions::new().signal(source.signal()));
    let err = client.call::<(), Value>(request, None).await.unwrap_err();

    assert_eq!(transport.calls(), 0);
    assert!(matches!(
        err,
        Error::Timeout {
            reason: TimeoutReason::Cancelled,
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_elapses() {
    let transport = ScriptedTransport::new();
    let client = Client::builder()
        .timeout(Duration::from_millis(200))
        .transport(transport.clone())
        .build()
        .unwrap();

    let err = client
        .call::<(), Value>(ApiRequest::get("/health"), None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(err.to_string(), "Request timed out after 200ms");
    assert!(err.is_retryable());
    assert!(transport.last_request().signal.unwrap().is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_per_call_timeout_overrides_client_timeout() {
    let transport = ScriptedTransport::new();
    let client = scripted_client(&transport, 0, 100);

    let request = ApiRequest::get("/health")
        .with_options(RequestOptions::new().timeout(Duration::from_millis(50)));
    let err = client.call::<(), Value>(request, None).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Timeout {
            reason: TimeoutReason::Deadline(d),
            ..
        } if d == Duration::from_millis(50)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_spans_backoff() {
    let transport = ScriptedTransport::new()
        .respond(500, json!({}))
        .respond(500, json!({}))
        .respond(500, json!({}));
    let client = Client::builder()
        .retry_base_delay(Duration::from_secs(1))
        .timeout(Duration::from_millis(1500))
        .transport(transport.clone())
        .build()
        .unwrap();

    let err = client
        .call::<(), Value>(ApiRequest::get("/heroes"), None)
        .await
        .unwrap_err();

    assert_eq!(transport.calls(), 2);
    assert!(matches!(
        err,
        Error::Timeout {
            reason: TimeoutReason::Deadline(_),
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_request_carries_headers_and_body() {
    let transport = ScriptedTransport::new().respond(200, json!({}));
    let client = Client::builder()
        .api_key("k")
        .transport(transport.clone())
        .build()
        .unwrap();

    client
        .post::<_, Value>("/request/1", Some(&json!({ "priority": 1 })), RequestOptions::default())
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, http::Method::POST);
    assert_eq!(
        request.url.as_str(),
        "https://api.opendota.com/api/request/1"
    );
    assert_eq!(request.headers["authorization"], "Bearer k");
    assert_eq!(request.headers["content-type"], "application/json");
    assert_eq!(request.body.as_deref(), Some(br#"{"priority":1}"#.as_slice()));
}
