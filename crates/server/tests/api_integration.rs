use std::{net::SocketAddr, time::Duration};

use clickhouse::test::{self, Mock, handlers};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::{
    net::{TcpListener, TcpStream},
    time::{Instant, sleep},
};
use url::Url;

use api::ApiState;
use axum::serve;
use clickhouse_lib::{ClickhouseReader, HazardCountRow, MonthlyApproachRow};
use server::{API_VERSION, router};

async fn spawn_server(client: ClickhouseReader) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let allowed = config::DEFAULT_ALLOWED_ORIGINS.split(',').map(|s| s.to_owned()).collect();
    let app = router(ApiState::new(client), allowed);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        serve(listener, app.into_make_service()).await.unwrap();
    });
    (addr, handle)
}

async fn wait_for_server(addr: SocketAddr) {
    let start = Instant::now();
    loop {
        if TcpStream::connect(addr).await.is_ok() {
            break;
        }
        if start.elapsed() > Duration::from_secs(5) {
            panic!("server did not start in time");
        }
        sleep(Duration::from_millis(10)).await;
    }
}

fn reader(mock: &Mock) -> ClickhouseReader {
    let url = Url::parse(mock.url()).unwrap();
    ClickhouseReader::new(url, "neo".to_owned(), "user".into(), "pass".into()).unwrap()
}

#[tokio::test]
async fn health_integration() {
    let mock = Mock::new();
    let (addr, server) = spawn_server(reader(&mock)).await;
    wait_for_server(addr).await;

    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    server.abort();
}

#[tokio::test]
async fn catalogue_listing_integration() {
    let mock = Mock::new();
    let (addr, server) = spawn_server(reader(&mock)).await;
    wait_for_server(addr).await;

    let resp = reqwest::get(format!("http://{addr}/{API_VERSION}/queries")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    let ids: Vec<_> =
        body["queries"].as_array().unwrap().iter().map(|q| q["id"].as_str().unwrap()).collect();
    let expected: Vec<String> = (1..=15).map(|n| format!("q{n}")).collect();
    assert_eq!(ids, expected);

    server.abort();
}

#[tokio::test]
async fn hazard_breakdown_integration() {
    let mock = Mock::new();
    mock.add(handlers::provide(vec![
        HazardCountRow { is_potentially_hazardous_asteroid: false, count: 1 },
        HazardCountRow { is_potentially_hazardous_asteroid: true, count: 2 },
    ]));
    let (addr, server) = spawn_server(reader(&mock)).await;
    wait_for_server(addr).await;

    let resp = reqwest::get(format!("http://{addr}/{API_VERSION}/queries/q13")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["query"]["label"], "Get number of hazardous vs non-hazardous asteroids");
    assert_eq!(
        body["table"],
        json!({
            "columns": ["is_potentially_hazardous_asteroid", "count"],
            "rows": [[false, 1], [true, 2]]
        })
    );

    server.abort();
}

#[tokio::test]
async fn monthly_approaches_integration() {
    let mock = Mock::new();
    mock.add(handlers::provide(vec![
        MonthlyApproachRow { month: "2024-01".to_owned(), total_approaches: 3 },
        MonthlyApproachRow { month: "2024-02".to_owned(), total_approaches: 1 },
    ]));
    let (addr, server) = spawn_server(reader(&mock)).await;
    wait_for_server(addr).await;

    let resp = reqwest::get(format!("http://{addr}/{API_VERSION}/queries/11")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["table"]["rows"], json!([["2024-01", 3], ["2024-02", 1]]));

    server.abort();
}

#[tokio::test]
async fn unknown_query_integration() {
    let mock = Mock::new();
    let (addr, server) = spawn_server(reader(&mock)).await;
    wait_for_server(addr).await;

    let resp = reqwest::get(format!("http://{addr}/{API_VERSION}/queries/q0")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    server.abort();
}

#[tokio::test]
async fn inverted_dates_integration() {
    let mock = Mock::new();
    let (addr, server) = spawn_server(reader(&mock)).await;
    wait_for_server(addr).await;

    let resp = reqwest::get(format!(
        "http://{addr}/{API_VERSION}/approaches?start_date=2024-06-01&end_date=2024-01-01"
    ))
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["type"], "invalid-params");
    assert_eq!(body["status"], 400);

    server.abort();
}

#[tokio::test]
async fn database_error_integration() {
    let mock = Mock::new();
    mock.add(handlers::failure(test::status::INTERNAL_SERVER_ERROR));
    let (addr, server) = spawn_server(reader(&mock)).await;
    wait_for_server(addr).await;

    let resp = reqwest::get(format!("http://{addr}/{API_VERSION}/approaches")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    server.abort();
}
