use axum::{
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use farmer_reference_data::{
    MarketPriceQuery, ReferenceDataClient, ReferenceDataConfig, ReferenceDataError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;

async fn pest_alerts() -> Json<serde_json::Value> {
    Json(json!([
        {
            "id": "pa-1",
            "crop": "cotton",
            "pestName": "pink bollworm",
            "severity": "high",
            "region": "Vidarbha",
            "advisory": "Install pheromone traps",
            "issuedOn": "2024-08-02"
        },
        { "id": "pa-2", "crop": "paddy", "pestName": "brown planthopper" }
    ]))
}

async fn market_prices(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    let all = vec![
        json!({"commodity": "Onion", "market": "Lasalgaon", "state": "Maharashtra", "modalPrice": 1850.0}),
        json!({"commodity": "Onion", "market": "Kurnool", "state": "Andhra Pradesh", "modalPrice": 1600.0}),
        json!({"commodity": "Tomato", "market": "Kolar", "state": "Karnataka", "modalPrice": 900.0}),
    ];
    let matches = |record: &serde_json::Value, key: &str| {
        params
            .get(key)
            .map_or(true, |wanted| record[key].as_str() == Some(wanted.as_str()))
    };
    Json(serde_json::Value::Array(
        all.into_iter()
            .filter(|r| matches(r, "commodity") && matches(r, "state"))
            .collect(),
    ))
}

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/api")
}

fn client(base_url: String) -> ReferenceDataClient {
    ReferenceDataClient::new(ReferenceDataConfig {
        base_url,
        ..Default::default()
    })
    .expect("client")
}

fn healthy_app() -> Router {
    Router::new()
        .route("/api/pest-alerts", get(pest_alerts))
        .route("/api/market-prices", get(market_prices))
        .route(
            "/api/schemes",
            get(|| async {
                Json(json!([{
                    "id": "pm-kisan",
                    "name": "PM-KISAN",
                    "benefits": "Rs 6000 per year in three instalments",
                    "link": "https://pmkisan.gov.in"
                }]))
            }),
        )
}

#[tokio::test]
async fn fetches_pest_alerts() {
    let client = client(spawn_server(healthy_app()).await);

    let alerts = client.pest_alerts().await.expect("alerts");
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].pest_name, "pink bollworm");
    assert_eq!(alerts[0].issued_on, "2024-08-02");
    assert_eq!(alerts[1].severity, "");
}

#[tokio::test]
async fn market_price_filters_reach_the_server() {
    let client = client(spawn_server(healthy_app()).await);

    let everything = client
        .market_prices(&MarketPriceQuery::default())
        .await
        .expect("prices");
    assert_eq!(everything.len(), 3);

    let onions = client
        .market_prices(&MarketPriceQuery::default().commodity("Onion"))
        .await
        .expect("prices");
    let markets: Vec<_> = onions.iter().map(|p| p.market.as_str()).collect();
    assert_eq!(markets, vec!["Lasalgaon", "Kurnool"]);

    let local = client
        .market_prices(&MarketPriceQuery::default().commodity("Onion").state("Maharashtra"))
        .await
        .expect("prices");
    assert_eq!(local.len(), 1);
    assert_eq!(local[0].modal_price, 1850.0);
}

#[tokio::test]
async fn fetches_government_schemes() {
    let client = client(spawn_server(healthy_app()).await);

    let schemes = client.government_schemes().await.expect("schemes");
    assert_eq!(schemes.len(), 1);
    assert_eq!(schemes[0].name, "PM-KISAN");
    assert_eq!(schemes[0].link.as_deref(), Some("https://pmkisan.gov.in"));
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let app = Router::new().route(
        "/api/pest-alerts",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE.into_response() }),
    );
    let client = client(spawn_server(app).await);

    match client.pest_alerts().await {
        Err(ReferenceDataError::Status { status, url }) => {
            assert_eq!(status, 503);
            assert!(url.ends_with("/api/pest-alerts"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_resource_is_an_error() {
    let client = client(spawn_server(Router::new()).await);

    assert!(matches!(
        client.government_schemes().await,
        Err(ReferenceDataError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn empty_body_is_an_error() {
    let app = Router::new().route(
        "/api/schemes",
        get(|| async { (StatusCode::OK, "  \n").into_response() }),
    );
    let client = client(spawn_server(app).await);

    assert!(matches!(
        client.government_schemes().await,
        Err(ReferenceDataError::EmptyBody(_))
    ));
}

#[tokio::test]
async fn non_array_body_is_a_decode_error() {
    let app = Router::new().route(
        "/api/market-prices",
        get(|| async { Json(json!({"error": "quota exceeded"})).into_response() }),
    );
    let client = client(spawn_server(app).await);

    let result: Result<_, ReferenceDataError> =
        client.market_prices(&MarketPriceQuery::default()).await;
    assert!(matches!(result, Err(ReferenceDataError::Decode(_))));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = client(format!("http://{addr}/api"));
    assert!(matches!(
        client.pest_alerts().await,
        Err(ReferenceDataError::Transport(_))
    ));
}
