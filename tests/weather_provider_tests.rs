// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather provider client, `/api/weather` route and provider-verified
//! favorites, against a mock provider.

use axum::http::StatusCode;
use cloudify::db::{FavoritesStore, MemoryDb};
use cloudify::routes::create_router;
use cloudify::services::{WeatherClient, WeatherError};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

fn oslo_payload() -> serde_json::Value {
    json!({
        "coord": {"lon": 10.75, "lat": 59.91},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 4.2, "feels_like": 1.1, "humidity": 76, "pressure": 1009},
        "wind": {"speed": 3.6, "deg": 190},
        "name": "Oslo",
        "cod": 200
    })
}

async fn mock_provider() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "oslo"))
        .and(query_param("appid", "test-weather-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(oslo_payload()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Atlantis"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn test_client_parses_current_conditions() {
    let server = mock_provider().await;
    let client = WeatherClient::new(server.uri(), Some("test-weather-key".into()), "metric").unwrap();

    let current = client.current("oslo").await.unwrap();
    assert_eq!(current.name, "Oslo");
    assert_eq!(current.main.temp, 4.2);
    assert_eq!(current.weather[0].main, "Clouds");
}

#[tokio::test]
async fn test_client_distinguishes_not_found_from_bad_key() {
    let server = mock_provider().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("appid", "revoked"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"cod": 401})))
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri(), Some("test-weather-key".into()), "metric").unwrap();
    let err = client.current("Atlantis").await.unwrap_err();
    assert!(matches!(err, WeatherError::CityNotFound(ref c) if c == "Atlantis"));

    let client = WeatherClient::new(server.uri(), Some("revoked".into()), "metric").unwrap();
    let err = client.current("oslo").await.unwrap_err();
    assert!(matches!(err, WeatherError::InvalidCredentials));
}

#[tokio::test]
async fn test_client_upstream_failure_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri(), Some("k".into()), "metric").unwrap();
    let err = client.current("Oslo").await.unwrap_err();
    assert!(matches!(err, WeatherError::Unavailable(ref msg) if msg.contains("maintenance")));
}

#[tokio::test]
async fn test_weather_route_returns_report() {
    let server = mock_provider().await;
    let state = common::test_state(FavoritesStore::Memory(MemoryDb::new()), &server.uri(), false);
    let app = create_router(state);

    let response = app
        .oneshot(common::json_request("GET", "/api/weather?city=oslo", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        common::body_json(response).await,
        json!({
            "name": "Oslo",
            "temperature": 4.2,
            "feelsLike": 1.1,
            "humidity": 76.0,
            "windSpeed": 3.6,
            "condition": "Clouds",
            "description": "broken clouds"
        })
    );
}

#[tokio::test]
async fn test_weather_route_error_mapping() {
    let server = mock_provider().await;
    let state = common::test_state(FavoritesStore::Memory(MemoryDb::new()), &server.uri(), false);
    let app = create_router(state);

    let response = app
        .clone()
        .oneshot(common::json_request("GET", "/api/weather?city=Atlantis", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::body_json(response).await["error"], "city_not_found");

    let response = app
        .clone()
        .oneshot(common::json_request("GET", "/api/weather", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unreachable provider
    let state = common::test_state(FavoritesStore::Memory(MemoryDb::new()), "http://127.0.0.1:1", false);
    let response = create_router(state)
        .oneshot(common::json_request("GET", "/api/weather?city=Oslo", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(common::body_json(response).await["error"], "weather_unavailable");
}

#[tokio::test]
async fn test_verified_add_stores_canonical_name() {
    let server = mock_provider().await;
    let state = common::test_state(FavoritesStore::Memory(MemoryDb::new()), &server.uri(), true);
    let token = common::create_test_jwt("alice", &state.config.jwt_signing_key);
    let app = create_router(state);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/favorites",
            Some(&token),
            Some(json!({"cityName": "oslo"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(common::body_json(response).await["cityName"], "Oslo");

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/favorites",
            Some(&token),
            Some(json!({"cityName": "Atlantis"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
