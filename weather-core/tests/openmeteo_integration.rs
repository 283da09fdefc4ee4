//! Integration tests for the Open-Meteo provider using wiremock.

use std::{sync::Arc, time::Duration};

use weather_collector_core::{
    FetchError, PollError, Poller, PrecipitationType, ReadingStore, WeatherProvider,
    WindDirection,
    config::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE},
    provider::openmeteo::{HOURLY_METRICS, OpenMeteoProvider},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body(precipitation: f64) -> serde_json::Value {
    serde_json::json!({
        "latitude": 55.7,
        "longitude": 37.36,
        "current_weather": {
            "temperature": 12.3,
            "windspeed": 4.1,
            "winddirection": 200.0,
            "weathercode": 3,
            "time": "2024-05-01T12:00"
        },
        "hourly": {
            "time": ["2024-05-01T12:00", "2024-05-01T13:00"],
            "pressure_msl": [1013.25, 1012.0],
            "precipitation": [precipitation, 0.0]
        }
    })
}

fn provider_for(server: &MockServer) -> OpenMeteoProvider {
    OpenMeteoProvider::new(
        format!("{}/v1/forecast", server.uri()),
        DEFAULT_LATITUDE,
        DEFAULT_LONGITUDE,
    )
}

#[tokio::test]
async fn test_fetch_sends_expected_query_and_maps_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "55.69782222"))
        .and(query_param("longitude", "37.36156389"))
        .and(query_param("current_weather", "true"))
        .and(query_param("hourly", HOURLY_METRICS))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(2.5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let obs = provider_for(&mock_server).fetch().await.unwrap();

    assert_eq!(obs.temperature_c, 12.3);
    assert_eq!(obs.wind_speed_mps, 4.1);
    assert_eq!(obs.wind_direction, WindDirection::S);
    assert!((obs.pressure_mmhg - 1013.25 * 0.75006).abs() < 1e-9);
    assert_eq!(obs.precipitation_mm, 2.5);
    assert_eq!(obs.precipitation_type, PrecipitationType::Rain);
}

#[tokio::test]
async fn test_fetch_dry_hour_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(0.0)))
        .mount(&mock_server)
        .await;

    let obs = provider_for(&mock_server).fetch().await.unwrap();

    assert_eq!(obs.precipitation_type, PrecipitationType::None);
}

#[tokio::test]
async fn test_fetch_server_error_surfaces_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server).fetch().await.unwrap_err();

    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_malformed_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"current_weather\": {}}"))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server).fetch().await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_poll_once_persists_fetched_reading() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(0.0)))
        .mount(&mock_server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let store = ReadingStore::open(tmp.path().join("weather_data.db")).unwrap();
    let poller = Poller::new(
        Arc::new(provider_for(&mock_server)),
        store.clone(),
        Duration::from_secs(180),
    );

    let reading = poller.poll_once().await.unwrap();

    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(store.most_recent(1).unwrap(), vec![reading]);
}

#[tokio::test]
async fn test_poll_once_on_api_failure_stores_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let store = ReadingStore::open(tmp.path().join("weather_data.db")).unwrap();
    let poller = Poller::new(
        Arc::new(provider_for(&mock_server)),
        store.clone(),
        Duration::from_secs(180),
    );

    let err = poller.poll_once().await.unwrap_err();

    assert!(matches!(err, PollError::Fetch(FetchError::Status { .. })));
    assert_eq!(store.count().unwrap(), 0);
}
