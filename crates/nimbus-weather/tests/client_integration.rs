//! Integration tests for WeatherClient using wiremock.
//!
//! These tests verify URL construction, response parsing and error-message
//! extraction against a mock HTTP server.

use nimbus_core::{Config, Coordinates, Unit, WeatherError};
use nimbus_weather::WeatherClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> Config {
    let mut config = Config::new("test-key");
    config.weather_base_url = server.uri();
    config.geocode_base_url = server.uri();
    config
}

fn current_weather_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Paris",
        "main": {
            "temp": 21.3,
            "feels_like": 20.9,
            "temp_min": 19.0,
            "temp_max": 23.1,
            "pressure": 1014,
            "humidity": 56
        },
        "weather": [
            { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }
        ],
        "sys": { "country": "FR", "sunrise": 1700000000i64, "sunset": 1700040000i64 },
        "wind": { "speed": 3.6, "deg": 220 },
        "timezone": 7200,
        "cod": 200
    })
}

#[tokio::test]
async fn test_fetch_current_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("lon", "2.3522"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body()))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(&test_config(&mock_server)).unwrap();
    let current = client
        .fetch_current(Coordinates::new(48.8566, 2.3522), Unit::Metric)
        .await
        .unwrap();

    assert_eq!(current.name, "Paris");
    assert_eq!(current.timezone, 7200);
    assert_eq!(current.condition().map(|c| c.id), Some(800));
}

#[tokio::test]
async fn test_fetch_current_imperial_units() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(&test_config(&mock_server)).unwrap();
    client
        .fetch_current(Coordinates::new(48.8566, 2.3522), Unit::Imperial)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_fetch_forecast_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [
                {
                    "dt": 1700001000i64,
                    "main": {
                        "temp": 12.0,
                        "feels_like": 11.2,
                        "temp_min": 11.0,
                        "temp_max": 12.5,
                        "pressure": 1009,
                        "humidity": 80
                    },
                    "weather": [
                        { "id": 500, "main": "Rain", "description": "light rain", "icon": "10n" }
                    ],
                    "pop": 0.42,
                    "sys": { "pod": "n" }
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(&test_config(&mock_server)).unwrap();
    let forecast = client
        .fetch_forecast(Coordinates::new(48.8566, 2.3522), Unit::Metric)
        .await
        .unwrap();

    assert_eq!(forecast.list.len(), 1);
    assert_eq!(forecast.list[0].dt, 1700001000);
    assert!(forecast.list[0].part_of_day().is_night());
}

#[tokio::test]
async fn test_fetch_city_suggestions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/direct"))
        .and(query_param("q", "paris"))
        .and(query_param("limit", "6"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "Paris", "lat": 48.8566, "lon": 2.3522, "country": "FR" },
            { "name": "Paris", "lat": 33.6609, "lon": -95.5555, "country": "US", "state": "Texas" }
        ])))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(&test_config(&mock_server)).unwrap();
    let results = client.fetch_city_suggestions("paris", 6).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].display_name(), "Paris, FR");
    assert_eq!(results[1].display_name(), "Paris, Texas, US");
}

#[tokio::test]
async fn test_not_found_uses_api_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(&test_config(&mock_server)).unwrap();
    let err = client
        .fetch_current(Coordinates::new(0.0, 0.0), Unit::Metric)
        .await
        .unwrap_err();

    match err {
        WeatherError::Api { message } => assert_eq!(message, "city not found"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_without_body_mentions_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(&test_config(&mock_server)).unwrap();
    let err = client
        .fetch_current(Coordinates::new(0.0, 0.0), Unit::Metric)
        .await
        .unwrap_err();

    match err {
        WeatherError::Api { message } => {
            assert!(message.contains("500"), "message: {message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_with_unparseable_body_mentions_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(&test_config(&mock_server)).unwrap();
    let err = client
        .fetch_current(Coordinates::new(0.0, 0.0), Unit::Metric)
        .await
        .unwrap_err();

    match err {
        WeatherError::Api { message } => {
            assert_eq!(message, "Request failed with status 502");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_suggestions_is_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = WeatherClient::new(&test_config(&mock_server)).unwrap();
    let results = client.fetch_city_suggestions("nowhere", 6).await.unwrap();
    assert!(results.is_empty());
}
