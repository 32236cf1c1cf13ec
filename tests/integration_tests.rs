//! Integration tests for the public API dashboard
//!
//! These tests run the full request path, from configuration through the
//! fetchers to the rendered page, against a mock upstream server.

use std::io::Write;
use tempfile::NamedTempFile;

mod common {
    use std::sync::Arc;
    use std::time::Duration;

    use api_dashboard::config::{Config, FeedConfig};
    use api_dashboard::dashboard::Dashboard;
    use api_dashboard::fetcher::build_client;
    use api_dashboard::routes::{router, AppState};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use wiremock::MockServer;

    /// Config with every upstream pointed at the mock server
    pub fn mock_config(server: &MockServer) -> Config {
        let mut config = Config::default();
        config.weather.open_meteo_url = server.uri();
        config.weather.openweather_url = server.uri();
        config.news.hn_search_url = server.uri();
        config.news.feeds = vec![
            FeedConfig {
                name: "World".to_string(),
                url: format!("{}/feeds/world.xml", server.uri()),
            },
            FeedConfig {
                name: "Tech".to_string(),
                url: format!("{}/feeds/tech.xml", server.uri()),
            },
        ];
        config.crypto.coingecko_url = server.uri();
        config.stocks.quote_url = server.uri();
        config
    }

    pub fn create_app(config: &Config) -> Router {
        let client = build_client(Duration::from_secs(5)).unwrap();
        router(Arc::new(AppState {
            title: config.title.clone(),
            dashboard: Dashboard::new(client, config),
        }))
    }

    pub async fn get_page(app: Router) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub fn rss(items: &[(&str, &str)]) -> String {
        let body: String = items
            .iter()
            .map(|(title, link)| format!("<item><title>{}</title><link>{}</link></item>", title, link))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <rss version="2.0"><channel><title>Feed</title><link>https://feed.example.com</link>
            <description>Feed</description>{}</channel></rss>"#,
            body
        )
    }
}

#[cfg(test)]
mod config_integration_tests {
    use super::*;
    use api_dashboard::config::{Config, NewsSource, WeatherProvider};

    #[test]
    fn test_load_shipped_dashboard_config() {
        let config = Config::load("dashboard.toml");
        assert!(config.is_ok(), "Failed to load dashboard.toml: {:?}", config.err());

        let config = config.unwrap();
        assert_eq!(config.weather.provider, WeatherProvider::OpenMeteo);
        assert_eq!(config.weather.city, "Ottawa");
        assert_eq!(config.news.source, NewsSource::Feeds);
        assert!(!config.news.feeds.is_empty(), "dashboard.toml should list feeds");
        assert!(config.request_timeout_secs > 0);
        assert_eq!(config.stocks.symbols.len(), 5);
    }

    #[test]
    fn test_config_file_round_trip() {
        let toml_content = r#"
            title = "Ops Board"

            [weather]
            provider = "open_weather"
            city = "Toronto"
            api_key = "k"

            [news]
            source = "hacker_news"
            limit = 3
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.title, "Ops Board");
        assert_eq!(config.weather.provider, WeatherProvider::OpenWeather);
        assert_eq!(config.weather.city, "Toronto");
        assert_eq!(config.news.source, NewsSource::HackerNews);
        assert_eq!(config.news.limit, 3);
        // Sections left out keep their defaults
        assert_eq!(config.crypto.top_n, 5);
    }
}

#[cfg(test)]
mod end_to_end_tests {
    use super::common::*;
    use api_dashboard::config::WeatherProvider;
    use axum::http::StatusCode;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_markets(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v3/coins/markets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "Bitcoin", "symbol": "btc", "current_price": 67000.0, "price_change_percentage_24h": 1.5},
                {"name": "Ethereum", "symbol": "eth", "price_change_percentage_24h": -2.0}
            ])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v7/finance/quote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "quoteResponse": {"result": [
                    {"symbol": "NVDA", "shortName": "NVIDIA Corporation",
                     "regularMarketPrice": 880.1, "regularMarketChangePercent": 3.3}
                ]}
            })))
            .mount(server)
            .await;
    }

    async fn mount_weather(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("current_weather", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current_weather": {"temperature": 21.4, "weathercode": 3}
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_full_dashboard() {
        let server = MockServer::start().await;
        mount_weather(&server).await;
        mount_markets(&server).await;
        Mock::given(method("GET"))
            .and(path("/feeds/world.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(rss(&[
                ("World headline one", "https://world.example.com/1"),
                ("World headline two", "https://world.example.com/2"),
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/feeds/tech.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(rss(&[(
                "Tech headline",
                "https://tech.example.com/1",
            )])))
            .mount(&server)
            .await;

        let (status, body) = get_page(create_app(&mock_config(&server))).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Ottawa"));
        assert!(body.contains("21&deg;C"));
        assert!(body.contains("Overcast"));

        let first = body.find("World headline one").unwrap();
        let second = body.find("World headline two").unwrap();
        let third = body.find("Tech headline").unwrap();
        assert!(first < second && second < third, "headlines out of source order");

        assert!(body.contains("BTC"));
        assert!(body.contains("67000.00"));
        // Missing price renders as zero
        assert!(body.contains("$0.00"));
        assert!(body.contains("NVIDIA Corporation"));
        assert!(!body.contains("TSLA"), "live quotes should replace the fallback");
    }

    #[tokio::test]
    async fn test_no_news_still_renders_other_sections() {
        let server = MockServer::start().await;
        mount_weather(&server).await;
        mount_markets(&server).await;
        // One feed is down, the other has no usable items
        Mock::given(method("GET"))
            .and(path("/feeds/world.xml"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/feeds/tech.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(rss(&[])))
            .mount(&server)
            .await;

        let (status, body) = get_page(create_app(&mock_config(&server))).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No headlines right now"));
        assert!(body.contains("Overcast"));
        assert!(body.contains("Bitcoin"));
        assert!(body.contains("NVDA"));
    }

    #[tokio::test]
    async fn test_every_upstream_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (status, body) = get_page(create_app(&mock_config(&server))).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Weather data unavailable"));
        assert!(body.contains("No headlines right now"));
        assert!(body.contains("Crypto prices unavailable"));
        for symbol in ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"] {
            assert!(body.contains(symbol), "fallback quote {} missing", symbol);
        }
    }

    #[tokio::test]
    async fn test_hacker_news_source() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/search"))
            .and(query_param("tags", "front_page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hits": [
                    {"title": "Front page story", "url": "https://story.example.com"},
                    {"title": "Dropped: no url"}
                ]
            })))
            .mount(&server)
            .await;

        let mut config = mock_config(&server);
        config.news.source = api_dashboard::config::NewsSource::HackerNews;

        let (_, body) = get_page(create_app(&config)).await;

        assert!(body.contains("Front page story"));
        assert!(!body.contains("Dropped: no url"));
    }

    #[tokio::test]
    async fn test_openweather_without_key_skips_weather() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = mock_config(&server);
        config.weather.provider = WeatherProvider::OpenWeather;
        config.weather.api_key = None;

        let (status, body) = get_page(create_app(&config)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Weather data unavailable"));
    }

    #[tokio::test]
    async fn test_openweather_with_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Ottawa",
                "main": {"temp": -7.8, "feels_like": -14.5},
                "weather": [{"description": "light snow"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = mock_config(&server);
        config.weather.provider = WeatherProvider::OpenWeather;
        config.weather.api_key = Some("test-key".to_string());

        let (_, body) = get_page(create_app(&config)).await;

        assert!(body.contains("-8&deg;C"));
        assert!(body.contains("Feels like -15&deg;C"));
        assert!(body.contains("Light Snow"));
    }
}
