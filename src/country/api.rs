use reqwest::StatusCode;
use tracing::debug;

use super::model::CountryInfo;
use crate::error::ApiError;
use crate::http::{self, ClientHandle};

const SEARCH_PATH: &str = "/search";
const RANDOM_PATH: &str = "/random";

/// Typed calls against the Country Info API.
pub struct CountryApi<'a> {
    handle: &'a ClientHandle,
}

impl CountryApi<'static> {
    pub fn shared() -> Self {
        Self::new(http::client())
    }
}

impl<'a> CountryApi<'a> {
    pub fn new(handle: &'a ClientHandle) -> Self {
        Self { handle }
    }

    /// Look a country up by common name. `Ok(None)` when the server has no match.
    pub async fn search(&self, name: &str) -> Result<Option<CountryInfo>, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::EmptyQuery);
        }

        match self.handle.get(SEARCH_PATH, &[("country", name)]).await {
            Ok(info) => Ok(Some(info)),
            Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => {
                debug!(name, "no country matched");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn random(&self) -> Result<CountryInfo, ApiError> {
        self.handle.get(RANDOM_PATH, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use reqwest::StatusCode;
    use serde_json::{Value, json};
    use url::Url;

    use super::*;
    use crate::country::model::Population;
    use crate::http::{ClientConfig, LogLevel};

    fn handle_for(server: &MockServer) -> ClientHandle {
        ClientHandle::new(ClientConfig {
            base_url: Url::parse(&server.base_url()).unwrap(),
            log_level: LogLevel::Body,
        })
        .unwrap()
    }

    fn japan() -> Value {
        json!({
            "country": "Japan",
            "country_code": "JP",
            "continent": "Asia",
            "capital": "Tokyo",
            "population": 125836021,
            "timezones": ["UTC+09:00"],
            "currency": { "code": "JPY", "name": "Japanese yen", "symbol": "¥" },
            "flag_url": "https://flagcdn.com/w320/jp.png"
        })
    }

    #[tokio::test]
    async fn search_returns_matching_country() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/search").query_param("country", "japan");
                then.status(200).json_body(japan());
            })
            .await;

        let handle = handle_for(&server);
        let info = CountryApi::new(&handle)
            .search("  japan ")
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(info.country, "Japan");
        assert_eq!(info.capital, "Tokyo");
        assert_eq!(info.population, Population::Count(125_836_021));
    }

    #[tokio::test]
    async fn search_maps_not_found_to_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(404)
                    .json_body(json!({ "error": "Country 'Atlantis' not found" }));
            })
            .await;

        let handle = handle_for(&server);
        let result = CountryApi::new(&handle).search("Atlantis").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn search_rejects_blank_name_without_a_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.path("/search");
                then.status(500);
            })
            .await;

        let handle = handle_for(&server);
        let err = CountryApi::new(&handle).search("   ").await.unwrap_err();

        assert!(matches!(err, ApiError::EmptyQuery));
        assert_eq!(mock.calls_async().await, 0);
    }

    #[tokio::test]
    async fn random_returns_country() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/random");
                then.status(200).json_body(japan());
            })
            .await;

        let handle = handle_for(&server);
        let info = CountryApi::new(&handle).random().await.unwrap();
        assert_eq!(info.country_code, "JP");
    }

    #[tokio::test]
    async fn random_surfaces_empty_dataset() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/random");
                then.status(500).json_body(json!({ "error": "No data available" }));
            })
            .await;

        let handle = handle_for(&server);
        let err = CountryApi::new(&handle).random().await.unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "No data available");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
