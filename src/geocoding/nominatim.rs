//! Address lookups against a Nominatim search endpoint.

use super::{Coordinates, GeocodeError, GeocodeProvider};
use crate::config::GeocodingSettings;
use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// `GET {endpoint}?q=..&format=json&limit=1`; an empty array means "no result".
pub struct NominatimProvider {
    client: Client,
    endpoint: String,
    user_agent: String,
    accept_language: String,
}

impl NominatimProvider {
    pub fn new(client: Client, settings: &GeocodingSettings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.clone(),
            user_agent: settings.user_agent.clone(),
            accept_language: settings.accept_language.clone(),
        }
    }
}

#[async_trait]
impl GeocodeProvider for NominatimProvider {
    #[instrument(skip(self))]
    async fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT_LANGUAGE, &self.accept_language)
            .send()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;
        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Decode(e.to_string()))?;
        debug!(results = places.len(), "Lookup answered");

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };
        let parse = |value: &str| {
            value
                .parse::<f64>()
                .map_err(|e| GeocodeError::Decode(format!("{value}: {e}")))
        };
        Ok(Some(Coordinates {
            lat: parse(&place.lat)?,
            lng: parse(&place.lon)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> NominatimProvider {
        let settings = GeocodingSettings {
            endpoint: format!("{}/search", server.uri()),
            ..GeocodingSettings::default()
        };
        NominatimProvider::new(Client::new(), &settings)
    }

    #[tokio::test]
    async fn test_lookup_sends_query_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Av. Paulista, 1000"))
            .and(query_param("format", "json"))
            .and(query_param("limit", "1"))
            .and(header("accept-language", "pt-BR,pt;q=0.9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"lat": "-23.5614", "lon": "-46.6559", "display_name": "Avenida Paulista"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let found = provider(&server).lookup("Av. Paulista, 1000").await.unwrap();
        assert_eq!(
            found,
            Some(Coordinates {
                lat: -23.5614,
                lng: -46.6559
            })
        );
    }

    #[tokio::test]
    async fn test_empty_answer_is_no_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        assert_eq!(provider(&server).lookup("nowhere").await, Ok(None));
    }

    #[tokio::test]
    async fn test_server_error_is_a_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(matches!(
            provider(&server).lookup("Rua A").await,
            Err(GeocodeError::Request(_))
        ));
    }
}
