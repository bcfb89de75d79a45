// src/clients/google_maps.rs

use reqwest::Client;
use serde::Deserialize;

use crate::{common::error::AppError, models::functions::GeocodeResponse};

const SERVICE: &str = "Google Maps";
const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
pub struct GeocodeApiResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeApiResponse {
    pub fn into_response(self) -> Result<GeocodeResponse, AppError> {
        match self.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => {
                return Err(AppError::InvalidInput("Endereço não encontrado.".into()));
            }
            other => {
                return Err(AppError::ExternalService {
                    service: SERVICE,
                    message: format!(
                        "{}: {}",
                        other,
                        self.error_message.unwrap_or_default()
                    ),
                });
            }
        }

        let first = self
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::InvalidInput("Endereço não encontrado.".into()))?;

        Ok(GeocodeResponse {
            success: true,
            formatted_address: first.formatted_address,
            lat: first.geometry.location.lat,
            lng: first.geometry.location.lng,
        })
    }
}

#[derive(Clone)]
pub struct GoogleMapsClient {
    http: Client,
    api_key: Option<String>,
}

impl GoogleMapsClient {
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }

    pub async fn geocode(&self, address: &str) -> Result<GeocodeResponse, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::MissingConfiguration(SERVICE))?;

        let response = self
            .http
            .get(GEOCODE_URL)
            .query(&[("address", address), ("key", api_key), ("region", "br"), ("language", "pt-BR")])
            .send()
            .await?
            .error_for_status()?;

        let parsed: GeocodeApiResponse = response.json().await?;
        parsed.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_response_uses_first_result() {
        let raw = r#"{
            "status": "OK",
            "results": [{
                "formatted_address": "Av. Paulista, 1000 - Bela Vista, São Paulo - SP, Brasil",
                "geometry": { "location": { "lat": -23.5646, "lng": -46.6527 } }
            }]
        }"#;
        let parsed: GeocodeApiResponse = serde_json::from_str(raw).unwrap();
        let geo = parsed.into_response().unwrap();
        assert!(geo.success);
        assert_eq!(geo.lat, -23.5646);
        assert_eq!(geo.lng, -46.6527);
    }

    #[test]
    fn zero_results_is_invalid_input() {
        let parsed: GeocodeApiResponse =
            serde_json::from_str(r#"{ "status": "ZERO_RESULTS", "results": [] }"#).unwrap();
        assert!(matches!(parsed.into_response(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn denied_request_is_external_error() {
        let parsed: GeocodeApiResponse = serde_json::from_str(
            r#"{ "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid." }"#,
        )
        .unwrap();
        assert!(matches!(
            parsed.into_response(),
            Err(AppError::ExternalService { service: "Google Maps", .. })
        ));
    }
}
