//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::ApiEnvelope;
use shared::models::dashboard::DoctorDashboard;
use shared::models::diagnosis::DiagnosisPayload;
use shared::models::inventory::{StockAddRequest, StockUseRequest, StockUseResult};
use shared::models::patient::Patient;
use shared::stock::ItemSnapshot;

/// HTTP client for making network requests to the clinic backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Inventory API ==========

    /// Fetch the full inventory snapshot
    pub async fn fetch_inventory(&self) -> ClientResult<Vec<ItemSnapshot>> {
        let envelope = self
            .get::<ApiEnvelope<Vec<ItemSnapshot>>>("inventory")
            .await?;
        Ok(envelope.into_result()?)
    }

    /// Record usage of an inventory item
    pub async fn use_stock(&self, request: &StockUseRequest) -> ClientResult<StockUseResult> {
        #[derive(serde::Serialize)]
        struct UseBody<'a> {
            quantity: f64,
            performed_by: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            notes: Option<&'a str>,
        }

        let body = UseBody {
            quantity: request.quantity,
            performed_by: &request.performed_by,
            notes: request.notes.as_deref(),
        };

        let path = format!("inventory/{}/use", request.item_id);
        let envelope = self
            .post::<ApiEnvelope<StockUseResult>, _>(&path, &body)
            .await?;
        Ok(envelope.into_result()?)
    }

    /// Restock an inventory item
    pub async fn add_stock(
        &self,
        item_id: &str,
        request: &StockAddRequest,
    ) -> ClientResult<ItemSnapshot> {
        let path = format!("inventory/{}/add", item_id);
        let envelope = self
            .post::<ApiEnvelope<ItemSnapshot>, _>(&path, request)
            .await?;
        Ok(envelope.into_result()?)
    }

    // ========== Doctor API ==========

    /// Fetch a doctor's daily dashboard
    pub async fn fetch_doctor_dashboard(&self, doctor_id: &str) -> ClientResult<DoctorDashboard> {
        let path = format!("doctors/{}/dashboard", doctor_id);
        let envelope = self.get::<ApiEnvelope<DoctorDashboard>>(&path).await?;
        Ok(envelope.into_result()?)
    }

    // ========== Patient API ==========

    /// Fetch a single patient record
    pub async fn fetch_patient(&self, patient_id: &str) -> ClientResult<Patient> {
        let path = format!("patients/{}", patient_id);
        let envelope = self.get::<ApiEnvelope<Patient>>(&path).await?;
        Ok(envelope.into_result()?)
    }

    /// Save a diagnosis for a patient
    pub async fn save_diagnosis(
        &self,
        patient_id: &str,
        payload: &DiagnosisPayload,
    ) -> ClientResult<()> {
        let path = format!("patients/{}/save_diagnosis", patient_id);
        let envelope = self.post::<ApiEnvelope<()>, _>(&path, payload).await?;
        Ok(envelope.into_unit()?)
    }
}
