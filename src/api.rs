// src/api.rs

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, multipart};
use strum_macros::Display;

use crate::errors::AppError;
use crate::image::ImageFile;
use crate::models::{ApiErrorBody, ApiMessage, DessertPayload};
use crate::state::ApiConfig;

const DESSERT_PATH: &str = "dessert";
const DESSERT_WITHOUT_IMAGE_PATH: &str = "dessert/withoutImage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    Create,
    UpdateWithImage,
    UpdateWithoutImage,
}

/// Zdalne API katalogu deserów. Każda operacja zwraca wiadomość serwera.
#[async_trait]
pub trait DessertApi: Send + Sync {
    async fn create(
        &self,
        token: &str,
        payload: &DessertPayload,
        image: &ImageFile,
    ) -> Result<String, AppError>;

    async fn update_with_image(
        &self,
        token: &str,
        payload: &DessertPayload,
        image: &ImageFile,
    ) -> Result<String, AppError>;

    async fn update_without_image(
        &self,
        token: &str,
        payload: &DessertPayload,
    ) -> Result<String, AppError>;
}

#[derive(Debug, Clone)]
pub struct HttpDessertApi {
    client: Client,
    config: ApiConfig,
}

impl HttpDessertApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn send(&self, operation: Operation, request: RequestBuilder) -> Result<String, AppError> {
        match request.send().await {
            Ok(resp) => read_response(operation, resp).await,
            Err(e) => {
                tracing::error!("Błąd sieci podczas operacji {}: {}", operation, e);
                if e.is_builder() {
                    tracing::error!("Szczegóły błędu budowania Reqwest: {:?}", e);
                }
                Err(AppError::Http(e))
            }
        }
    }
}

// Część `file` z obrazem i część `dessert` z danymi w JSON
fn multipart_form(payload: &DessertPayload, image: &ImageFile) -> Result<multipart::Form, AppError> {
    let dessert_json = serde_json::to_string(payload)?;
    let part = multipart::Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.mime_type)
        .map_err(|e| {
            tracing::error!("Błąd ustawiania typu MIME: {}", e);
            AppError::InvalidImage(format!("unsupported MIME type '{}'", image.mime_type))
        })?;

    Ok(multipart::Form::new()
        .part("file", part)
        .text("dessert", dessert_json))
}

async fn read_response(operation: Operation, resp: Response) -> Result<String, AppError> {
    let status = resp.status();
    let body = resp.text().await?;

    if status.is_success() {
        match serde_json::from_str::<ApiMessage>(&body) {
            Ok(ApiMessage { message }) => {
                tracing::info!("Operacja {} zakończona: {}", operation, message);
                Ok(message)
            }
            Err(e) => {
                // Serwer zapisał dane, więc nie zgłaszamy błędu
                tracing::warn!(
                    "Operacja {} udana, ale odpowiedź bez pola 'message': {}",
                    operation,
                    e
                );
                Ok(status
                    .canonical_reason()
                    .unwrap_or("Saved")
                    .to_string())
            }
        }
    } else {
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(ApiErrorBody::into_message)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        tracing::error!(
            "Błąd operacji {}: Status={}, Treść={}",
            operation,
            status,
            body
        );
        Err(AppError::Api { status, message })
    }
}

#[async_trait]
impl DessertApi for HttpDessertApi {
    async fn create(
        &self,
        token: &str,
        payload: &DessertPayload,
        image: &ImageFile,
    ) -> Result<String, AppError> {
        let url = self.config.endpoint(DESSERT_PATH)?;
        let form = multipart_form(payload, image)?;
        tracing::debug!("POST {} (plik: {})", url, image.file_name);

        let request = self
            .client
            .post(url)
            .header(AUTHORIZATION, token)
            .multipart(form);
        self.send(Operation::Create, request).await
    }

    async fn update_with_image(
        &self,
        token: &str,
        payload: &DessertPayload,
        image: &ImageFile,
    ) -> Result<String, AppError> {
        let url = self.config.endpoint(DESSERT_PATH)?;
        let form = multipart_form(payload, image)?;
        tracing::debug!("PUT {} (plik: {})", url, image.file_name);

        let request = self
            .client
            .put(url)
            .header(AUTHORIZATION, token)
            .multipart(form);
        self.send(Operation::UpdateWithImage, request).await
    }

    async fn update_without_image(
        &self,
        token: &str,
        payload: &DessertPayload,
    ) -> Result<String, AppError> {
        let url = self.config.endpoint(DESSERT_WITHOUT_IMAGE_PATH)?;
        tracing::debug!("PUT {}", url);

        let request = self
            .client
            .put(url)
            .header(AUTHORIZATION, token)
            .json(payload);
        self.send(Operation::UpdateWithoutImage, request).await
    }
}
