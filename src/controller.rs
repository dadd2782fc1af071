// src/controller.rs

use std::sync::Arc;

use strum_macros::Display;
use url::Url;

use crate::api::{DessertApi, Operation};
use crate::form::{FieldEvent, FieldValue, FormSnapshot, SubmitRejection, reduce, reduce_named};
use crate::image::{ImageFile, ImagePreview, PendingImage};
use crate::models::Dessert;
use crate::session::TokenStore;

pub const IMAGE_REQUIRED_MESSAGE: &str = "Image cannot be empty";
pub const LOGIN_EXPIRED_TITLE: &str = "Login expired";
pub const LOGIN_EXPIRED_MESSAGE: &str = "Please log in to continue!";

/// Tryb formularza. `Display` daje napis na przycisku zapisu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum FormMode {
    #[default]
    #[strum(to_string = "Add")]
    Create,
    #[strum(to_string = "Update")]
    Edit,
}

/// Powiadomienia dla komponentu nadrzędnego (lista deserów, toasty, routing).
pub trait FormNotifier: Send + Sync {
    fn reload_requested(&self);
    fn show_message(&self, title: &str, body: &str);
    fn redirect_to_login(&self);
}

/// Notifier, który tylko loguje. Używany przez binarkę.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl FormNotifier for TracingNotifier {
    fn reload_requested(&self) {
        tracing::info!("Lista deserów wymaga odświeżenia");
    }

    fn show_message(&self, title: &str, body: &str) {
        tracing::info!("[{}] {}", title, body);
    }

    fn redirect_to_login(&self) {
        tracing::warn!("Przekierowanie do /login");
    }
}

/// Wynik próby zapisu formularza.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved { operation: Operation, message: String },
    ValidationFailed(SubmitRejection),
    ImageMissing,
    AuthMissing,
    TransportFailed(String),
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            SubmitOutcome::Saved { .. } => "Success",
            SubmitOutcome::ValidationFailed(_) | SubmitOutcome::ImageMissing => "Warning",
            SubmitOutcome::AuthMissing => LOGIN_EXPIRED_TITLE,
            SubmitOutcome::TransportFailed(_) => "Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SubmitOutcome::Saved { message, .. } => message,
            SubmitOutcome::ValidationFailed(rejection) => &rejection.message,
            SubmitOutcome::ImageMissing => IMAGE_REQUIRED_MESSAGE,
            SubmitOutcome::AuthMissing => LOGIN_EXPIRED_MESSAGE,
            SubmitOutcome::TransportFailed(message) => message,
        }
    }
}

/// Formularz dodawania/edycji deseru. Jedyny właściciel stanu formularza i wybranego obrazu.
pub struct DessertForm {
    api: Arc<dyn DessertApi>,
    tokens: Arc<dyn TokenStore>,
    notifier: Arc<dyn FormNotifier>,
    image_base_url: Url,
    snapshot: FormSnapshot,
    mode: FormMode,
    image: PendingImage,
}

impl DessertForm {
    pub fn new(
        api: Arc<dyn DessertApi>,
        tokens: Arc<dyn TokenStore>,
        notifier: Arc<dyn FormNotifier>,
        image_base_url: Url,
    ) -> Self {
        Self {
            api,
            tokens,
            notifier,
            image_base_url,
            snapshot: FormSnapshot::empty(),
            mode: FormMode::Create,
            image: PendingImage::None,
        }
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn pending_image(&self) -> &PendingImage {
        &self.image
    }

    pub fn submit_label(&self) -> String {
        self.mode.to_string()
    }

    pub fn preview(&self) -> ImagePreview<'_> {
        self.image.preview(&self.image_base_url)
    }

    pub fn dispatch(&mut self, event: FieldEvent) -> &FormSnapshot {
        let current = std::mem::take(&mut self.snapshot);
        self.snapshot = reduce(current, event);
        &self.snapshot
    }

    pub fn dispatch_named(&mut self, field: &str, value: impl Into<FieldValue>) -> &FormSnapshot {
        let current = std::mem::take(&mut self.snapshot);
        self.snapshot = reduce_named(current, field, value.into());
        &self.snapshot
    }

    pub fn select_image(&mut self, file: ImageFile) {
        tracing::debug!("Wybrano nowy obraz: {}", file.file_name);
        self.image = std::mem::take(&mut self.image).select(file);
    }

    pub fn clear_image(&mut self) {
        self.image = std::mem::take(&mut self.image).clear_selection();
    }

    /// Przełącza formularz w tryb edycji istniejącego deseru.
    /// Niezapisany, nowo wybrany obraz jest porzucany.
    pub fn seed(&mut self, item: &Dessert) -> &FormSnapshot {
        tracing::info!("Edycja deseru ID: {}", item.id);
        self.snapshot = FormSnapshot::seeded(item);
        self.mode = FormMode::Edit;
        self.image = PendingImage::Stored(item.image.clone());
        &self.snapshot
    }

    /// Czyści formularz i wraca do trybu dodawania.
    pub fn dismiss(&mut self) {
        self.snapshot = FormSnapshot::empty();
        self.mode = FormMode::Create;
        self.image = PendingImage::None;
    }

    /// Sprawdza formularz, wybiera operację i wysyła ją do API.
    /// Przy błędzie transportu stan formularza zostaje nietknięty.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.run_submit().await;
        self.notify(&outcome);
        outcome
    }

    async fn run_submit(&mut self) -> SubmitOutcome {
        if let Err(rejection) = self.snapshot.can_submit() {
            tracing::debug!("Formularz odrzucony na polu {:?}", rejection.field);
            return SubmitOutcome::ValidationFailed(rejection);
        }

        let operation = match (self.mode, self.image.selected()) {
            (FormMode::Create, None) => return SubmitOutcome::ImageMissing,
            (FormMode::Create, Some(_)) => Operation::Create,
            (FormMode::Edit, Some(_)) => Operation::UpdateWithImage,
            (FormMode::Edit, None) => Operation::UpdateWithoutImage,
        };

        let Some(token) = self.tokens.token() else {
            tracing::warn!("Brak tokenu sesji, przerywam operację {}", operation);
            return SubmitOutcome::AuthMissing;
        };

        let payload = self.snapshot.to_payload();
        tracing::info!("Wysyłanie operacji {}", operation);

        let result = match (operation, self.image.selected()) {
            (Operation::Create, Some(file)) => self.api.create(&token, &payload, file).await,
            (Operation::UpdateWithImage, Some(file)) => {
                let payload = payload.with_id(self.snapshot.identifier());
                self.api.update_with_image(&token, &payload, file).await
            }
            _ => {
                let payload = payload.with_id(self.snapshot.identifier());
                self.api.update_without_image(&token, &payload).await
            }
        };

        match result {
            Ok(message) => {
                self.dismiss();
                SubmitOutcome::Saved { operation, message }
            }
            Err(e) => {
                tracing::error!("Operacja {} nie powiodła się: {}", operation, e);
                SubmitOutcome::TransportFailed(e.user_message())
            }
        }
    }

    fn notify(&self, outcome: &SubmitOutcome) {
        if outcome.is_saved() {
            self.notifier.reload_requested();
        }
        self.notifier.show_message(outcome.title(), outcome.message());
        if *outcome == SubmitOutcome::AuthMissing {
            self.notifier.redirect_to_login();
        }
    }
}
