// src/main.rs

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use dotenvy::dotenv;
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dessert_admin::state::TOKEN_ENV_VAR;
use dessert_admin::{
    ApiConfig, AppError, Dessert, DessertForm, EnvTokenStore, FieldValue, HttpDessertApi,
    ImageFile, SubmitOutcome, TracingNotifier,
};

/// Skrypt formularza: opcjonalny deser do edycji, zmiany pól i ścieżka nowego obrazu.
#[derive(Debug, Deserialize)]
struct FormScript {
    #[serde(default)]
    edit: Option<Dessert>,
    #[serde(default)]
    events: Vec<ScriptEvent>,
    #[serde(default)]
    image: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ScriptEvent {
    field: String,
    value: FieldValue,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Inicjalizacja systemu logowania (tracing)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dessert_admin=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(script_path) = env::args().nth(1) else {
        tracing::error!("Użycie: dessert_admin <skrypt.json>");
        std::process::exit(2);
    };

    match run(PathBuf::from(script_path)).await {
        Ok(outcome) if outcome.is_saved() => {}
        Ok(outcome) => {
            tracing::warn!("Formularz nie został zapisany: {}", outcome.message());
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Błąd: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(script_path: PathBuf) -> Result<SubmitOutcome, AppError> {
    let config = ApiConfig::from_env()?;
    tracing::info!("API deserów: {}", config.api_base_url);

    let raw = tokio::fs::read_to_string(&script_path).await?;
    let script: FormScript = serde_json::from_str(&raw)?;

    let mut form = DessertForm::new(
        Arc::new(HttpDessertApi::new(config.clone())),
        Arc::new(EnvTokenStore::new(TOKEN_ENV_VAR)),
        Arc::new(TracingNotifier),
        config.image_base_url.clone(),
    );

    if let Some(item) = &script.edit {
        form.seed(item);
    }
    for event in script.events {
        form.dispatch_named(&event.field, event.value);
    }
    if let Some(path) = &script.image {
        form.select_image(ImageFile::load(path).await?);
    }

    tracing::info!("Zapis formularza (tryb: {})", form.submit_label());
    Ok(form.submit().await)
}
