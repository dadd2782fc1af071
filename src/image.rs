// src/image.rs

use std::path::Path;

use url::Url;

use crate::errors::AppError;

/// Nowo wybrany plik obrazu, który trafi do uploadu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, AppError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(AppError::InvalidImage(format!("'{}' is empty", file_name)));
        }
        let mime_type = mime_for(&file_name).to_string();
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| AppError::InvalidImage(format!("bad file name: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        tracing::debug!("Wczytano obraz {} ({} bajtów)", file_name, bytes.len());
        Self::from_bytes(file_name, bytes)
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Obraz, który zostanie wysłany przy zapisie.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingImage {
    #[default]
    None,
    /// Obraz już zapisany na serwerze (tryb edycji, bez zmian).
    Stored(String),
    /// Nowy plik; `previous` to zapisany obraz, do którego wracamy po odznaczeniu.
    Selected {
        file: ImageFile,
        previous: Option<String>,
    },
}

/// Co pokazać w podglądzie obrazu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePreview<'a> {
    Local(&'a ImageFile),
    Remote(Url),
    Placeholder,
}

impl PendingImage {
    pub fn select(self, file: ImageFile) -> Self {
        let previous = match self {
            PendingImage::None => None,
            PendingImage::Stored(reference) => Some(reference),
            PendingImage::Selected { previous, .. } => previous,
        };
        PendingImage::Selected { file, previous }
    }

    pub fn clear_selection(self) -> Self {
        match self {
            PendingImage::Selected {
                previous: Some(reference),
                ..
            } => PendingImage::Stored(reference),
            PendingImage::Selected { previous: None, .. } => PendingImage::None,
            other => other,
        }
    }

    pub fn selected(&self) -> Option<&ImageFile> {
        match self {
            PendingImage::Selected { file, .. } => Some(file),
            _ => None,
        }
    }

    pub fn preview(&self, image_base: &Url) -> ImagePreview<'_> {
        match self {
            PendingImage::Selected { file, .. } => ImagePreview::Local(file),
            PendingImage::Stored(reference) => match stored_image_url(image_base, reference) {
                Some(url) => ImagePreview::Remote(url),
                None => {
                    tracing::warn!("Nie można zbudować URL obrazu '{}'", reference);
                    ImagePreview::Placeholder
                }
            },
            PendingImage::None => ImagePreview::Placeholder,
        }
    }
}

// Nazwa obrazu z serwera to jeden segment ścieżki pod bazowym URL,
// więc '/', '#' czy '..' nie wyprowadzą adresu poza katalog obrazów
fn stored_image_url(image_base: &Url, reference: &str) -> Option<Url> {
    let mut url = image_base.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(reference);
    Some(url)
}
