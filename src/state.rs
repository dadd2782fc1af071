// src/state.rs

use std::env;

use url::Url;

use crate::errors::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/";
pub const TOKEN_ENV_VAR: &str = "DESSERT_API_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_base_url: Url,
    pub image_base_url: Url,
}

impl ApiConfig {
    pub fn new(api_base_url: &str, image_base_url: Option<&str>) -> Result<Self, AppError> {
        let api_base_url = parse_base(api_base_url)?;
        let image_base_url = match image_base_url {
            Some(url) => parse_base(url)?,
            None => api_base_url.join("images/")?,
        };
        Ok(Self {
            api_base_url,
            image_base_url,
        })
    }

    /// Konfiguracja ze zmiennych środowiskowych (`DESSERT_API_URL`, `DESSERT_IMAGE_URL`).
    pub fn from_env() -> Result<Self, AppError> {
        let api = env::var("DESSERT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let images = env::var("DESSERT_IMAGE_URL").ok();
        Self::new(&api, images.as_deref())
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.api_base_url.join(path.trim_start_matches('/'))?)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        let api_base_url = Url::parse(DEFAULT_API_URL).expect("stały adres API jest poprawny");
        let image_base_url = api_base_url
            .join("images/")
            .expect("stały adres obrazów jest poprawny");
        Self {
            api_base_url,
            image_base_url,
        }
    }
}

// Bazowy URL musi kończyć się '/', inaczej `join` zgubi ostatni segment ścieżki
fn parse_base(raw: &str) -> Result<Url, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Config("empty base URL".to_string()));
    }
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Ok(Url::parse(&normalized)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_base_defaults_under_api() {
        let config = ApiConfig::new("http://localhost:8080", None).unwrap();
        assert_eq!(config.image_base_url.as_str(), "http://localhost:8080/images/");
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn endpoints_keep_api_prefix() {
        let config = ApiConfig::new("http://shop.test/api", None).unwrap();
        assert_eq!(
            config.endpoint("/dessert/withoutImage").unwrap().as_str(),
            "http://shop.test/api/dessert/withoutImage"
        );
    }

    #[test]
    fn explicit_image_base_is_used() {
        let config = ApiConfig::new("http://a.test", Some("http://cdn.test/img")).unwrap();
        assert_eq!(config.image_base_url.as_str(), "http://cdn.test/img/");
    }

    #[test]
    fn invalid_urls_are_config_errors() {
        assert!(matches!(ApiConfig::new("  ", None), Err(AppError::Config(_))));
        assert!(matches!(ApiConfig::new("not a url", None), Err(AppError::Url(_))));
    }
}
