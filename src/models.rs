// src/models.rs
use serde::{Deserialize, Serialize, Serializer};

/// Deser w katalogu, tak jak zwraca go serwer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dessert {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub size: f64,
    pub price: f64,
    #[serde(rename = "qty")]
    pub quantity: f64,
    pub image: String,
}

// --- STRUKTURY PAYLOAD DLA API DESERÓW ---

/// Dane deseru wysyłane na serwer. `_id` pojawia się tylko przy aktualizacji.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DessertPayload {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(serialize_with = "serialize_numeric")]
    pub size: f64,
    #[serde(serialize_with = "serialize_numeric")]
    pub price: f64,
    #[serde(rename = "qty", serialize_with = "serialize_numeric")]
    pub quantity: f64,
}

impl DessertPayload {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

// Liczby całkowite idą jako `100`, a nie `100.0`
fn serialize_numeric<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

// --- STRUKTURY ODPOWIEDZI API ---

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}
