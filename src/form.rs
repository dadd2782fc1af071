// src/form.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::ValidationError;

use crate::models::{Dessert, DessertPayload};
use crate::validation::{coerce_number, validate_number, validate_text};

/// Pola formularza. Parsowanie akceptuje nazwy inputów z panelu (`Dessert`, `Desc`, `Qty`...)
/// oraz nazwy opisowe (`name`, `description`, `quantity`...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum FieldKey {
    #[strum(to_string = "DessertId", serialize = "identifier")]
    Identifier,
    #[strum(to_string = "Dessert", serialize = "name")]
    Name,
    #[strum(to_string = "Desc", serialize = "description")]
    Description,
    #[strum(to_string = "Size")]
    Size,
    #[strum(to_string = "Price")]
    Price,
    #[strum(to_string = "Qty", serialize = "quantity")]
    Quantity,
}

impl FieldKey {
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::Identifier => "Identifier",
            FieldKey::Name => "Name",
            FieldKey::Description => "Description",
            FieldKey::Size => "Size",
            FieldKey::Price => "Price",
            FieldKey::Quantity => "Quantity",
        }
    }
}

/// Kolejność sprawdzania pól przed wysłaniem. Zgłaszamy tylko pierwsze błędne pole.
pub const SUBMIT_ORDER: [FieldKey; 5] = [
    FieldKey::Name,
    FieldKey::Description,
    FieldKey::Size,
    FieldKey::Price,
    FieldKey::Quantity,
];

/// Surowa wartość z inputa: tekst albo liczba.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.is_empty())
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldState {
    pub value: FieldValue,
    pub error: Option<ValidationError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEvent {
    pub field: FieldKey,
    pub value: FieldValue,
}

impl FieldEvent {
    pub fn new(field: FieldKey, value: impl Into<FieldValue>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

// FieldKey jest serializowany tak, jak nazywają się inputy w panelu
impl Serialize for FieldKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FieldKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown field '{}'", name)))
    }
}

/// Pierwsze pole, które blokuje wysłanie formularza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRejection {
    pub field: FieldKey,
    pub message: String,
}

impl fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Stan formularza: wartości pól wraz z ich błędami walidacji.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormSnapshot {
    identifier: String,
    name: FieldState,
    description: FieldState,
    size: FieldState,
    price: FieldState,
    quantity: FieldState,
}

impl FormSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wypełnia formularz danymi istniejącego deseru. Dane z serwera uznajemy za poprawne.
    pub fn seeded(item: &Dessert) -> Self {
        let number = |n: f64| FieldState {
            value: FieldValue::Number(n),
            error: None,
        };
        let text = |s: &str| FieldState {
            value: FieldValue::Text(s.to_string()),
            error: None,
        };
        Self {
            identifier: item.id.clone(),
            name: text(&item.name),
            description: text(&item.description),
            size: number(item.size),
            price: number(item.price),
            quantity: number(item.quantity),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Stan pola edytowalnego. `Identifier` nie ma walidacji, więc zwraca `None`.
    pub fn field(&self, key: FieldKey) -> Option<&FieldState> {
        match key {
            FieldKey::Identifier => None,
            FieldKey::Name => Some(&self.name),
            FieldKey::Description => Some(&self.description),
            FieldKey::Size => Some(&self.size),
            FieldKey::Price => Some(&self.price),
            FieldKey::Quantity => Some(&self.quantity),
        }
    }

    pub fn error(&self, key: FieldKey) -> Option<&ValidationError> {
        self.field(key).and_then(|state| state.error.as_ref())
    }

    pub fn text(&self, key: FieldKey) -> String {
        match self.field(key) {
            Some(state) => state.value.to_string(),
            None => self.identifier.clone(),
        }
    }

    pub fn number(&self, key: FieldKey) -> f64 {
        self.field(key)
            .map(|state| coerce_number(&state.value))
            .unwrap_or(f64::NAN)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// Sprawdza pola w stałej kolejności i zwraca pierwsze, które jest puste albo błędne.
    pub fn can_submit(&self) -> Result<(), SubmitRejection> {
        for key in SUBMIT_ORDER {
            let Some(state) = self.field(key) else {
                continue;
            };
            if state.value.is_empty() {
                return Err(SubmitRejection {
                    field: key,
                    message: format!("{} cannot be empty", key.label()),
                });
            }
            if let Some(error) = &state.error {
                return Err(SubmitRejection {
                    field: key,
                    message: format!("{} {}", key.label(), error),
                });
            }
        }
        Ok(())
    }

    /// Dane do wysłania. Identyfikator dokłada dopiero operacja aktualizacji.
    pub fn to_payload(&self) -> DessertPayload {
        DessertPayload {
            id: None,
            name: self.text(FieldKey::Name),
            description: self.text(FieldKey::Description),
            size: self.number(FieldKey::Size),
            price: self.number(FieldKey::Price),
            quantity: self.number(FieldKey::Quantity),
        }
    }

    fn field_mut(&mut self, key: FieldKey) -> Option<&mut FieldState> {
        match key {
            FieldKey::Identifier => None,
            FieldKey::Name => Some(&mut self.name),
            FieldKey::Description => Some(&mut self.description),
            FieldKey::Size => Some(&mut self.size),
            FieldKey::Price => Some(&mut self.price),
            FieldKey::Quantity => Some(&mut self.quantity),
        }
    }
}

/// Przejście stanu formularza: nowa wartość pola razem z jej świeżo policzonym błędem.
pub fn reduce(mut snapshot: FormSnapshot, event: FieldEvent) -> FormSnapshot {
    let FieldEvent { field, value } = event;
    let next = match field {
        FieldKey::Identifier => {
            snapshot.identifier = value.to_string();
            return snapshot;
        }
        FieldKey::Name | FieldKey::Description => {
            let text = value.to_string();
            let error = validate_text(&text).err();
            FieldState {
                value: FieldValue::Text(text),
                error,
            }
        }
        FieldKey::Size | FieldKey::Price | FieldKey::Quantity => {
            let error = validate_number(&value).err();
            FieldState { value, error }
        }
    };
    if let Some(state) = snapshot.field_mut(field) {
        *state = next;
    }
    snapshot
}

/// Jak `reduce`, ale pole podane po nazwie. Nieznana nazwa zostawia stan bez zmian.
pub fn reduce_named(snapshot: FormSnapshot, field: &str, value: FieldValue) -> FormSnapshot {
    match field.parse::<FieldKey>() {
        Ok(key) => reduce(snapshot, FieldEvent { field: key, value }),
        Err(_) => {
            tracing::debug!("Pomijam nieznane pole formularza: '{}'", field);
            snapshot
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{EMPTY, INVALID_NUMBER, NOT_POSITIVE};

    fn apply(snapshot: FormSnapshot, events: Vec<FieldEvent>) -> FormSnapshot {
        events.into_iter().fold(snapshot, reduce)
    }

    fn filled() -> FormSnapshot {
        apply(
            FormSnapshot::empty(),
            vec![
                FieldEvent::new(FieldKey::Name, "Cheesecake"),
                FieldEvent::new(FieldKey::Description, "Rich"),
                FieldEvent::new(FieldKey::Size, 100),
                FieldEvent::new(FieldKey::Price, 9.5),
                FieldEvent::new(FieldKey::Quantity, 10),
            ],
        )
    }

    fn sample_dessert() -> Dessert {
        Dessert {
            id: "1".into(),
            name: "X".into(),
            description: "Y".into(),
            size: 50.0,
            price: 5.0,
            quantity: 3.0,
            image: "x.png".into(),
        }
    }

    fn error_code(snapshot: &FormSnapshot, key: FieldKey) -> Option<String> {
        snapshot.error(key).map(|e| e.code.to_string())
    }

    #[test]
    fn field_keys_parse_panel_and_descriptive_names() {
        assert_eq!("Dessert".parse::<FieldKey>().unwrap(), FieldKey::Name);
        assert_eq!("name".parse::<FieldKey>().unwrap(), FieldKey::Name);
        assert_eq!("Desc".parse::<FieldKey>().unwrap(), FieldKey::Description);
        assert_eq!("qty".parse::<FieldKey>().unwrap(), FieldKey::Quantity);
        assert_eq!("Quantity".parse::<FieldKey>().unwrap(), FieldKey::Quantity);
        assert_eq!("DessertId".parse::<FieldKey>().unwrap(), FieldKey::Identifier);
        assert!("Colour".parse::<FieldKey>().is_err());
        assert_eq!(FieldKey::Quantity.to_string(), "Qty");
    }

    #[test]
    fn reducer_recomputes_error_with_value() {
        let snapshot = reduce(FormSnapshot::empty(), FieldEvent::new(FieldKey::Name, "  "));
        assert_eq!(error_code(&snapshot, FieldKey::Name).as_deref(), Some(EMPTY));

        let snapshot = reduce(snapshot, FieldEvent::new(FieldKey::Name, "Tart"));
        assert_eq!(snapshot.text(FieldKey::Name), "Tart");
        assert_eq!(snapshot.error(FieldKey::Name), None);
    }

    #[test]
    fn reducer_touches_only_the_named_field() {
        let before = filled();
        let after = reduce(before.clone(), FieldEvent::new(FieldKey::Price, "abc"));
        assert_eq!(error_code(&after, FieldKey::Price).as_deref(), Some(INVALID_NUMBER));
        for key in [FieldKey::Name, FieldKey::Description, FieldKey::Size, FieldKey::Quantity] {
            assert_eq!(after.field(key), before.field(key));
        }
    }

    #[test]
    fn numeric_fields_keep_raw_input() {
        let snapshot = reduce(FormSnapshot::empty(), FieldEvent::new(FieldKey::Size, "0"));
        assert_eq!(snapshot.field(FieldKey::Size).unwrap().value, FieldValue::from("0"));
        assert_eq!(error_code(&snapshot, FieldKey::Size).as_deref(), Some(NOT_POSITIVE));
    }

    #[test]
    fn identifier_has_no_error() {
        let snapshot = reduce(FormSnapshot::empty(), FieldEvent::new(FieldKey::Identifier, ""));
        assert_eq!(snapshot.identifier(), "");
        assert!(snapshot.field(FieldKey::Identifier).is_none());
        assert!(snapshot.error(FieldKey::Identifier).is_none());
    }

    #[test]
    fn unknown_named_field_is_ignored() {
        let before = filled();
        let after = reduce_named(before.clone(), "Colour", FieldValue::from("red"));
        assert_eq!(after, before);
    }

    #[test]
    fn named_dispatch_uses_panel_names() {
        let snapshot = reduce_named(FormSnapshot::empty(), "Qty", FieldValue::from("-1"));
        assert_eq!(error_code(&snapshot, FieldKey::Quantity).as_deref(), Some(NOT_POSITIVE));
    }

    #[test]
    fn reducer_is_idempotent_for_same_event() {
        let base = filled();
        let event = FieldEvent::new(FieldKey::Description, "Creamy");
        let once = reduce(base.clone(), event.clone());
        let twice = reduce(reduce(base, event.clone()), event);
        assert_eq!(once, twice);
    }

    #[test]
    fn seeding_round_trips_editable_fields() {
        let item = sample_dessert();
        let snapshot = FormSnapshot::seeded(&item);
        assert_eq!(snapshot.identifier(), "1");
        assert_eq!(snapshot.text(FieldKey::Name), item.name);
        assert_eq!(snapshot.text(FieldKey::Description), item.description);
        assert_eq!(snapshot.number(FieldKey::Size), item.size);
        assert_eq!(snapshot.number(FieldKey::Price), item.price);
        assert_eq!(snapshot.number(FieldKey::Quantity), item.quantity);
        for key in SUBMIT_ORDER {
            assert!(snapshot.error(key).is_none());
        }
    }

    #[test]
    fn submit_gate_reports_first_field_in_priority_order() {
        let snapshot = apply(
            filled(),
            vec![
                FieldEvent::new(FieldKey::Price, -2),
                FieldEvent::new(FieldKey::Name, ""),
            ],
        );
        let rejection = snapshot.can_submit().unwrap_err();
        assert_eq!(rejection.field, FieldKey::Name);
        assert_eq!(rejection.message, "Name cannot be empty");
    }

    #[test]
    fn submit_gate_names_invalid_value() {
        let snapshot = reduce(filled(), FieldEvent::new(FieldKey::Price, 0));
        let rejection = snapshot.can_submit().unwrap_err();
        assert_eq!(rejection.field, FieldKey::Price);
        assert_eq!(rejection.message, "Price must be greater than zero");
    }

    #[test]
    fn empty_form_is_rejected_on_name() {
        let rejection = FormSnapshot::empty().can_submit().unwrap_err();
        assert_eq!(rejection.field, FieldKey::Name);
    }

    #[test]
    fn untouched_quantity_is_reported_as_empty() {
        let snapshot = apply(
            FormSnapshot::empty(),
            vec![
                FieldEvent::new(FieldKey::Name, "A"),
                FieldEvent::new(FieldKey::Description, "B"),
                FieldEvent::new(FieldKey::Size, 1),
                FieldEvent::new(FieldKey::Price, 1),
            ],
        );
        assert_eq!(
            snapshot.can_submit().unwrap_err().message,
            "Quantity cannot be empty"
        );
    }

    #[test]
    fn valid_form_builds_payload() {
        let snapshot = filled();
        assert!(snapshot.can_submit().is_ok());
        let payload = snapshot.to_payload();
        assert_eq!(payload.id, None);
        assert_eq!(payload.name, "Cheesecake");
        assert_eq!(payload.size, 100.0);
        assert_eq!(payload.price, 9.5);
        assert_eq!(payload.quantity, 10.0);
    }

    #[test]
    fn typed_numbers_are_coerced_for_payload() {
        let snapshot = reduce(filled(), FieldEvent::new(FieldKey::Size, " 250 "));
        assert_eq!(snapshot.to_payload().size, 250.0);
    }

    #[test]
    fn field_event_reads_from_json() {
        let event: FieldEvent =
            serde_json::from_str(r#"{"field": "Price", "value": 6}"#).unwrap();
        assert_eq!(event, FieldEvent::new(FieldKey::Price, 6));
        let event: FieldEvent =
            serde_json::from_str(r#"{"field": "name", "value": "Tart"}"#).unwrap();
        assert_eq!(event, FieldEvent::new(FieldKey::Name, "Tart"));
    }
}
