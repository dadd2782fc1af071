// src/lib.rs

// Deklaracje modułów
pub mod api; // dla src/api.rs
pub mod controller; // dla src/controller.rs
pub mod errors; // dla src/errors.rs
pub mod form; // dla src/form.rs
pub mod image; // dla src/image.rs
pub mod models; // dla src/models.rs
pub mod session; // dla src/session.rs
pub mod state; // dla src/state.rs
pub mod validation; // dla src/validation.rs

pub use api::{DessertApi, HttpDessertApi, Operation};
pub use controller::{DessertForm, FormMode, FormNotifier, SubmitOutcome, TracingNotifier};
pub use errors::AppError;
pub use form::{FieldEvent, FieldKey, FieldValue, FormSnapshot, SubmitRejection, reduce};
pub use image::{ImageFile, ImagePreview, PendingImage};
pub use models::{Dessert, DessertPayload};
pub use session::{EnvTokenStore, MemoryTokenStore, TokenStore};
pub use state::ApiConfig;
