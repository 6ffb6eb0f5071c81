pub mod autocomplete;
pub mod form;
pub mod rules;
pub mod session;

pub use crate::domain::model::{FieldId, ProfileDraft};
pub use crate::domain::ports::{DraftStore, FormSurface, PlaceSearch, ProfileGateway};
pub use crate::utils::error::Result;

pub use autocomplete::AutocompleteController;
pub use form::{FormController, SubmitState};
pub use session::{FormEvent, FormSession};
