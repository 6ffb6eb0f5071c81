use crate::domain::model::{
    CreateUserRequest, FieldId, Place, ProfileDraft, SubmitOutcome, Suggestion,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Persistent slot for the in-progress draft. One record under one key;
/// callers treat read/write failures as "no draft".
pub trait DraftStore: Send + Sync {
    fn save(&self, draft: &ProfileDraft) -> Result<()>;
    fn load(&self) -> Result<Option<ProfileDraft>>;
    fn clear(&self) -> Result<()>;
}

/// The remote profile-creation API.
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    async fn create_profile(&self, request: &CreateUserRequest) -> Result<SubmitOutcome>;
}

/// The third-party geocoding search service.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>>;
}

/// Rendering seam. The page's DOM writes live behind this trait; the binary
/// ships a terminal implementation and tests record the calls.
pub trait FormSurface: Send {
    fn set_field_error(&mut self, field: FieldId, message: &str);
    fn clear_field_error(&mut self, field: FieldId);
    fn clear_all_field_errors(&mut self);

    fn show_banner(&mut self, message: &str);
    fn clear_banner(&mut self);

    fn set_submitting(&mut self, submitting: bool);
    fn show_success(&mut self);

    fn fill_form(&mut self, draft: &ProfileDraft);
    fn set_birth_time_disabled(&mut self, disabled: bool);
    fn set_ascendant_advisory(&mut self, visible: bool);
    fn set_birth_place(&mut self, value: &str);

    fn show_suggestions(&mut self, items: &[Suggestion]);
    fn show_suggestions_loading(&mut self);
    fn show_no_results(&mut self);
    fn hide_suggestions(&mut self);
}
