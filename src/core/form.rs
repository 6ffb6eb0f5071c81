use crate::config::PageContext;
use crate::core::rules::{rule_for, validate_field, validate_form};
use crate::domain::model::{ApiResponse, CreateUserRequest, FieldId, ProfileDraft, SubmitOutcome};
use crate::domain::ports::{DraftStore, FormSurface, ProfileGateway};
use std::time::Duration;
use tokio::time::Instant;

pub const BANNER_TTL: Duration = Duration::from_secs(8);

pub const EMAIL_REQUIRED_ERROR: &str =
    "Email address is required. Please access this page through the Chrome extension.";
pub const CONNECTIVITY_ERROR: &str =
    "Unable to create profile. Please check your connection and try again.";
const INVALID_DATA_ERROR: &str =
    "Invalid data provided. Please check your information and try again.";
const DUPLICATE_EMAIL_ERROR: &str =
    "A profile with this email already exists. Please use a different email.";
const SERVER_ERROR: &str = "Server error occurred. Please try again later.";
const GENERIC_FAILURE: &str = "Failed to create profile. Please try again.";

const UNKNOWN_SENTINEL: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Success,
    Failed,
}

/// Owns the in-progress draft and the submission state machine
/// (Idle → Submitting → Success | Failed). Every mutation writes the draft
/// through to the store; storage failures are logged and never surfaced.
pub struct FormController<G: ProfileGateway, D: DraftStore> {
    gateway: G,
    store: D,
    draft: ProfileDraft,
    state: SubmitState,
    banner_deadline: Option<Instant>,
    banner_ttl: Duration,
}

impl<G: ProfileGateway, D: DraftStore> FormController<G, D> {
    pub fn new(gateway: G, store: D) -> Self {
        Self::with_banner_ttl(gateway, store, BANNER_TTL)
    }

    pub fn with_banner_ttl(gateway: G, store: D, banner_ttl: Duration) -> Self {
        Self {
            gateway,
            store,
            draft: ProfileDraft::default(),
            state: SubmitState::Idle,
            banner_deadline: None,
            banner_ttl,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Page load. A truthy success flag skips the form entirely; a missing
    /// email parameter gates the page; otherwise any saved draft is
    /// restored, with the page-context email winning over a stored one.
    pub fn init<U: FormSurface>(&mut self, page: &PageContext, surface: &mut U) {
        if page.success_flag() {
            self.state = SubmitState::Success;
            surface.show_success();
            return;
        }

        let Some(email) = page.email() else {
            self.show_banner(EMAIL_REQUIRED_ERROR, surface);
            return;
        };
        self.draft.email = email.clone();

        match self.store.load() {
            Ok(Some(mut saved)) => {
                saved.email = email;
                self.draft = saved;
                surface.fill_form(&self.draft);
                surface.set_birth_time_disabled(self.draft.unknown_time);
                surface.set_ascendant_advisory(self.draft.ascendant_sign == UNKNOWN_SENTINEL);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Could not load saved form data: {}", e),
        }
    }

    /// A keystroke in a field clears its error state and saves the draft.
    pub fn on_field_input<U: FormSurface>(&mut self, field: FieldId, value: &str, surface: &mut U) {
        self.draft.set_raw_value(field, value);
        surface.clear_field_error(field);
        self.save_draft();
    }

    /// Leaving a field validates it and saves the draft.
    pub fn on_field_blur<U: FormSurface>(&mut self, field: FieldId, value: &str, surface: &mut U) {
        self.draft.set_raw_value(field, value);
        match validate_field(field, value, chrono::Local::now().date_naive()) {
            Ok(()) => surface.clear_field_error(field),
            Err(violation) => surface.set_field_error(field, &violation.message),
        }
        self.save_draft();
    }

    pub fn on_unknown_time_toggled<U: FormSurface>(&mut self, checked: bool, surface: &mut U) {
        self.draft.unknown_time = checked;
        if checked {
            self.draft.birth_time.clear();
        }
        surface.set_birth_time_disabled(checked);
        self.save_draft();
    }

    pub fn on_ascendant_changed<U: FormSurface>(&mut self, value: &str, surface: &mut U) {
        self.draft.ascendant_sign = value.to_string();
        surface.set_ascendant_advisory(value == UNKNOWN_SENTINEL);
        self.save_draft();
    }

    /// A suggestion picked from the place list: write the label through,
    /// clear any error on the field, save.
    pub fn on_place_selected<U: FormSurface>(&mut self, label: &str, surface: &mut U) {
        self.draft.birth_place = label.to_string();
        surface.set_birth_place(label);
        surface.clear_field_error(FieldId::BirthPlace);
        self.save_draft();
    }

    pub async fn on_submit<U: FormSurface>(&mut self, surface: &mut U) {
        // The form is hidden once a profile exists; a submit mid-flight is
        // also a no-op because the control is disabled.
        if matches!(self.state, SubmitState::Submitting | SubmitState::Success) {
            return;
        }

        self.clear_banner(surface);

        let today = chrono::Local::now().date_naive();
        let violations = validate_form(&self.draft, today);
        for field in FieldId::ALL {
            if rule_for(field).required {
                surface.clear_field_error(field);
            }
        }
        for violation in &violations {
            surface.set_field_error(violation.field, &violation.message);
        }
        if !violations.is_empty() {
            return;
        }

        let request = match CreateUserRequest::from_draft(&self.draft) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Could not build profile payload: {}", e);
                self.state = SubmitState::Failed;
                self.show_banner(GENERIC_FAILURE, surface);
                return;
            }
        };

        self.state = SubmitState::Submitting;
        surface.set_submitting(true);

        match self.gateway.create_profile(&request).await {
            Ok(SubmitOutcome::Accepted) => {
                if let Err(e) = self.store.clear() {
                    tracing::warn!("Could not clear saved form data: {}", e);
                }
                self.state = SubmitState::Success;
                surface.show_success();
            }
            Ok(SubmitOutcome::Rejected { status, body }) => {
                self.state = SubmitState::Failed;
                self.apply_failure(status, &body, surface);
            }
            Err(e) => {
                tracing::error!("Error creating profile: {}", e);
                self.state = SubmitState::Failed;
                self.show_banner(CONNECTIVITY_ERROR, surface);
            }
        }

        surface.set_submitting(false);
    }

    /// Maps a failure response onto the page: field-scoped errors go inline
    /// through the wire-name table, general errors become the transient
    /// banner, and a bare status falls back to a canned message.
    fn apply_failure<U: FormSurface>(&mut self, status: u16, body: &ApiResponse, surface: &mut U) {
        tracing::error!("Server rejected profile (status {})", status);
        surface.clear_all_field_errors();

        if let Some(errors) = &body.errors {
            for err in errors {
                match err.field.as_deref() {
                    Some(name) => match FieldId::from_wire(name) {
                        Some(field) => surface.set_field_error(field, &err.message),
                        None => {
                            let message = format!("{}: {}", name, err.message);
                            self.show_banner(&message, surface);
                        }
                    },
                    None => self.show_banner(&err.message, surface),
                }
            }
        } else if let (Some(error), Some(message)) = (body.error.as_deref(), body.message.as_deref())
        {
            self.show_banner(&format!("{}: {}", error, message), surface);
        } else if let Some(message) = body.message.as_deref() {
            self.show_banner(message, surface);
        } else {
            let canned = match status {
                400 => INVALID_DATA_ERROR,
                409 => DUPLICATE_EMAIL_ERROR,
                500 => SERVER_ERROR,
                _ => GENERIC_FAILURE,
            };
            self.show_banner(canned, surface);
        }
    }

    fn show_banner<U: FormSurface>(&mut self, message: &str, surface: &mut U) {
        surface.show_banner(message);
        self.banner_deadline = Some(Instant::now() + self.banner_ttl);
    }

    fn clear_banner<U: FormSurface>(&mut self, surface: &mut U) {
        surface.clear_banner();
        self.banner_deadline = None;
    }

    fn save_draft(&self) {
        if let Err(e) = self.store.save(&self.draft) {
            tracing::warn!("Could not save form data: {}", e);
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.banner_deadline
    }

    pub fn on_deadline<U: FormSurface>(&mut self, now: Instant, surface: &mut U) {
        if self.banner_deadline.is_some_and(|due| due <= now) {
            self.clear_banner(surface);
        }
    }
}
