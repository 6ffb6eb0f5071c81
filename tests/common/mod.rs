#![allow(dead_code)]

use alcina_profile::domain::model::{FieldId, ProfileDraft, Suggestion};
use alcina_profile::domain::ports::FormSurface;
use std::collections::HashMap;

/// Records every render call so tests can assert on the final page state.
#[derive(Default)]
pub struct RecordingSurface {
    pub field_errors: HashMap<&'static str, String>,
    pub banners: Vec<String>,
    pub banner_visible: bool,
    pub success_shown: bool,
    pub submitting_transitions: Vec<bool>,
    pub filled: Option<ProfileDraft>,
    pub time_disabled: Option<bool>,
    pub advisory: Option<bool>,
    pub birth_place: Option<String>,
    pub suggestions: Vec<Vec<Suggestion>>,
    pub loading_shown: usize,
    pub no_results_shown: usize,
    pub hidden: usize,
}

impl FormSurface for RecordingSurface {
    fn set_field_error(&mut self, field: FieldId, message: &str) {
        self.field_errors.insert(field.form_name(), message.to_string());
    }

    fn clear_field_error(&mut self, field: FieldId) {
        self.field_errors.remove(field.form_name());
    }

    fn clear_all_field_errors(&mut self) {
        self.field_errors.clear();
    }

    fn show_banner(&mut self, message: &str) {
        self.banners.push(message.to_string());
        self.banner_visible = true;
    }

    fn clear_banner(&mut self) {
        self.banner_visible = false;
    }

    fn set_submitting(&mut self, submitting: bool) {
        self.submitting_transitions.push(submitting);
    }

    fn show_success(&mut self) {
        self.success_shown = true;
    }

    fn fill_form(&mut self, draft: &ProfileDraft) {
        self.filled = Some(draft.clone());
    }

    fn set_birth_time_disabled(&mut self, disabled: bool) {
        self.time_disabled = Some(disabled);
    }

    fn set_ascendant_advisory(&mut self, visible: bool) {
        self.advisory = Some(visible);
    }

    fn set_birth_place(&mut self, value: &str) {
        self.birth_place = Some(value.to_string());
    }

    fn show_suggestions(&mut self, items: &[Suggestion]) {
        self.suggestions.push(items.to_vec());
    }

    fn show_suggestions_loading(&mut self) {
        self.loading_shown += 1;
    }

    fn show_no_results(&mut self) {
        self.no_results_shown += 1;
    }

    fn hide_suggestions(&mut self) {
        self.hidden += 1;
    }
}
