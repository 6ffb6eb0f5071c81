use crate::domain::model::{FieldId, ProfileDraft, Suggestion};
use crate::domain::ports::FormSurface;

/// Renders the page state as terminal output. Errors go to stderr so they
/// stand out from the command prompt flow.
#[derive(Debug, Default)]
pub struct TerminalSurface;

impl FormSurface for TerminalSurface {
    fn set_field_error(&mut self, field: FieldId, message: &str) {
        eprintln!("❌ {}: {}", field.label(), message);
    }

    fn clear_field_error(&mut self, _field: FieldId) {}

    fn clear_all_field_errors(&mut self) {}

    fn show_banner(&mut self, message: &str) {
        eprintln!("⚠️  {}", message);
    }

    fn clear_banner(&mut self) {}

    fn set_submitting(&mut self, submitting: bool) {
        if submitting {
            println!("⏳ Creating profile...");
        }
    }

    fn show_success(&mut self) {
        println!("✅ Profile created successfully!");
        println!("   You can now close this window and return to the extension.");
    }

    fn fill_form(&mut self, draft: &ProfileDraft) {
        println!("📝 Restored saved form data:");
        for field in FieldId::ALL {
            let value = draft.raw_value(field);
            if !value.is_empty() {
                println!("   {}: {}", field.label(), value);
            }
        }
    }

    fn set_birth_time_disabled(&mut self, disabled: bool) {
        if disabled {
            println!("🕐 Birth time marked unknown (field disabled)");
        } else {
            println!("🕐 Birth time field enabled");
        }
    }

    fn set_ascendant_advisory(&mut self, visible: bool) {
        if visible {
            println!("ℹ️  No ascendant sign selected; the profile will record it as unknown.");
        }
    }

    fn set_birth_place(&mut self, value: &str) {
        println!("📍 Birth place: {}", value);
    }

    fn show_suggestions(&mut self, items: &[Suggestion]) {
        println!("📍 Locations (pick <n> to choose):");
        for (i, item) in items.iter().enumerate() {
            if item.detail.is_empty() {
                println!("   {}. {}", i + 1, item.label);
            } else {
                println!("   {}. {} ({})", i + 1, item.label, item.detail);
            }
        }
    }

    fn show_suggestions_loading(&mut self) {
        println!("Searching locations...");
    }

    fn show_no_results(&mut self) {
        println!("No locations found");
    }

    fn hide_suggestions(&mut self) {}
}
