use crate::config::PageContext;
use crate::core::autocomplete::AutocompleteController;
use crate::core::form::FormController;
use crate::domain::model::FieldId;
use crate::domain::ports::{DraftStore, FormSurface, PlaceSearch, ProfileGateway};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

/// Everything the page can do to the two controllers. One event per
/// interaction, in the order the surface reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldInput { field: FieldId, value: String },
    FieldBlur { field: FieldId, value: String },
    UnknownTimeToggled(bool),
    AscendantChanged(String),
    PlaceInput(String),
    PlaceFocus,
    PlaceBlur,
    OutsideClick,
    SuggestionChosen(usize),
    Submit,
}

/// Single-threaded event loop over both controllers: multiplexes incoming
/// events with the earliest controller deadline (debounce, blur grace,
/// banner expiry). The controllers only meet through the shared surface.
pub struct FormSession<G, D, S, U>
where
    G: ProfileGateway,
    D: DraftStore,
    S: PlaceSearch,
    U: FormSurface,
{
    form: FormController<G, D>,
    autocomplete: AutocompleteController<S>,
    surface: U,
}

impl<G, D, S, U> FormSession<G, D, S, U>
where
    G: ProfileGateway,
    D: DraftStore,
    S: PlaceSearch,
    U: FormSurface,
{
    pub fn new(
        form: FormController<G, D>,
        autocomplete: AutocompleteController<S>,
        surface: U,
    ) -> Self {
        Self {
            form,
            autocomplete,
            surface,
        }
    }

    /// Runs until the event channel closes. Returns the surface so callers
    /// can inspect the final render state.
    pub async fn run(mut self, page: &PageContext, mut events: mpsc::Receiver<FormEvent>) -> U {
        self.form.init(page, &mut self.surface);

        loop {
            let deadline = earliest(
                self.form.next_deadline(),
                self.autocomplete.next_deadline(),
            );
            let wake = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(60));

            tokio::select! {
                maybe_event = events.recv() => match maybe_event {
                    Some(event) => self.dispatch(event).await,
                    None => break,
                },
                _ = time::sleep_until(wake), if deadline.is_some() => {
                    let now = Instant::now();
                    self.form.on_deadline(now, &mut self.surface);
                    self.autocomplete.on_deadline(now, &mut self.surface).await;
                }
            }
        }

        self.surface
    }

    async fn dispatch(&mut self, event: FormEvent) {
        match event {
            FormEvent::FieldInput { field, value } => {
                self.form.on_field_input(field, &value, &mut self.surface);
            }
            FormEvent::FieldBlur { field, value } => {
                self.form.on_field_blur(field, &value, &mut self.surface);
            }
            FormEvent::UnknownTimeToggled(checked) => {
                self.form.on_unknown_time_toggled(checked, &mut self.surface);
            }
            FormEvent::AscendantChanged(value) => {
                self.form.on_ascendant_changed(&value, &mut self.surface);
            }
            FormEvent::PlaceInput(value) => {
                // The birth-place box feeds both controllers: the draft
                // mirror and the debounced lookup.
                self.form
                    .on_field_input(FieldId::BirthPlace, &value, &mut self.surface);
                self.autocomplete.on_input(&value, &mut self.surface);
            }
            FormEvent::PlaceFocus => {
                let value = self.form.draft().birth_place.clone();
                self.autocomplete.on_focus(&value, &mut self.surface).await;
            }
            FormEvent::PlaceBlur => {
                self.autocomplete.on_blur();
                let value = self.form.draft().birth_place.clone();
                self.form
                    .on_field_blur(FieldId::BirthPlace, &value, &mut self.surface);
            }
            FormEvent::OutsideClick => {
                self.autocomplete.dismiss(&mut self.surface);
            }
            FormEvent::SuggestionChosen(index) => {
                if let Some(label) = self.autocomplete.choose(index, &mut self.surface) {
                    self.form.on_place_selected(&label, &mut self.surface);
                }
            }
            FormEvent::Submit => {
                self.form.on_submit(&mut self.surface).await;
            }
        }
    }
}

fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Line-command grammar for the terminal driver. One event per line;
/// unknown input yields `None`.
pub fn parse_command(line: &str) -> Option<FormEvent> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "name" => Some(FormEvent::FieldBlur {
            field: FieldId::Name,
            value: rest.to_string(),
        }),
        "dob" => Some(FormEvent::FieldBlur {
            field: FieldId::DateOfBirth,
            value: rest.to_string(),
        }),
        "time" => Some(FormEvent::FieldBlur {
            field: FieldId::BirthTime,
            value: rest.to_string(),
        }),
        "unknown" => match rest {
            "on" => Some(FormEvent::UnknownTimeToggled(true)),
            "off" => Some(FormEvent::UnknownTimeToggled(false)),
            _ => None,
        },
        "sun" => Some(FormEvent::FieldBlur {
            field: FieldId::SunSign,
            value: rest.to_string(),
        }),
        "asc" => Some(FormEvent::AscendantChanged(rest.to_string())),
        "place" => Some(FormEvent::PlaceInput(rest.to_string())),
        "focus" => Some(FormEvent::PlaceFocus),
        "blur" => Some(FormEvent::PlaceBlur),
        "dismiss" => Some(FormEvent::OutsideClick),
        "pick" => rest
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .map(|n| FormEvent::SuggestionChosen(n - 1)),
        "submit" => Some(FormEvent::Submit),
        _ => None,
    }
}
