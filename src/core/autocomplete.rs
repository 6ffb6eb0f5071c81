use crate::domain::model::{Place, Suggestion};
use crate::domain::ports::{FormSurface, PlaceSearch};
use std::time::Duration;
use tokio::time::Instant;

pub const MIN_QUERY_LEN: usize = 2;
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);
pub const BLUR_GRACE: Duration = Duration::from_millis(150);
pub const RESULT_LIMIT: usize = 5;

struct PendingQuery {
    query: String,
    due: Instant,
}

/// Debounced place-search box. Owns the armed debounce and blur-grace
/// deadlines as plain data; the session loop sleeps until `next_deadline`
/// and calls `on_deadline` when it fires.
pub struct AutocompleteController<S: PlaceSearch> {
    search: S,
    debounce_delay: Duration,
    blur_grace: Duration,
    result_limit: usize,
    pending: Option<PendingQuery>,
    blur_deadline: Option<Instant>,
    last_query: Option<String>,
    results: Vec<Place>,
}

impl<S: PlaceSearch> AutocompleteController<S> {
    pub fn new(search: S) -> Self {
        Self::with_timings(search, DEBOUNCE_DELAY, BLUR_GRACE)
    }

    pub fn with_timings(search: S, debounce_delay: Duration, blur_grace: Duration) -> Self {
        Self {
            search,
            debounce_delay,
            blur_grace,
            result_limit: RESULT_LIMIT,
            pending: None,
            blur_deadline: None,
            last_query: None,
            results: Vec::new(),
        }
    }

    /// A keystroke. Queries under the minimum length close the list and
    /// discard any armed lookup; anything longer re-arms the debounce timer
    /// so only the value at the end of a burst is looked up.
    pub fn on_input<U: FormSurface>(&mut self, raw: &str, surface: &mut U) {
        let query = raw.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            self.pending = None;
            surface.hide_suggestions();
            return;
        }
        self.pending = Some(PendingQuery {
            query: query.to_string(),
            due: Instant::now() + self.debounce_delay,
        });
    }

    /// Focus re-opens the lookup immediately when the field already holds a
    /// long-enough query.
    pub async fn on_focus<U: FormSurface>(&mut self, raw: &str, surface: &mut U) {
        let query = raw.trim();
        if query.chars().count() >= MIN_QUERY_LEN {
            self.run_search(query.to_string(), surface).await;
        }
    }

    /// Leaving the field arms a short grace period before the list closes,
    /// long enough for a selection on the list itself to land first.
    pub fn on_blur(&mut self) {
        self.blur_deadline = Some(Instant::now() + self.blur_grace);
    }

    /// A click outside both the input and the list closes it immediately.
    pub fn dismiss<U: FormSurface>(&mut self, surface: &mut U) {
        surface.hide_suggestions();
    }

    /// Takes the chosen suggestion's label and closes the list. Returns
    /// `None` when the index no longer points at a result.
    pub fn choose<U: FormSurface>(&mut self, index: usize, surface: &mut U) -> Option<String> {
        let label = self.results.get(index).map(Place::label)?;
        self.pending = None;
        self.blur_deadline = None;
        surface.hide_suggestions();
        Some(label)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        let debounce = self.pending.as_ref().map(|p| p.due);
        match (debounce, self.blur_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub async fn on_deadline<U: FormSurface>(&mut self, now: Instant, surface: &mut U) {
        if self.pending.as_ref().is_some_and(|p| p.due <= now) {
            if let Some(pending) = self.pending.take() {
                self.run_search(pending.query, surface).await;
            }
        }
        if self.blur_deadline.is_some_and(|due| due <= now) {
            self.blur_deadline = None;
            surface.hide_suggestions();
        }
    }

    async fn run_search<U: FormSurface>(&mut self, query: String, surface: &mut U) {
        // Identical consecutive queries are suppressed.
        if self.last_query.as_deref() == Some(query.as_str()) {
            return;
        }
        self.last_query = Some(query.clone());

        surface.show_suggestions_loading();

        match self.search.search(&query, self.result_limit).await {
            Ok(mut results) if !results.is_empty() => {
                results.truncate(self.result_limit);
                let items: Vec<Suggestion> = results.iter().map(Suggestion::from_place).collect();
                self.results = results;
                surface.show_suggestions(&items);
            }
            Ok(_) => {
                self.results.clear();
                surface.show_no_results();
            }
            Err(e) => {
                tracing::warn!("Location search failed: {}", e);
                self.results.clear();
                surface.show_no_results();
            }
        }
    }
}
