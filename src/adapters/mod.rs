// Adapters layer: concrete implementations for the external systems the
// ports describe (draft storage, profile API, geocoding, rendering).

pub mod geocode;
pub mod http;
pub mod storage;
pub mod terminal;

pub use geocode::NominatimClient;
pub use http::HttpProfileGateway;
pub use storage::FileDraftStore;
pub use terminal::TerminalSurface;
