pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileDraftStore, HttpProfileGateway, NominatimClient, TerminalSurface};
pub use config::PageContext;
pub use core::{AutocompleteController, FormController, FormEvent, FormSession};
pub use utils::error::{ProfileError, Result};
