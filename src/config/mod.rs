use crate::utils::error::Result;
use url::Url;

#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

pub const PRODUCTION_API_URL: &str = "https://alcina-server.duckdns.org/api";
pub const LOCAL_API_URL: &str = "http://localhost:3000/api";
pub const CREATE_USER_ENDPOINT: &str = "/users";
pub const STORAGE_KEY: &str = "alcina_profile_form_data";
pub const GEOCODING_URL: &str = "https://nominatim.openstreetmap.org/search";

/// The address the form page was opened on, query string included. The page
/// derives its email, its post-success state and an optional API override
/// from here.
#[derive(Debug, Clone)]
pub struct PageContext {
    url: Url,
}

impl PageContext {
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw)?;
        Ok(PageContext { url })
    }

    pub fn query_param(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// The email the profile is created for. Required to proceed.
    pub fn email(&self) -> Option<String> {
        self.query_param("email").filter(|v| !v.is_empty())
    }

    /// Truthy `success` flag: the page is opened in the post-success state.
    pub fn success_flag(&self) -> bool {
        matches!(
            self.query_param("success").as_deref(),
            Some("1") | Some("true")
        )
    }

    pub fn api_override(&self) -> Option<String> {
        self.query_param("api").filter(|v| !v.is_empty())
    }

    fn is_local_environment(&self) -> bool {
        if self.url.scheme() == "file" {
            return true;
        }
        matches!(self.url.host_str(), Some("localhost") | Some("127.0.0.1"))
    }

    /// API base URL resolution order: explicit query override, then the
    /// production flag, then local-environment auto-detection, falling back
    /// to the production URL.
    pub fn resolve_api_base(&self, production: bool) -> String {
        if let Some(api) = self.api_override() {
            return api;
        }
        if production {
            return PRODUCTION_API_URL.to_string();
        }
        if self.is_local_environment() {
            LOCAL_API_URL.to_string()
        } else {
            PRODUCTION_API_URL.to_string()
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "alcina-profile")]
#[command(about = "Profile-creation form client")]
pub struct CliConfig {
    /// Address of the form page; its query string carries the email,
    /// success and api parameters.
    #[arg(long, default_value = "file:///profile.html")]
    pub page_url: String,

    /// Directory the in-progress draft is persisted under.
    #[arg(long, default_value = "./data")]
    pub storage_path: String,

    /// Force the production API endpoint.
    #[arg(long)]
    pub production: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_page_url("page_url", &self.page_url)?;
        validation::validate_path("storage_path", &self.storage_path)?;
        let page = PageContext::parse(&self.page_url)?;
        if let Some(api) = page.api_override() {
            validation::validate_api_url("api", &api)?;
        }
        Ok(())
    }
}
