use crate::config::CREATE_USER_ENDPOINT;
use crate::domain::model::{ApiResponse, CreateUserRequest, SubmitOutcome};
use crate::domain::ports::ProfileGateway;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// The profile-creation API over HTTP.
pub struct HttpProfileGateway {
    client: Client,
    base_url: String,
}

impl HttpProfileGateway {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl ProfileGateway for HttpProfileGateway {
    async fn create_profile(&self, request: &CreateUserRequest) -> Result<SubmitOutcome> {
        let url = format!("{}{}", self.base_url, CREATE_USER_ENDPOINT);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body: ApiResponse = response.json().await?;
        if status.is_success() && body.success {
            Ok(SubmitOutcome::Accepted)
        } else {
            Ok(SubmitOutcome::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}
