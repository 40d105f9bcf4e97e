use crate::config::ServiceConfig;
use crate::domain::initiate::{InitiateRequest, InitiateResponse};
use crate::domain::params::RawPaymentFields;
use crate::domain::ports::ParamService;
use crate::error::ParamServiceError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Fetches payment params from the merchant backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpParamService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpParamService {
    pub fn new(config: &ServiceConfig) -> Result<Self, ParamServiceError> {
        let endpoint = config.initiate_url();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ParamServiceError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ParamService for HttpParamService {
    async fn initiate(
        &self,
        request: &InitiateRequest,
        is_production: bool,
    ) -> Result<RawPaymentFields, ParamServiceError> {
        debug!(endpoint = %self.endpoint, app_reference_id = %request.app_reference_id, "requesting payment params");
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|source| ParamServiceError::Http {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ParamServiceError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let body: InitiateResponse =
            response
                .json()
                .await
                .map_err(|source| ParamServiceError::Deserialization {
                    endpoint: self.endpoint.clone(),
                    source,
                })?;

        match body.data {
            Some(data) if body.success => Ok(data.params.into_raw_fields(is_production)),
            _ => Err(ParamServiceError::Rejected),
        }
    }
}
