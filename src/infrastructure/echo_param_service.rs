use crate::domain::initiate::InitiateRequest;
use crate::domain::params::RawPaymentFields;
use crate::domain::ports::ParamService;
use crate::error::ParamServiceError;
use async_trait::async_trait;

/// Placeholder credential for params that never went through a backend.
pub const UNSIGNED_HASH: &str = "unsigned";

/// An offline parameter service that echoes the request back.
///
/// The app reference id becomes the transaction id. Nothing is signed, so
/// this is only useful against a simulated SDK.
#[derive(Debug, Clone)]
pub struct EchoParamService {
    merchant_key: String,
}

impl EchoParamService {
    pub fn new(merchant_key: impl Into<String>) -> Self {
        Self {
            merchant_key: merchant_key.into(),
        }
    }
}

#[async_trait]
impl ParamService for EchoParamService {
    async fn initiate(
        &self,
        request: &InitiateRequest,
        is_production: bool,
    ) -> Result<RawPaymentFields, ParamServiceError> {
        Ok(RawPaymentFields {
            amount: Some(request.amount.to_string()),
            product_info: Some(request.product_info.clone()),
            key: Some(self.merchant_key.clone()),
            is_production,
            firstname: Some(request.first_name.clone()),
            email: Some(request.email.clone()),
            phone: Some(request.phone.clone()),
            txnid: Some(request.app_reference_id.clone()),
            surl: Some(request.surl.clone()),
            furl: Some(request.furl.clone()),
            hash: Some(UNSIGNED_HASH.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::ParamBuilder;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_echoed_fields_pass_validation() {
        let service = EchoParamService::new("key123");
        let request = InitiateRequest {
            amount: dec!(100),
            product_info: "Test Product".to_string(),
            first_name: "Aditya".to_string(),
            email: "aditya@example.com".to_string(),
            phone: "9999999999".to_string(),
            app_reference_id: "ref-1".to_string(),
            surl: "s".to_string(),
            furl: "f".to_string(),
        };

        let fields = service.initiate(&request, false).await.unwrap();
        let params = ParamBuilder::build(&fields).unwrap();
        assert_eq!(params.transaction_id, "ref-1");
        assert_eq!(params.merchant_key, "key123");
        assert_eq!(params.security_hash, UNSIGNED_HASH);
    }
}
