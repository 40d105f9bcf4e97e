use crate::application::bridge::PaymentBridge;
use crate::domain::initiate::InitiateRequest;
use crate::domain::outcome::PaymentOutcome;
use crate::domain::params::{Environment, ParamBuilder};
use crate::domain::ports::ParamServiceBox;
use crate::error::Result;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

/// What the customer is paying for.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub amount: Decimal,
    pub product_info: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub success_url: String,
    pub failure_url: String,
}

impl CheckoutRequest {
    fn to_initiate(&self, app_reference_id: String) -> InitiateRequest {
        InitiateRequest {
            amount: self.amount,
            product_info: self.product_info.clone(),
            first_name: self.first_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            app_reference_id,
            surl: self.success_url.clone(),
            furl: self.failure_url.clone(),
        }
    }
}

/// Runs one payment end to end: initialize, fetch params, launch, await.
pub struct CheckoutFlow {
    bridge: PaymentBridge,
    service: ParamServiceBox,
    merchant_key: String,
    environment: Environment,
}

impl CheckoutFlow {
    pub fn new(
        bridge: PaymentBridge,
        service: ParamServiceBox,
        merchant_key: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            bridge,
            service,
            merchant_key: merchant_key.into(),
            environment,
        }
    }

    pub fn bridge(&self) -> &PaymentBridge {
        &self.bridge
    }

    pub async fn run(&self, request: &CheckoutRequest) -> Result<PaymentOutcome> {
        self.bridge
            .initialize(&self.merchant_key, self.environment)
            .await?;

        let initiate = request.to_initiate(Uuid::new_v4().to_string());
        let fields = self
            .service
            .initiate(&initiate, self.environment == Environment::Production)
            .await?;
        let params = ParamBuilder::build(&fields)?;
        info!(
            transaction_id = %params.transaction_id,
            app_reference_id = %initiate.app_reference_id,
            "payment params received"
        );

        let pending = self.bridge.launch(params).await?;
        Ok(pending.outcome().await?)
    }
}
