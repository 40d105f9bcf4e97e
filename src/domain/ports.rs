use super::initiate::InitiateRequest;
use super::params::{Environment, PaymentParams, RawPaymentFields};
use crate::error::{ParamServiceError, SdkError};
use async_trait::async_trait;

/// Identifies the host screen an SDK call is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenId(pub u64);

/// The host application surface the SDK draws on.
pub trait HostContext: Send + Sync {
    /// `None` when no screen is in the foreground.
    fn foreground_screen(&self) -> Option<ScreenId>;
}

/// Entry points of the external payment SDK.
///
/// Both calls return as soon as the SDK has taken over; the payment
/// result arrives later as an `ActivityResult`.
pub trait PaymentSdk: Send + Sync {
    fn init(
        &self,
        screen: ScreenId,
        merchant_key: &str,
        environment: Environment,
    ) -> Result<(), SdkError>;

    fn launch_payment_ui(&self, screen: ScreenId, params: &PaymentParams) -> Result<(), SdkError>;
}

/// Computes transaction terms and the security hash for a payment.
#[async_trait]
pub trait ParamService: Send + Sync {
    async fn initiate(
        &self,
        request: &InitiateRequest,
        is_production: bool,
    ) -> Result<RawPaymentFields, ParamServiceError>;
}

pub type HostContextBox = Box<dyn HostContext>;
pub type PaymentSdkBox = Box<dyn PaymentSdk>;
pub type ParamServiceBox = Box<dyn ParamService>;
