use crate::domain::notification::ActivityResult;
use crate::domain::params::{Environment, PaymentParams};
use crate::domain::ports::{PaymentSdk, ScreenId};
use crate::error::SdkError;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// How the simulated payment UI ends.
#[derive(Debug, Clone, PartialEq)]
pub enum Scenario {
    Success,
    Failure(String),
    Cancel,
    /// Delivers a result the bridge cannot decode.
    Malformed,
    /// The UI is dismissed without ever reporting back.
    Silent,
    /// The SDK refuses to open its UI.
    LaunchError(String),
    /// Delivers exactly this payload.
    Raw(Option<Value>),
}

/// Counts SDK entry point calls.
#[derive(Debug, Default)]
pub struct SdkCalls {
    inits: AtomicUsize,
    launches: AtomicUsize,
}

impl SdkCalls {
    pub fn inits(&self) -> usize {
        self.inits.load(Ordering::SeqCst)
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

/// A stand-in for the UPI SDK that plays a fixed `Scenario`.
///
/// Results are posted to the platform notification channel after `delay`,
/// from a spawned task, the same way the real SDK reports back through the
/// host's activity-result callback.
pub struct SimulatedSdk {
    scenario: Scenario,
    request_code: i32,
    delay: Duration,
    notifications: UnboundedSender<ActivityResult>,
    calls: Arc<SdkCalls>,
}

impl SimulatedSdk {
    pub fn new(
        scenario: Scenario,
        request_code: i32,
        notifications: UnboundedSender<ActivityResult>,
    ) -> Self {
        Self {
            scenario,
            request_code,
            delay: Duration::from_millis(10),
            notifications,
            calls: Arc::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Arc<SdkCalls> {
        Arc::clone(&self.calls)
    }

    fn payload_for(&self, params: &PaymentParams) -> Option<Value> {
        let txn_id = &params.transaction_id;
        match &self.scenario {
            Scenario::Success => Some(json!({
                "status": "success",
                "message": "payment successful",
                "txnId": txn_id,
                "paymentId": format!("PAY-{txn_id}"),
                "amount": params.amount.to_string(),
                "merchantKey": params.merchant_key,
            })),
            Scenario::Failure(message) => Some(json!({
                "status": "failure",
                "message": message,
                "txnId": txn_id,
            })),
            Scenario::Cancel => Some(json!({
                "status": "cancelled",
                "txnId": txn_id,
            })),
            Scenario::Malformed => Some(json!({ "unexpected": true })),
            Scenario::Raw(payload) => payload.clone(),
            Scenario::Silent | Scenario::LaunchError(_) => None,
        }
    }
}

impl PaymentSdk for SimulatedSdk {
    fn init(
        &self,
        screen: ScreenId,
        _merchant_key: &str,
        environment: Environment,
    ) -> Result<(), SdkError> {
        self.calls.inits.fetch_add(1, Ordering::SeqCst);
        debug!(screen = screen.0, %environment, "simulated SDK initialized");
        Ok(())
    }

    fn launch_payment_ui(&self, screen: ScreenId, params: &PaymentParams) -> Result<(), SdkError> {
        self.calls.launches.fetch_add(1, Ordering::SeqCst);
        match &self.scenario {
            Scenario::LaunchError(message) => return Err(SdkError(message.clone())),
            Scenario::Silent => {
                debug!(screen = screen.0, "simulated payment UI will never report back");
                return Ok(());
            }
            _ => {}
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| SdkError("no async runtime available to run the payment UI".into()))?;
        let result = ActivityResult::new(self.request_code, self.payload_for(params));
        let notifications = self.notifications.clone();
        let delay = self.delay;
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // The host may already be gone; nothing is listening then.
            let _ = notifications.send(result);
        });
        debug!(screen = screen.0, "simulated payment UI opened");
        Ok(())
    }
}
