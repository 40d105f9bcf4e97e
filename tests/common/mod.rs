#![allow(dead_code)]

use paybridge::application::bridge::PaymentBridge;
use paybridge::config::BridgeConfig;
use paybridge::domain::params::{ParamBuilder, PaymentParams, RawPaymentFields};
use paybridge::domain::ports::ScreenId;
use paybridge::infrastructure::host::ForegroundHost;
use paybridge::infrastructure::platform::{notification_channel, spawn_result_dispatcher};
use paybridge::infrastructure::simulated_sdk::{Scenario, SdkCalls, SimulatedSdk};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct Harness {
    pub bridge: PaymentBridge,
    pub host: ForegroundHost,
    pub calls: Arc<SdkCalls>,
    pub dispatcher: JoinHandle<()>,
}

/// A bridge wired to a simulated SDK through the platform notification channel.
pub fn harness(scenario: Scenario, config: BridgeConfig) -> Harness {
    let (notifications, inbox) = notification_channel();
    let sdk = SimulatedSdk::new(scenario, config.request_code, notifications)
        .with_delay(Duration::from_millis(20));
    let calls = sdk.calls();
    let host = ForegroundHost::new(ScreenId(1));
    let bridge = PaymentBridge::new(Box::new(sdk), Box::new(host.clone()), config);
    let dispatcher = spawn_result_dispatcher(inbox, bridge.correlator());
    Harness {
        bridge,
        host,
        calls,
        dispatcher,
    }
}

pub fn raw_fields(txnid: &str) -> RawPaymentFields {
    RawPaymentFields {
        amount: Some("100".to_string()),
        product_info: Some("Test Product".to_string()),
        key: Some("key123".to_string()),
        is_production: false,
        firstname: Some("Aditya".to_string()),
        email: Some("aditya@example.com".to_string()),
        phone: Some("9999999999".to_string()),
        txnid: Some(txnid.to_string()),
        surl: Some("https://example.com/success".to_string()),
        furl: Some("https://example.com/failure".to_string()),
        hash: Some("server-hash".to_string()),
    }
}

pub fn params(txnid: &str) -> PaymentParams {
    ParamBuilder::build(&raw_fields(txnid)).expect("valid params")
}
