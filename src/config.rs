use std::time::Duration;

/// Tag the SDK attaches to its "activity result" notification.
pub const PAYMENT_REQUEST_CODE: i32 = 0x5055;

pub const DEFAULT_RESULT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Notifications tagged with any other code are not ours.
    pub request_code: i32,
    /// How long a launched session may wait for its result. `None` waits forever.
    pub result_timeout: Option<Duration>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            request_code: PAYMENT_REQUEST_CODE,
            result_timeout: Some(DEFAULT_RESULT_TIMEOUT),
        }
    }
}

impl BridgeConfig {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.result_timeout = timeout;
        self
    }
}

/// Connection settings for the remote parameter service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// API root, e.g. `http://10.0.2.2:5004/api/v1`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    pub fn initiate_url(&self) -> String {
        format!("{}/payment/initiate", self.base_url.trim_end_matches('/'))
    }
}
