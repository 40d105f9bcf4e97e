use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A platform "activity result" notification.
///
/// The host receives these for every external interaction it starts; only
/// those tagged with the payment request code belong to the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResult {
    pub request_code: i32,
    pub payload: Option<Value>,
}

impl ActivityResult {
    pub fn new(request_code: i32, payload: Option<Value>) -> Self {
        Self {
            request_code,
            payload,
        }
    }
}
