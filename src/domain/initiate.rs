//! Wire types of the remote parameter service.

use crate::domain::params::RawPaymentFields;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /payment/initiate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub product_info: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub app_reference_id: String,
    pub surl: String,
    pub furl: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitiateResponse {
    pub success: bool,
    pub data: Option<InitiateData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitiateData {
    pub params: ServiceParams,
}

/// Transaction terms as computed by the service, including its hash.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceParams {
    pub amount: Option<Value>,
    pub productinfo: Option<String>,
    pub key: Option<String>,
    pub phone: Option<String>,
    pub txnid: Option<String>,
    pub firstname: Option<String>,
    pub email: Option<String>,
    pub surl: Option<String>,
    pub furl: Option<String>,
    pub hash: Option<String>,
}

impl ServiceParams {
    /// Maps service params onto the fields `ParamBuilder` validates.
    pub fn into_raw_fields(self, is_production: bool) -> RawPaymentFields {
        RawPaymentFields {
            amount: self.amount.and_then(|amount| match amount {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
            product_info: self.productinfo,
            key: self.key,
            is_production,
            firstname: self.firstname,
            email: self.email,
            phone: self.phone,
            txnid: self.txnid,
            surl: self.surl,
            furl: self.furl,
            hash: self.hash,
        }
    }
}
