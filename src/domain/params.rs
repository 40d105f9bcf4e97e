use crate::error::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest currency unit is 1/100.
pub const MINOR_UNIT_SCALE: u32 = 2;
pub const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 8..=15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    #[default]
    Test,
    Production,
}

impl Environment {
    pub fn from_production_flag(is_production: bool) -> Self {
        if is_production {
            Self::Production
        } else {
            Self::Test
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Test => f.write_str("TEST"),
            Self::Production => f.write_str("PRODUCTION"),
        }
    }
}

/// A positive payment amount with at most minor-unit precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::new("amount", "must be positive"));
        }
        if value.normalize().scale() > MINOR_UNIT_SCALE {
            return Err(ValidationError::new(
                "amount",
                format!("more than {MINOR_UNIT_SCALE} decimal places"),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|_| ValidationError::new("amount", format!("`{s}` is not a number")))?;
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub first_name: String,
    pub email: String,
    pub phone: String,
}

/// Callback URLs consumed by the remote service, never by the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnUrls {
    pub success: String,
    pub failure: String,
}

/// A validated payment request, ready to hand to the SDK.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentParams {
    pub amount: Amount,
    pub product_info: String,
    pub merchant_key: String,
    pub environment: Environment,
    pub customer: Customer,
    pub transaction_id: String,
    pub return_urls: ReturnUrls,
    /// Computed server-side and forwarded untouched.
    pub security_hash: String,
}

/// Caller-supplied payment fields, keyed the way the SDK bridge receives them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPaymentFields {
    pub amount: Option<String>,
    #[serde(rename = "productInfo")]
    pub product_info: Option<String>,
    pub key: Option<String>,
    #[serde(rename = "isProduction", default)]
    pub is_production: bool,
    pub firstname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub txnid: Option<String>,
    pub surl: Option<String>,
    pub furl: Option<String>,
    pub hash: Option<String>,
}

/// Validates raw fields into `PaymentParams`.
///
/// Fields are checked in declaration order and the first failure is
/// returned; later fields are not inspected.
pub struct ParamBuilder;

impl ParamBuilder {
    pub fn build(raw: &RawPaymentFields) -> Result<PaymentParams, ValidationError> {
        let amount: Amount = required("amount", &raw.amount)?.parse()?;
        let product_info = required("productInfo", &raw.product_info)?;
        let merchant_key = required("key", &raw.key)?;
        let first_name = required("firstname", &raw.firstname)?;
        let email = required("email", &raw.email)?;
        validate_email(&email)?;
        let phone = required("phone", &raw.phone)?;
        validate_phone(&phone)?;
        let transaction_id = required("txnid", &raw.txnid)?;
        let success = required("surl", &raw.surl)?;
        let failure = required("furl", &raw.furl)?;
        let security_hash = required("hash", &raw.hash)?;

        Ok(PaymentParams {
            amount,
            product_info,
            merchant_key,
            environment: Environment::from_production_flag(raw.is_production),
            customer: Customer {
                first_name,
                email,
                phone,
            },
            transaction_id,
            return_urls: ReturnUrls { success, failure },
            security_hash,
        })
    }
}

fn required(field: &'static str, value: &Option<String>) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        Some(_) => Err(ValidationError::new(field, "must not be empty")),
        None => Err(ValidationError::new(field, "is required")),
    }
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("phone", "must contain digits only"));
    }
    if !PHONE_DIGITS.contains(&phone.len()) {
        return Err(ValidationError::new(
            "phone",
            format!(
                "must be {} to {} digits long",
                PHONE_DIGITS.start(),
                PHONE_DIGITS.end()
            ),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let plausible = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if plausible {
        Ok(())
    } else {
        Err(ValidationError::new("email", "is not an email address"))
    }
}
