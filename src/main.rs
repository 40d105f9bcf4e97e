use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use paybridge::application::bridge::PaymentBridge;
use paybridge::application::checkout::{CheckoutFlow, CheckoutRequest};
use paybridge::config::{BridgeConfig, ServiceConfig};
use paybridge::domain::params::Environment;
use paybridge::domain::ports::{ParamServiceBox, ScreenId};
use paybridge::infrastructure::echo_param_service::EchoParamService;
use paybridge::infrastructure::host::ForegroundHost;
use paybridge::infrastructure::http_param_service::HttpParamService;
use paybridge::infrastructure::platform::{notification_channel, spawn_result_dispatcher};
use paybridge::infrastructure::simulated_sdk::{Scenario, SimulatedSdk};
use paybridge::interfaces::report::OutcomeWriter;
use rust_decimal::Decimal;
use std::io;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_API_BASE: &str = "http://localhost:5004/api/v1";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Simulate {
    Success,
    Failure,
    Cancel,
    Malformed,
    Silent,
    LaunchError,
}

impl Simulate {
    fn into_scenario(self, failure_message: &str) -> Scenario {
        match self {
            Self::Success => Scenario::Success,
            Self::Failure => Scenario::Failure(failure_message.to_string()),
            Self::Cancel => Scenario::Cancel,
            Self::Malformed => Scenario::Malformed,
            Self::Silent => Scenario::Silent,
            Self::LaunchError => Scenario::LaunchError(failure_message.to_string()),
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Merchant key issued by the payment provider
    #[arg(long, env = "PAYBRIDGE_MERCHANT_KEY", default_value = "test-merchant-key")]
    merchant_key: String,

    /// Use the production environment instead of test
    #[arg(long, env = "PAYBRIDGE_PRODUCTION")]
    production: bool,

    /// Base URL of the payment backend. Without it params are echoed offline.
    #[arg(long, env = "PAYBRIDGE_SERVICE_URL")]
    service_url: Option<String>,

    #[arg(long, env = "PAYBRIDGE_AMOUNT", default_value = "100")]
    amount: Decimal,

    #[arg(long, env = "PAYBRIDGE_PRODUCT_INFO", default_value = "Test Product")]
    product_info: String,

    #[arg(long, env = "PAYBRIDGE_FIRST_NAME", default_value = "Test Customer")]
    first_name: String,

    #[arg(long, env = "PAYBRIDGE_EMAIL", default_value = "customer@example.com")]
    email: String,

    #[arg(long, env = "PAYBRIDGE_PHONE", default_value = "9999999999")]
    phone: String,

    /// How the simulated payment UI ends
    #[arg(long, value_enum, env = "PAYBRIDGE_SIMULATE", default_value_t = Simulate::Success)]
    simulate: Simulate,

    /// Message used by the failure and launch-error simulations
    #[arg(long, env = "PAYBRIDGE_FAILURE_MESSAGE", default_value = "insufficient funds")]
    failure_message: String,

    /// Seconds to wait for the payment result (0 waits forever)
    #[arg(long, env = "PAYBRIDGE_TIMEOUT_SECS", default_value_t = 300)]
    timeout_secs: u64,

    /// Print the outcome as JSON
    #[arg(long, env = "PAYBRIDGE_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let timeout = (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs));
    let config = BridgeConfig::default().with_timeout(timeout);

    // Wire the simulated SDK's results back into the bridge
    let (notifications, inbox) = notification_channel();
    let sdk = SimulatedSdk::new(
        cli.simulate.into_scenario(&cli.failure_message),
        config.request_code,
        notifications,
    );
    let bridge = PaymentBridge::new(
        Box::new(sdk),
        Box::new(ForegroundHost::new(ScreenId(1))),
        config,
    );
    let dispatcher = spawn_result_dispatcher(inbox, bridge.correlator());

    let api_base = cli.service_url.as_deref().unwrap_or(DEFAULT_API_BASE);
    let service: ParamServiceBox = match &cli.service_url {
        Some(url) => Box::new(HttpParamService::new(&ServiceConfig::new(url)).into_diagnostic()?),
        None => {
            warn!("no service URL configured; payment params are echoed offline and unsigned");
            Box::new(EchoParamService::new(&cli.merchant_key))
        }
    };

    let request = CheckoutRequest {
        amount: cli.amount,
        product_info: cli.product_info,
        first_name: cli.first_name,
        email: cli.email,
        phone: cli.phone,
        success_url: format!("{}/payment/success", api_base.trim_end_matches('/')),
        failure_url: format!("{}/payment/failure", api_base.trim_end_matches('/')),
    };

    let flow = CheckoutFlow::new(
        bridge,
        service,
        cli.merchant_key,
        Environment::from_production_flag(cli.production),
    );
    let result = flow.run(&request).await;
    drop(flow);
    dispatcher.abort();

    let outcome = result.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());
    if cli.json {
        writer.write_json(&outcome).into_diagnostic()?;
    } else {
        writer.write_text(&outcome).into_diagnostic()?;
    }

    Ok(())
}
