use paybridge::config::ServiceConfig;
use paybridge::domain::initiate::InitiateRequest;
use paybridge::domain::params::ParamBuilder;
use paybridge::domain::ports::ParamService;
use paybridge::error::ParamServiceError;
use paybridge::infrastructure::http_param_service::HttpParamService;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn initiate_request() -> InitiateRequest {
    InitiateRequest {
        amount: dec!(100),
        product_info: "Test Product".to_string(),
        first_name: "Aditya".to_string(),
        email: "aditya@example.com".to_string(),
        phone: "9999999999".to_string(),
        app_reference_id: "1700000000000".to_string(),
        surl: "http://localhost/success".to_string(),
        furl: "http://localhost/failure".to_string(),
    }
}

fn service(server: &MockServer) -> HttpParamService {
    HttpParamService::new(&ServiceConfig::new(format!("{}/api/v1", server.uri()))).unwrap()
}

#[tokio::test]
async fn test_initiate_returns_signed_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/payment/initiate"))
        .and(body_partial_json(json!({
            "productInfo": "Test Product",
            "firstname": "Aditya",
            "appReferenceId": "1700000000000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"params": {
                "amount": "100.00", "productinfo": "Test Product", "key": "key123",
                "phone": "9999999999", "txnid": "TXN1700000000000", "firstname": "Aditya",
                "email": "aditya@example.com", "surl": "http://localhost/success",
                "furl": "http://localhost/failure", "hash": "9f86d081884c7d65"
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fields = service(&server)
        .initiate(&initiate_request(), false)
        .await
        .unwrap();
    let params = ParamBuilder::build(&fields).unwrap();

    assert_eq!(params.transaction_id, "TXN1700000000000");
    assert_eq!(params.security_hash, "9f86d081884c7d65");
    assert_eq!(params.amount.value(), dec!(100.00));
}

#[tokio::test]
async fn test_unsuccessful_reply_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/payment/initiate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let err = service(&server)
        .initiate(&initiate_request(), false)
        .await
        .unwrap_err();
    assert!(matches!(err, ParamServiceError::Rejected));
    assert_eq!(err.to_string(), "failed to get payment params");
}

#[tokio::test]
async fn test_server_error_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/payment/initiate"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = service(&server)
        .initiate(&initiate_request(), false)
        .await
        .unwrap_err();
    match err {
        ParamServiceError::Status { status, body, .. } => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream down");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_non_json_reply_is_a_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/payment/initiate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = service(&server)
        .initiate(&initiate_request(), false)
        .await
        .unwrap_err();
    assert!(matches!(err, ParamServiceError::Deserialization { .. }));
}
