//! AWS Lambda handler for purchase budget calculations
//!
//! Accepts a borrower profile (plus an optional partner configuration) as
//! JSON through API Gateway and returns the calculator results together with
//! the amortization schedule.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use purchase_budget::{
    validate_inputs, AmortizationRow, BorrowerProfile, Calculator, CalculatorResults,
    PartnerConfig, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Request body: borrower fields at the top level
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    #[serde(flatten)]
    pub borrower: BorrowerProfile,

    /// Partner overrides; built-in defaults when absent
    #[serde(default)]
    pub partner: Option<PartnerConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResponse {
    /// `null` when no price is feasible
    pub results: Option<CalculatorResults>,
    pub amortization: Vec<AmortizationRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<ValidationError>,
}

fn respond(status: i64, body: String) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code: status,
        body: Some(Body::Text(body)),
        ..Default::default()
    }
}

fn error_response(
    status: i64,
    message: &str,
    details: Vec<ValidationError>,
) -> ApiGatewayProxyResponse {
    let body = ErrorBody {
        error: message,
        details,
    };
    let text = serde_json::to_string(&body)
        .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, message));
    respond(status, text)
}

/// Pure request handling, separated from the runtime for testing
fn handle_body(body: &str) -> ApiGatewayProxyResponse {
    let request: BudgetRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e), Vec::new()),
    };

    let config = request.partner.unwrap_or_default();
    if let Err(e) = config.validate() {
        return error_response(422, &e.to_string(), Vec::new());
    }

    let calculator = Calculator::new(config);
    let inputs = calculator.inputs_for(&request.borrower);
    let errors = validate_inputs(&inputs);
    if !errors.is_empty() {
        return error_response(422, "Invalid input", errors);
    }

    let response = match calculator.calculate_with_schedule(&inputs) {
        Some((results, schedule)) => BudgetResponse {
            results: Some(results),
            amortization: schedule,
            message: None,
        },
        None => BudgetResponse {
            results: None,
            amortization: Vec::new(),
            message: Some("No feasible budget for these inputs".to_string()),
        },
    };

    match serde_json::to_string(&response) {
        Ok(text) => respond(200, text),
        Err(e) => error_response(500, &e.to_string(), Vec::new()),
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ApiGatewayProxyRequest>) -> Result<ApiGatewayProxyResponse, Error> {
    let request = event.payload;

    if request.http_method.as_str() == "OPTIONS" {
        return Ok(respond(200, String::new()));
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let response = handle_body(&body);
    log::info!("Handled budget request with status {}", response.status_code);
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_text(response: &ApiGatewayProxyResponse) -> &str {
        match &response.body {
            Some(Body::Text(text)) => text,
            _ => panic!("expected text body"),
        }
    }

    #[test]
    fn test_malformed_json_is_400() {
        let response = handle_body("{not json");
        assert_eq!(response.status_code, 400);
    }

    #[test]
    fn test_invalid_input_is_422() {
        let response = handle_body(r#"{"equity": -5, "netIncome": 20000, "age": 35}"#);
        assert_eq!(response.status_code, 422);
        assert!(body_text(&response).contains("equity"));
    }

    #[test]
    fn test_feasible_request() {
        let response = handle_body(
            r#"{"equity": 1200000, "netIncome": 25000, "age": 40,
                "isFirstProperty": true, "isIsraeliTaxResident": true}"#,
        );
        assert_eq!(response.status_code, 200);

        let json: serde_json::Value = serde_json::from_str(body_text(&response)).unwrap();
        assert!(json["results"]["maxPropertyValue"].as_f64().unwrap() > 0.0);
        assert_eq!(json["results"]["taxProfile"], "SINGLE_HOME");
        assert_eq!(json["amortization"].as_array().unwrap().len(), 360);
    }

    #[test]
    fn test_age_exhausted_returns_null_results() {
        let response = handle_body(r#"{"equity": 1000000, "netIncome": 20000, "age": 80}"#);
        assert_eq!(response.status_code, 200);

        let json: serde_json::Value = serde_json::from_str(body_text(&response)).unwrap();
        assert!(json["results"].is_null());
    }

    #[test]
    fn test_partner_override_applied() {
        let response = handle_body(
            r#"{"equity": 1000000, "netIncome": 30000, "age": 60,
                "partner": {"maxLoanTermYears": 10}}"#,
        );
        let json: serde_json::Value = serde_json::from_str(body_text(&response)).unwrap();
        assert_eq!(json["results"]["loanTermYears"], 10);
    }
}
