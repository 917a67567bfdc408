//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file names a client config and a list of cases: inputs, the
//! expected request, a simulated response and either the expected result or
//! the expected normalized error. Bodies are compared as parsed JSON so field
//! order does not matter.

use fivestar_core::{
    ApiError, ClientConfig, FiveStarClient, HttpMethod, HttpRequest, HttpResponse,
    RegisterCustomerOptions, RegisterCustomerResult, ResponseType, SubmitResponseOptions,
    SubmitResponseResult,
};
use serde_json::Value;

fn client(settings: &Value) -> FiveStarClient {
    let mut builder = ClientConfig::builder(settings["clientId"].as_str().unwrap())
        .api_url(settings["apiUrl"].as_str().unwrap());
    if let Some(v) = opt(settings, "platform") {
        builder = builder.platform(v);
    }
    if let Some(v) = opt(settings, "appVersion") {
        builder = builder.app_version(v);
    }
    if let Some(v) = opt(settings, "deviceModel") {
        builder = builder.device_model(v);
    }
    if let Some(v) = opt(settings, "osVersion") {
        builder = builder.os_version(v);
    }
    FiveStarClient::new(builder.build().unwrap())
}

fn opt(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match expected.get("body") {
        Some(body) => {
            let actual: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&actual, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn expected_error(case: &Value) -> ApiError {
    let err = &case["expected_error"];
    ApiError {
        message: err["message"].as_str().unwrap().to_string(),
        status_code: err["statusCode"].as_u64().map(|s| s as u16),
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[test]
fn response_types_test_vectors() {
    let raw = include_str!("../../test-vectors/response_types.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client(&vectors["client"]);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_get_response_types();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_response_types(&simulated(case));
        if case.get("expected_error").is_some() {
            assert_eq!(result.unwrap_err(), expected_error(case), "{name}: error");
        } else {
            let expected: Vec<ResponseType> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Register customer
// ---------------------------------------------------------------------------

#[test]
fn register_customer_test_vectors() {
    let raw = include_str!("../../test-vectors/register_customer.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client(&vectors["client"]);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let options = RegisterCustomerOptions {
            email: opt(input, "email"),
            name: opt(input, "name"),
            metadata: opt(input, "metadata"),
        };

        let req = c
            .build_register_customer(case["customer_id"].as_str().unwrap(), &options)
            .unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_register_customer(&simulated(case));
        if case.get("expected_error").is_some() {
            assert_eq!(result.unwrap_err(), expected_error(case), "{name}: error");
        } else {
            let expected: RegisterCustomerResult =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Submit response
// ---------------------------------------------------------------------------

#[test]
fn submit_response_test_vectors() {
    let raw = include_str!("../../test-vectors/submit_response.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client(&vectors["client"]);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let mut options = SubmitResponseOptions::new(
            input["customerId"].as_str().unwrap(),
            input["title"].as_str().unwrap(),
            input["description"].as_str().unwrap(),
            input["typeId"].as_str().unwrap(),
        );
        options.email = opt(input, "email");
        options.name = opt(input, "name");
        options.metadata = opt(input, "metadata");

        let req = c.build_submit_response(&options).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_submit_response(&simulated(case));
        if case.get("expected_error").is_some() {
            assert_eq!(result.unwrap_err(), expected_error(case), "{name}: error");
        } else {
            let expected: SubmitResponseResult =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}
