//! End-to-end tests for the gateway, with a mocked orchestrator.

use httpmock::prelude::*;
use regex::Regex;
use serde_json::{json, Value};

use cep_weather::GatewayConfig;

mod common;

fn test_config(orchestrator_url: String) -> GatewayConfig {
    GatewayConfig {
        orchestrator_url,
        ..GatewayConfig::default()
    }
}

#[tokio::test]
async fn forwards_trimmed_code_with_trace_context() {
    common::init_test_tracing();
    let orchestrator = MockServer::start_async().await;

    // Exact body match proves the raw, padded input was not forwarded.
    let forward = orchestrator
        .mock_async(|when, then| {
            when.method(POST)
                .path("/weather")
                .header_exists("traceparent")
                .json_body(json!({"cep": "01001000"}));
            then.status(200).json_body(
                json!({"city": "São Paulo", "temp_C": 20.0, "temp_F": 68.0, "temp_K": 293.0}),
            );
        })
        .await;

    let addr = common::spawn_gateway(test_config(orchestrator.base_url())).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/cep-weather"))
        .json(&json!({"cep": "  01001000  "}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"city": "São Paulo", "temp_C": 20.0, "temp_F": 68.0, "temp_K": 293.0})
    );
    forward.assert_async().await;
}

#[tokio::test]
async fn propagates_inbound_trace_id_across_the_hop() {
    common::init_test_tracing();
    let orchestrator = MockServer::start_async().await;

    // The outbound hop must carry the caller's trace id; only the span
    // id is minted fresh.
    let trace_id = "4bf92f3577b34da6a3ce929d0e0e4736";
    let forward = orchestrator
        .mock_async(|when, then| {
            when.method(POST).path("/weather").header_matches(
                "traceparent",
                Regex::new(&format!("^00-{trace_id}-[0-9a-f]{{16}}-01$")).unwrap(),
            );
            then.status(200).json_body(
                json!({"city": "São Paulo", "temp_C": 20.0, "temp_F": 68.0, "temp_K": 293.0}),
            );
        })
        .await;

    let addr = common::spawn_gateway(test_config(orchestrator.base_url())).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/cep-weather"))
        .header("traceparent", format!("00-{trace_id}-00f067aa0ba902b7-01"))
        .json(&json!({"cep": "01001000"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    forward.assert_async().await;
}

#[tokio::test]
async fn relays_orchestrator_error_status_and_body() {
    common::init_test_tracing();
    let orchestrator = MockServer::start_async().await;

    orchestrator
        .mock_async(|when, then| {
            when.method(POST).path("/weather");
            then.status(500)
                .json_body(json!({"message": "internal server error during weather lookup"}));
        })
        .await;

    let addr = common::spawn_gateway(test_config(orchestrator.base_url())).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/cep-weather"))
        .json(&json!({"cep": "01001000"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"message": "internal server error during weather lookup"})
    );
}

#[tokio::test]
async fn relays_not_found_from_orchestrator() {
    common::init_test_tracing();
    let orchestrator = MockServer::start_async().await;

    orchestrator
        .mock_async(|when, then| {
            when.method(POST).path("/weather");
            then.status(404).json_body(json!({"message": "can not find zipcode"}));
        })
        .await;

    let addr = common::spawn_gateway(test_config(orchestrator.base_url())).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/cep-weather"))
        .json(&json!({"cep": "99999999"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"message": "can not find zipcode"}));
}

#[tokio::test]
async fn invalid_zipcode_is_rejected_locally() {
    common::init_test_tracing();
    let orchestrator = MockServer::start_async().await;

    let any_call = orchestrator
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200);
        })
        .await;

    let addr = common::spawn_gateway(test_config(orchestrator.base_url())).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/cep-weather"))
        .json(&json!({"cep": "1234"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 422);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"message": "invalid zipcode"}));
    assert_eq!(any_call.hits_async().await, 0);
}

#[tokio::test]
async fn malformed_body_is_400() {
    common::init_test_tracing();
    let addr = common::spawn_gateway(test_config(common::unreachable_url())).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/cep-weather"))
        .header("content-type", "application/json")
        .body("cep=01001000")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"message": "invalid request body"}));
}

#[tokio::test]
async fn unreachable_orchestrator_is_500() {
    common::init_test_tracing();
    let addr = common::spawn_gateway(test_config(common::unreachable_url())).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/cep-weather"))
        .json(&json!({"cep": "01001000"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"message": "could not connect to service B"}));
}
