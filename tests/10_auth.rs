mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

/// Every authenticated route, with the method used to call it.
const PROTECTED_ROUTES: &[(&str, &str)] = &[
    ("POST", "/save"),
    ("GET", "/get-deals"),
    ("GET", "/get-deal/11111111-2222-4333-8444-555555555555"),
    ("POST", "/save-survey"),
    ("POST", "/create-checkout-session"),
];

fn request(
    client: &reqwest::Client,
    method: &str,
    url: String,
) -> reqwest::RequestBuilder {
    match method {
        "POST" => client.post(url).json(&json!({})),
        _ => client.get(url),
    }
}

#[tokio::test]
async fn missing_authorization_header_is_401_everywhere() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for (method, path) in PROTECTED_ROUTES {
        let res = request(&client, method, format!("{}{}", server.base_url, path))
            .send()
            .await?;

        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} without a token should be 401",
            method,
            path
        );

        let body = res.json::<serde_json::Value>().await?;
        assert!(
            body.get("error").and_then(|v| v.as_str()).is_some(),
            "{} {} should return a flat error body: {}",
            method,
            path,
            body
        );
    }

    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_401() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for (method, path) in PROTECTED_ROUTES {
        let res = request(&client, method, format!("{}{}", server.base_url, path))
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .send()
            .await?;

        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} with a non-Bearer scheme should be 401",
            method,
            path
        );
    }

    Ok(())
}

#[tokio::test]
async fn empty_bearer_token_is_401() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/save", server.base_url))
        .header("Authorization", "Bearer ")
        .json(&json!({ "business_name": "Should Never Land" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("error").is_some(), "expected error body: {}", body);

    Ok(())
}

#[tokio::test]
async fn forged_owner_field_does_not_bypass_auth() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // A body that names an owner is still rejected before any mapping or
    // persistence happens when the credential itself is missing.
    let res = client
        .post(format!("{}/save", server.base_url))
        .json(&json!({
            "user_id": "99999999-9999-4999-8999-999999999999",
            "business_name": "Forged Owner LLC"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
