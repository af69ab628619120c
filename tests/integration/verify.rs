use anyhow::Result;
use serde_json::json;
use serial_test::serial;

use crate::test_utils::*;

#[tokio::test]
#[serial]
async fn integration_verify_ok() -> Result<()> {
    let server = spawn(BEARER_TOKEN).await?;
    let (signing_key, address) = new_signing_key()?;
    let signature = wallet_sign(&signing_key, "alice");

    server
        .upstream
        .insert("1460323737035677698", "Alice", &format!("gm {}", signature))
        .await;

    let (status, body) = post(
        &server.server,
        json!({"id": "job-1", "data": {"tweetId": "1460323737035677698"}}),
    )
    .await?;

    assert_eq!(200, status);
    assert_eq!("job-1", body["jobRunID"]);
    assert_eq!(200, body["statusCode"]);
    assert!(body.get("error").is_none());

    let result = &body["result"];
    assert_eq!("1460323737035677698", result["tweetId"]);
    assert_eq!("alice", result["handle"]);
    assert_eq!(signature.as_str(), result["signature"]);
    assert_eq!(address.as_str(), result["address"]);
    assert_eq!(true, result["valid"]);

    // Upstream body is returned with the result attached
    assert_eq!(
        "1460323737035677698",
        body["data"]["data"]["id"]
    );
    assert_eq!(result, &body["data"]["result"]);

    assert_eq!(1, server.upstream.hits());

    Ok(())
}

#[tokio::test]
#[serial]
async fn integration_verify_numeric_id() -> Result<()> {
    let server = spawn(BEARER_TOKEN).await?;
    let (signing_key, address) = new_signing_key()?;
    let signature = wallet_sign(&signing_key, "bob");

    server.upstream.insert("42", "BOB", &signature).await;

    let (status, body) =
        post(&server.server, json!({"id": 3, "data": {"tweetId": 42}}))
            .await?;

    assert_eq!(200, status);
    assert_eq!("3", body["jobRunID"]);
    assert_eq!("bob", body["result"]["handle"]);
    assert_eq!(address.as_str(), body["result"]["address"]);

    Ok(())
}

#[tokio::test]
#[serial]
async fn integration_verify_wrong_handle() -> Result<()> {
    let server = spawn(BEARER_TOKEN).await?;
    let (signing_key, address) = new_signing_key()?;

    // Signed for another account
    let signature = wallet_sign(&signing_key, "alice");
    server.upstream.insert("7", "mallory", &signature).await;

    let (status, body) =
        post(&server.server, json!({"data": {"tweetId": "7"}})).await?;

    assert_eq!(200, status);
    assert_eq!("1", body["jobRunID"]);
    assert_eq!("mallory", body["result"]["handle"]);
    assert_ne!(address.as_str(), body["result"]["address"]);

    Ok(())
}
