use anyhow::Result;
use serde_json::{json, Value};
use serial_test::serial;

use tweet_oracle_server::transport::{lambda, proxy, ProxyEvent};

use crate::test_utils::*;

#[tokio::test]
#[serial]
async fn integration_transport_lambda() -> Result<()> {
    let server = spawn(BEARER_TOKEN).await?;
    let (signing_key, address) = new_signing_key()?;
    let signature = wallet_sign(&signing_key, "carol");
    server.upstream.insert("9", "Carol", &signature).await;

    let adapter = mock_adapter(server.upstream_url.clone(), BEARER_TOKEN)?;
    let event = json!({"id": "job-6", "data": {"tweetId": "9"}});
    let response = lambda(&adapter, event).await;

    assert_eq!(200, response.status_code);
    assert_eq!("job-6", response.job_run_id);
    let result = response.result.expect("verification result");
    assert_eq!("carol", result.handle);
    assert_eq!(address, result.address);
    assert!(result.valid);

    Ok(())
}

#[tokio::test]
#[serial]
async fn integration_transport_proxy() -> Result<()> {
    let server = spawn(BEARER_TOKEN).await?;
    let (signing_key, address) = new_signing_key()?;
    let signature = wallet_sign(&signing_key, "dave");
    server.upstream.insert("10", "dave", &signature).await;

    let adapter = mock_adapter(server.upstream_url.clone(), BEARER_TOKEN)?;

    let input = json!({"id": "job-7", "data": {"tweetId": "10"}});
    let event: ProxyEvent = serde_json::from_value(json!({
        "body": input.to_string(),
    }))?;
    let response = proxy(&adapter, event).await?;
    assert_eq!(200, response.status_code);
    assert!(!response.is_base64_encoded);

    let body: Value = serde_json::from_str(&response.body)?;
    assert_eq!("job-7", body["jobRunID"]);
    assert_eq!(address.as_str(), body["result"]["address"]);

    // Same failure shape as the other transports
    let event: ProxyEvent = serde_json::from_value(json!({
        "body": json!({"id": "job-8", "data": {"tweetId": "11"}}).to_string(),
    }))?;
    let response = proxy(&adapter, event).await?;
    assert_eq!(500, response.status_code);
    let body: Value = serde_json::from_str(&response.body)?;
    assert_eq!("job-8", body["jobRunID"]);
    assert_eq!("errored", body["status"]);

    Ok(())
}
