use anyhow::Result;
use serde_json::json;
use serial_test::serial;

use crate::test_utils::*;

#[tokio::test]
#[serial]
async fn integration_signature_not_found() -> Result<()> {
    let server = spawn(BEARER_TOKEN).await?;
    server.upstream.insert("1", "alice", "gm, no proof today").await;

    let (status, body) =
        post(&server.server, json!({"id": "job-2", "data": {"tweetId": "1"}}))
            .await?;

    assert_eq!(500, status);
    assert_eq!("job-2", body["jobRunID"]);
    assert_eq!("errored", body["status"]);
    assert_eq!("no signature in tweet", body["error"]);
    assert_eq!(500, body["statusCode"]);
    assert!(body.get("result").is_none());

    // Pipeline failures are not retried
    assert_eq!(1, server.upstream.hits());

    Ok(())
}

#[tokio::test]
#[serial]
async fn integration_signature_too_short() -> Result<()> {
    let server = spawn(BEARER_TOKEN).await?;
    let text = format!("proof: 0x{}", "a".repeat(129));
    server.upstream.insert("2", "alice", &text).await;

    let (status, body) =
        post(&server.server, json!({"data": {"tweetId": "2"}})).await?;

    assert_eq!(500, status);
    assert_eq!("no signature in tweet", body["error"]);

    Ok(())
}

#[tokio::test]
#[serial]
async fn integration_signature_malformed() -> Result<()> {
    let server = spawn(BEARER_TOKEN).await?;
    let text = format!("0x{}05", "11".repeat(64));
    server.upstream.insert("3", "alice", &text).await;

    let (status, body) =
        post(&server.server, json!({"data": {"tweetId": "3"}})).await?;

    assert_eq!(500, status);
    assert_eq!(
        "malformed signature: invalid recovery id 5",
        body["error"]
    );

    Ok(())
}

#[tokio::test]
#[serial]
async fn integration_invalid_input() -> Result<()> {
    let server = spawn(BEARER_TOKEN).await?;

    let (status, body) =
        post(&server.server, json!({"id": "job-3", "data": {}})).await?;
    assert_eq!(500, status);
    assert_eq!("job-3", body["jobRunID"]);
    assert_eq!("required parameter not supplied: tweetId", body["error"]);

    let (status, body) = post(
        &server.server,
        json!({"id": "job-4", "data": {"tweetId": "../users/me"}}),
    )
    .await?;
    assert_eq!(500, status);
    assert_eq!("invalid tweet id '../users/me'", body["error"]);

    // Nothing reached the upstream
    assert_eq!(0, server.upstream.hits());

    Ok(())
}
