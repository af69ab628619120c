use anyhow::Result;
use serde_json::Value;
use serial_test::serial;

use crate::test_utils::*;

#[tokio::test]
#[serial]
async fn integration_api_info() -> Result<()> {
    let server = spawn(BEARER_TOKEN).await?;

    let url = server.server.join("api")?;
    let response = reqwest::get(url).await?;
    assert!(response.status().is_success());

    let info: Value = response.json().await?;
    assert_eq!("integration-test", info["name"]);
    assert_eq!("0.0.0", info["version"]);

    Ok(())
}
