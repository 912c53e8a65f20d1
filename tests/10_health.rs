mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_reports_database_ok() -> Result<()> {
    let server = common::TestServer::start().await?;

    let (status, body) = server.get_json("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert!(body["timestamp"].is_string(), "timestamp missing: {}", body);

    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let server = common::TestServer::start().await?;

    let (status, body) = server.get_json("/").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "ITT Census API");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["endpoints"]["teachers"].as_str().unwrap_or_default().contains("/Teachers"));

    Ok(())
}

#[tokio::test]
async fn unknown_routes_are_404() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server.client.get(server.url("/Unicorns")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
