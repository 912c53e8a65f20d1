#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use itt_census_api::config::AppConfig;
use itt_census_api::{app, AppState};

/// In-process API server on a free port, backed by a throwaway database.
/// Each test gets its own instance so rows never leak between tests.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub state: AppState,
    pub client: reqwest::Client,
    handle: JoinHandle<()>,
    _dir: tempfile::TempDir,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let dir = tempfile::tempdir().context("failed to create temp dir")?;

        let mut config = AppConfig::development();
        config.database.path = dir.path().join("census.sqlite");
        config.database.seed_path = seed_file();
        config.database.seed_on_startup = true;
        config.api.enable_request_logging = false;

        let state = AppState::bootstrap(config).await?;

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;

        let router = app(state.clone());
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            port,
            base_url,
            state,
            client: reqwest::Client::new(),
            handle,
            _dir: dir,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let res = self.client.post(self.url(path)).json(body).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn patch_json(
        &self,
        path: &str,
        body: &Value,
        token: Option<&str>,
    ) -> Result<(StatusCode, Value)> {
        let mut req = self.client.patch(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.header("Authorization", token);
        }
        let res = req.send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn delete_json(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.delete(self.url(path)).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    /// Register a fresh account and log it in, returning `(user_id, token)`
    pub async fn register_and_login(&self) -> Result<(i64, String)> {
        let email = format!("{}@example.com", uuid::Uuid::new_v4());
        let user_name = format!("user-{}", uuid::Uuid::new_v4());
        let password = "correct horse battery staple";

        let (status, body) = self
            .post_json(
                "/register",
                &json!({ "email": email, "user_name": user_name, "password": password }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {} {}", status, body);

        let (status, body) = self
            .post_json("/login", &json!({ "email": email, "password": password }))
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "login failed: {} {}", status, body);

        let user_id = body["user_id"].as_i64().context("login response missing user_id")?;
        let token = body["token"].as_str().context("login response missing token")?;
        Ok((user_id, token.to_string()))
    }

    /// Number of rows currently listed under `collection`
    pub async fn count(&self, collection: &str) -> Result<usize> {
        let (status, body) = self.get_json(&format!("/{}", collection)).await?;
        anyhow::ensure!(status == StatusCode::OK, "listing {} failed: {}", collection, status);
        Ok(body.as_array().map(Vec::len).unwrap_or_default())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn seed_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join("df_prepared.csv")
}
