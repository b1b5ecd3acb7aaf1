//! Test application assembly.
//!
//! Integration tests need a Postgres database; they skip (returning `None`)
//! when `TEST_DATABASE_URL` is not set. The external toolchain is replaced
//! by a stub executable so no Java installation is required.

// Each test binary compiles this module; not every binary uses every helper.
#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{json, Value};
use spdxhub_api::auth::jwt::JwtKeys;
use spdxhub_api::auth::middleware::AuthState;
use spdxhub_api::setup::routes::build_router;
use spdxhub_api::state::{AppState, DbState, MediaState};
use spdxhub_core::Config;
use spdxhub_db::UserRepository;
use spdxhub_storage::{LocalStorage, Storage};
use spdxhub_tool::SpdxToolchain;
use sqlx::postgres::PgPoolOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// How the stubbed toolchain behaves.
pub enum ToolBehavior {
    /// Every invocation succeeds.
    Accept,
    /// Every invocation fails with this diagnostic on stderr.
    Reject(&'static str),
}

pub struct TestApp {
    pub server: TestServer,
    pub pool: sqlx::PgPool,
    pub _media_dir: TempDir,
    pub _tool_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// Write a shell script standing in for the java binary.
fn write_tool_stub(dir: &TempDir, behavior: &ToolBehavior) -> (PathBuf, PathBuf) {
    let java = dir.path().join("java");
    let body = match behavior {
        ToolBehavior::Accept => "#!/bin/sh\nexit 0\n".to_string(),
        ToolBehavior::Reject(diagnostic) => format!(
            "#!/bin/sh\ncase \"$1\" in -version) exit 0 ;; esac\necho '{}' >&2\nexit 1\n",
            diagnostic
        ),
    };
    std::fs::write(&java, body).unwrap();
    make_executable(&java);

    let jar = dir.path().join("tool.jar");
    std::fs::write(&jar, b"PK").unwrap();

    (java, jar)
}

pub async fn setup_test_app() -> Option<TestApp> {
    setup_test_app_with_tool(ToolBehavior::Accept).await
}

pub async fn setup_test_app_with_tool(behavior: ToolBehavior) -> Option<TestApp> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping integration test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let media_dir = TempDir::new().unwrap();
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(media_dir.path(), "/media".to_string())
            .await
            .unwrap(),
    );

    let tool_dir = TempDir::new().unwrap();
    let (java, jar) = write_tool_stub(&tool_dir, &behavior);

    let config = Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        database_url,
        db_max_connections: 5,
        db_timeout_seconds: 30,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiry_hours: 24,
        media_root: media_dir.path().to_str().unwrap().to_string(),
        media_base_url: "/media".to_string(),
        java_path: java.to_str().unwrap().to_string(),
        tool_jar: jar.to_str().unwrap().to_string(),
        max_file_size_bytes: 10 * 1024 * 1024,
        allowed_extensions: vec![
            "spdx".to_string(),
            "rdf".to_string(),
            "xml".to_string(),
            "xlsx".to_string(),
        ],
    };

    let auth = AuthState {
        keys: JwtKeys::new(&config.jwt_secret, config.jwt_expiry_hours),
        users: UserRepository::new(pool.clone()),
    };

    let state = Arc::new(AppState {
        db: DbState::new(pool.clone()),
        media: MediaState {
            storage,
            max_file_size: config.max_file_size_bytes,
            allowed_extensions: config.allowed_extensions.clone(),
        },
        toolchain: Arc::new(SpdxToolchain::new(
            config.java_path.clone(),
            config.tool_jar.clone(),
        )),
        auth,
        config: config.clone(),
    });

    let router = build_router(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    Some(TestApp {
        server,
        pool,
        _media_dir: media_dir,
        _tool_dir: tool_dir,
    })
}

pub struct TestUser {
    pub username: String,
    pub password: String,
    pub token: String,
}

/// Register a fresh account and log it in.
pub async fn register_and_login(server: &TestServer) -> TestUser {
    let username = format!("user-{}", uuid::Uuid::new_v4());
    let password = "testpass123".to_string();

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": username,
            "password": password,
            "confirm_password": password,
            "email": format!("{}@spdx.example", username),
            "organisation": "spdx",
        }))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let token = body["token"].as_str().expect("login token").to_string();

    TestUser {
        username,
        password,
        token,
    }
}

pub fn bearer(user: &TestUser) -> String {
    format!("Bearer {}", user.token)
}
