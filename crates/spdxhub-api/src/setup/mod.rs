//! Application setup and initialization
//!
//! All initialization logic lives here rather than in main.rs so the
//! integration tests can assemble the same application.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::jwt::JwtKeys;
use crate::auth::middleware::AuthState;
use crate::state::{AppState, DbState, MediaState};
use anyhow::Result;
use spdxhub_core::Config;
use spdxhub_db::UserRepository;
use spdxhub_tool::SpdxToolchain;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup media storage
    let media_storage = storage::setup_storage(&config).await?;

    // The toolchain handle is created eagerly; availability is probed
    // lazily, once, on the first request that needs it.
    let toolchain = Arc::new(SpdxToolchain::new(
        config.java_path.clone(),
        config.tool_jar.clone(),
    ));

    let auth = AuthState {
        keys: JwtKeys::new(&config.jwt_secret, config.jwt_expiry_hours),
        users: UserRepository::new(pool.clone()),
    };

    let state = Arc::new(AppState {
        db: DbState::new(pool),
        media: MediaState {
            storage: media_storage,
            max_file_size: config.max_file_size_bytes,
            allowed_extensions: config.allowed_extensions.clone(),
        },
        toolchain,
        auth,
        config: config.clone(),
    });

    // Setup routes
    let router = routes::build_router(&config, state.clone())?;

    Ok((state, router))
}
