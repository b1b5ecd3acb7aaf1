//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only
//! what they need via Axum's `FromRef`.

use crate::auth::middleware::AuthState;
use spdxhub_core::Config;
use spdxhub_db::{
    CompareUploadRepository, ConvertUploadRepository, UserRepository, ValidateUploadRepository,
};
use spdxhub_storage::Storage;
use spdxhub_tool::SpdxToolchain;
use sqlx::PgPool;
use std::sync::Arc;

/// Database pool and all repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub users: UserRepository,
    pub validate_uploads: ValidateUploadRepository,
    pub convert_uploads: ConvertUploadRepository,
    pub compare_uploads: CompareUploadRepository,
}

impl DbState {
    pub fn new(pool: PgPool) -> Self {
        DbState {
            users: UserRepository::new(pool.clone()),
            validate_uploads: ValidateUploadRepository::new(pool.clone()),
            convert_uploads: ConvertUploadRepository::new(pool.clone()),
            compare_uploads: CompareUploadRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Media storage plus upload limits.
#[derive(Clone)]
pub struct MediaState {
    pub storage: Arc<dyn Storage>,
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
}

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub media: MediaState,
    pub toolchain: Arc<SpdxToolchain>,
    pub auth: AuthState,
    pub config: Config,
}

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for MediaState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.media.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for AuthState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.auth.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
