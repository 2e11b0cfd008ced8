use serde::Deserialize;

use crate::config::settings::AppConfig;
use crate::database::DbPool;

pub mod admin;
pub mod dashboard;
pub mod reviews;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct ReviewParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
    pub listing: Option<String>,
    pub status: Option<String>,
    pub band: Option<String>,
}
