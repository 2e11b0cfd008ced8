use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::services::ingestion::IngestionService;

use super::AppState;

pub async fn admin_sync(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(token) = state.config.admin.token.as_deref() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            "Sync disabled: ADMIN_TOKEN is not set",
        )
            .into_response();
    };
    if !bearer_matches(&headers, token) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    tokio::spawn(async move {
        log::info!("Admin triggered review sync started");
        let result = async {
            let mut service = IngestionService::new(state.config.clone())?;
            service.run().await
        }
        .await;
        match result {
            Ok(()) => log::info!("Admin triggered review sync completed"),
            Err(e) => log::error!("Review sync failed: {:?}", e),
        }
    });

    (StatusCode::ACCEPTED, "Sync triggered").into_response()
}

fn bearer_matches(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .is_some_and(|presented| presented == token)
}

#[cfg(test)]
mod tests {
    use super::bearer_matches;
    use axum::http::HeaderMap;

    #[test]
    fn bearer_check_requires_exact_token() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Bearer hunter2".parse().unwrap());
        assert!(bearer_matches(&headers, "hunter2"));
        assert!(!bearer_matches(&headers, "secret"));
        assert!(!bearer_matches(&headers, ""));
        assert!(!bearer_matches(&HeaderMap::new(), "hunter2"));
    }
}
