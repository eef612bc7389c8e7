//! Dashboard stats route.

use axum::{Json, extract::State};

use crate::cache::{CacheKey, CacheValue};
use crate::db::stats;
use crate::error::Result;
use crate::models::StatsSummary;
use crate::state::AppState;

/// GET /stats
///
/// Aggregate counters for the admin dashboard. Served from the response
/// cache when warm; every order, product, and customer write invalidates
/// it.
pub async fn summary(State(state): State<AppState>) -> Result<Json<StatsSummary>> {
    if let Some(CacheValue::Stats(summary)) = state.cache().get(&CacheKey::Stats).await {
        return Ok(Json(summary));
    }

    let summary = stats::summary(state.pool()).await?;

    state
        .cache()
        .insert(CacheKey::Stats, CacheValue::Stats(summary))
        .await;

    Ok(Json(summary))
}
