use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::dto::MoodWindowQuery;
use crate::error::AppResult;
use crate::services::aggregation::{
    self, DateWindow, DistributionBucket, MoodSample, TrendPoint,
};
use crate::AppState;

pub async fn get_mood_trend(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MoodWindowQuery>,
) -> AppResult<Json<Vec<TrendPoint>>> {
    let trend = mood_trend_for(&state.db, auth_user.id, &query).await?;
    Ok(Json(trend))
}

pub async fn get_mood_distribution(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MoodWindowQuery>,
) -> AppResult<Json<Vec<DistributionBucket>>> {
    let distribution = mood_distribution_for(&state.db, auth_user.id, &query).await?;
    Ok(Json(distribution))
}

/// Trend over `owner_id`'s entries. The caller has already authorized access.
pub async fn mood_trend_for(
    db: &PgPool,
    owner_id: Uuid,
    query: &MoodWindowQuery,
) -> AppResult<Vec<TrendPoint>> {
    let window = query.window(Utc::now().date_naive())?;
    let samples = load_mood_samples(db, owner_id, &window).await?;
    tracing::debug!(owner_id = %owner_id, samples = samples.len(), "Computing mood trend");
    Ok(aggregation::mood_trend(&samples, &window))
}

pub async fn mood_distribution_for(
    db: &PgPool,
    owner_id: Uuid,
    query: &MoodWindowQuery,
) -> AppResult<Vec<DistributionBucket>> {
    let window = query.window(Utc::now().date_naive())?;
    let samples = load_mood_samples(db, owner_id, &window).await?;
    tracing::debug!(owner_id = %owner_id, samples = samples.len(), "Computing mood distribution");
    Ok(aggregation::mood_distribution(&samples, &window))
}

async fn load_mood_samples(
    db: &PgPool,
    owner_id: Uuid,
    window: &DateWindow,
) -> AppResult<Vec<MoodSample>> {
    let samples = sqlx::query_as::<_, MoodSample>(
        r#"
        SELECT entry_date, mood FROM journal_entries
        WHERE user_id = $1
          AND ($2::date IS NULL OR entry_date >= $2)
          AND ($3::date IS NULL OR entry_date <= $3)
        ORDER BY entry_date ASC, created_at ASC
        "#,
    )
    .bind(owner_id)
    .bind(window.from)
    .bind(window.to)
    .fetch_all(db)
    .await?;

    Ok(samples)
}
