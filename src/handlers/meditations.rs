use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{CreateMeditationRequest, DeleteResponse, UpdateMeditationRequest};
use crate::error::{AppError, AppResult};
use crate::models::meditation::Meditation;
use crate::services::access::{self, Capability};
use crate::AppState;

const DEFAULT_DURATION_MINUTES: i32 = 5;

pub async fn list_meditations(State(state): State<AppState>) -> AppResult<Json<Vec<Meditation>>> {
    let items = sqlx::query_as::<_, Meditation>("SELECT * FROM meditations ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(items))
}

pub async fn get_meditation(
    State(state): State<AppState>,
    Path(meditation_id): Path<Uuid>,
) -> AppResult<Json<Meditation>> {
    let item = sqlx::query_as::<_, Meditation>("SELECT * FROM meditations WHERE id = $1")
        .bind(meditation_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("Meditation not found".into()))?;

    Ok(Json(item))
}

pub async fn create_meditation(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateMeditationRequest>,
) -> AppResult<(StatusCode, Json<Meditation>)> {
    access::require(&auth_user, Capability::ManageCatalog)?;
    body.validate()?;

    let item = sqlx::query_as::<_, Meditation>(
        r#"
        INSERT INTO meditations (id, title, description, kind, category, duration_minutes, audio_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.kind.unwrap_or_default())
    .bind(body.category.unwrap_or_default())
    .bind(body.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES))
    .bind(&body.audio_url)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(admin_id = %auth_user.id, meditation_id = %item.id, "Meditation created");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_meditation(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(meditation_id): Path<Uuid>,
    Json(body): Json<UpdateMeditationRequest>,
) -> AppResult<Json<Meditation>> {
    access::require(&auth_user, Capability::ManageCatalog)?;
    body.validate()?;

    let item = sqlx::query_as::<_, Meditation>(
        r#"
        UPDATE meditations SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            kind = COALESCE($4, kind),
            category = COALESCE($5, category),
            duration_minutes = COALESCE($6, duration_minutes),
            audio_url = COALESCE($7, audio_url),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(meditation_id)
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.kind)
    .bind(body.category)
    .bind(body.duration_minutes)
    .bind(&body.audio_url)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Meditation not found".into()))?;

    Ok(Json(item))
}

pub async fn delete_meditation(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(meditation_id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    access::require(&auth_user, Capability::ManageCatalog)?;

    let result = sqlx::query("DELETE FROM meditations WHERE id = $1")
        .bind(meditation_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Meditation not found".into()));
    }

    Ok(Json(DeleteResponse {
        deleted: true,
        id: meditation_id,
    }))
}
