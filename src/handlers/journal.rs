use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{CreateJournalEntryRequest, DeleteResponse, UpdateJournalEntryRequest};
use crate::error::{AppError, AppResult};
use crate::models::journal_entry::JournalEntry;
use crate::AppState;

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateJournalEntryRequest>,
) -> AppResult<(StatusCode, Json<JournalEntry>)> {
    body.validate()?;
    let mood = body.mood()?;
    let entry_date = body.entry_date()?;

    let entry = sqlx::query_as::<_, JournalEntry>(
        r#"
        INSERT INTO journal_entries (id, user_id, title, content, gratitude, mood, entry_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(&body.title)
    .bind(&body.content)
    .bind(body.gratitude.as_deref().unwrap_or(""))
    .bind(mood.as_str())
    .bind(entry_date)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(user_id = %auth_user.id, entry_id = %entry.id, "Journal entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<JournalEntry>>> {
    let entries = sqlx::query_as::<_, JournalEntry>(
        r#"
        SELECT * FROM journal_entries
        WHERE user_id = $1
        ORDER BY entry_date DESC, created_at DESC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<JournalEntry>> {
    let entry = sqlx::query_as::<_, JournalEntry>(
        "SELECT * FROM journal_entries WHERE id = $1 AND user_id = $2",
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
    Json(body): Json<UpdateJournalEntryRequest>,
) -> AppResult<Json<JournalEntry>> {
    body.validate()?;
    let mood = body.mood()?;
    let entry_date = body.entry_date()?;

    let entry = sqlx::query_as::<_, JournalEntry>(
        r#"
        UPDATE journal_entries SET
            title = COALESCE($3, title),
            content = COALESCE($4, content),
            gratitude = COALESCE($5, gratitude),
            mood = COALESCE($6, mood),
            entry_date = COALESCE($7, entry_date),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .bind(&body.title)
    .bind(&body.content)
    .bind(&body.gratitude)
    .bind(mood.map(|m| m.as_str()))
    .bind(entry_date)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Entry not found".into()));
    }

    Ok(Json(DeleteResponse {
        deleted: true,
        id: entry_id,
    }))
}
