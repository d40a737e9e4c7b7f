use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{CreateGoalRequest, DeleteResponse, UpdateGoalRequest};
use crate::error::{AppError, AppResult};
use crate::models::goal::Goal;
use crate::AppState;

pub async fn create_goal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateGoalRequest>,
) -> AppResult<(StatusCode, Json<Goal>)> {
    body.validate()?;

    let goal = sqlx::query_as::<_, Goal>(
        r#"
        INSERT INTO goals (id, user_id, description, target_date, completed, completed_at)
        VALUES ($1, $2, $3, $4, $5, CASE WHEN $5 THEN NOW() ELSE NULL END)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.description.trim())
    .bind(body.target_date)
    .bind(body.completed)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn list_goals(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Goal>>> {
    let goals = sqlx::query_as::<_, Goal>(
        "SELECT * FROM goals WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(goals))
}

pub async fn update_goal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(goal_id): Path<Uuid>,
    Json(body): Json<UpdateGoalRequest>,
) -> AppResult<Json<Goal>> {
    body.validate()?;

    // completed_at follows `completed` only when the client sends it
    let goal = sqlx::query_as::<_, Goal>(
        r#"
        UPDATE goals SET
            description = COALESCE($3, description),
            target_date = COALESCE($4, target_date),
            completed = COALESCE($5, completed),
            completed_at = CASE
                WHEN $5::boolean IS NULL THEN completed_at
                WHEN $5 THEN NOW()
                ELSE NULL
            END,
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(goal_id)
    .bind(auth_user.id)
    .bind(body.description.as_deref().map(str::trim))
    .bind(body.target_date)
    .bind(body.completed)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Goal not found".into()))?;

    Ok(Json(goal))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(goal_id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
        .bind(goal_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Goal not found".into()));
    }

    Ok(Json(DeleteResponse {
        deleted: true,
        id: goal_id,
    }))
}
