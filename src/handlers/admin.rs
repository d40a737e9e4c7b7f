use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::dto::BanToggleResponse;
use crate::error::{AppError, AppResult};
use crate::models::user::{User, UserProfile};
use crate::services::access::{self, Capability};
use crate::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<UserProfile>>> {
    access::require(&auth_user, Capability::ManageUsers)?;

    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(users.into_iter().map(UserProfile::from).collect()))
}

pub async fn toggle_ban(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<BanToggleResponse>> {
    access::require(&auth_user, Capability::ManageUsers)?;

    if user_id == auth_user.id {
        return Err(AppError::Validation("You cannot ban your own account".into()));
    }

    let is_banned = sqlx::query_scalar::<_, bool>(
        r#"
        UPDATE users SET is_banned = NOT is_banned, updated_at = NOW()
        WHERE id = $1
        RETURNING is_banned
        "#,
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("User not found".into()))?;

    tracing::warn!(admin_id = %auth_user.id, user_id = %user_id, is_banned, "User ban status toggled");

    let verb = if is_banned { "banned" } else { "unbanned" };
    Ok(Json(BanToggleResponse {
        message: format!("User {} successfully", verb),
        is_banned,
    }))
}
