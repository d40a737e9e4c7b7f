use axum::{extract::State, http::StatusCode, Extension, Json};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{
    jwt::create_access_token,
    middleware::AuthUser,
    password::{hash_password, verify_password},
};
use crate::dto::{normalize_email, AuthResponse, LoginRequest, RegisterRequest, UserSummary};
use crate::error::{AppError, AppResult};
use crate::models::user::{User, UserProfile};
use crate::AppState;

fn issue_session(user: &User, state: &AppState) -> AppResult<AuthResponse> {
    let token = create_access_token(user.id, &user.email, user.role, &state.config)?;
    Ok(AuthResponse {
        token,
        expires_in: state.config.jwt_ttl_secs,
        user: UserSummary::from(user),
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    body.validate()?;
    let email = body.normalized_email();

    let pwd_hash = hash_password(&body.password)?;
    let role = body.requested_role(&state.config);

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(body.name.trim())
    .bind(&email)
    .bind(&pwd_hash)
    .bind(role)
    .fetch_one(&state.db)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Email already in use"))?;

    tracing::info!(user_id = %user.id, role = ?user.role, "User registered");
    Ok((StatusCode::CREATED, Json(issue_session(&user, &state)?)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    body.validate()?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(normalize_email(&body.email))
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&body.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Login rejected: bad password");
        return Err(AppError::Unauthorized);
    }

    if user.is_banned {
        tracing::info!(user_id = %user.id, "Login rejected: account suspended");
        return Err(AppError::Forbidden("Your account has been suspended.".into()));
    }

    Ok(Json(issue_session(&user, &state)?))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(auth_user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}
