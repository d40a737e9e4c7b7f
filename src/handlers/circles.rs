use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{CreateCircleRequest, CreatePostRequest, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::models::circle::{Circle, CircleWithStatus, PostResponse, PostRow, DEFAULT_RULES};
use crate::models::user::ContactCard;
use crate::services::access::{self, Capability};
use crate::services::circles::Membership;
use crate::AppState;

pub async fn list_circles(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<CircleWithStatus>>> {
    let circles = sqlx::query_as::<_, CircleWithStatus>(
        r#"
        SELECT c.id, c.name, c.description, c.rules,
            EXISTS (
                SELECT 1 FROM circle_members m WHERE m.circle_id = c.id AND m.user_id = $1
            ) AS is_member,
            (SELECT COUNT(*) FROM circle_members m WHERE m.circle_id = c.id) AS member_count
        FROM circles c
        ORDER BY c.name ASC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(circles))
}

pub async fn join_circle(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(circle_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    ensure_circle_exists(&state.db, circle_id).await?;
    load_membership(&state.db, circle_id, auth_user.id)
        .await?
        .check_join()?;

    sqlx::query(
        "INSERT INTO circle_members (circle_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(circle_id)
    .bind(auth_user.id)
    .execute(&state.db)
    .await?;

    tracing::info!(user_id = %auth_user.id, circle_id = %circle_id, "Joined circle");
    Ok(Json(MessageResponse::new("Joined successfully")))
}

pub async fn leave_circle(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(circle_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    ensure_circle_exists(&state.db, circle_id).await?;
    load_membership(&state.db, circle_id, auth_user.id)
        .await?
        .check_leave()?;

    sqlx::query("DELETE FROM circle_members WHERE circle_id = $1 AND user_id = $2")
        .bind(circle_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    tracing::info!(user_id = %auth_user.id, circle_id = %circle_id, "Left circle");
    Ok(Json(MessageResponse::new("Left successfully")))
}

pub async fn list_posts(
    State(state): State<AppState>,
    Path(circle_id): Path<Uuid>,
) -> AppResult<Json<Vec<PostResponse>>> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT p.id, p.circle_id, p.user_id, u.name AS author_name,
               p.content, p.is_anonymous, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.user_id
        WHERE p.circle_id = $1
        ORDER BY p.created_at DESC
        "#,
    )
    .bind(circle_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(PostResponse::from).collect()))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(circle_id): Path<Uuid>,
    Json(body): Json<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<PostResponse>)> {
    body.validate()?;
    ensure_circle_exists(&state.db, circle_id).await?;
    load_membership(&state.db, circle_id, auth_user.id)
        .await?
        .check_post()?;

    let row = sqlx::query_as::<_, PostRow>(
        r#"
        WITH inserted AS (
            INSERT INTO posts (id, circle_id, user_id, content, is_anonymous)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
        )
        SELECT i.id, i.circle_id, i.user_id, u.name AS author_name,
               i.content, i.is_anonymous, i.created_at
        FROM inserted i
        JOIN users u ON u.id = i.user_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(circle_id)
    .bind(auth_user.id)
    .bind(body.content.trim())
    .bind(body.is_anonymous)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

// ── Moderation ───────────────────────────────────────────────────────────────

pub async fn create_circle(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateCircleRequest>,
) -> AppResult<(StatusCode, Json<Circle>)> {
    access::require(&auth_user, Capability::ModerateCircles)?;
    body.validate()?;

    let name = body.name.trim();
    let circle = sqlx::query_as::<_, Circle>(
        r#"
        INSERT INTO circles (id, name, description, rules)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(&body.description)
    .bind(body.rules.as_deref().unwrap_or(DEFAULT_RULES))
    .fetch_one(&state.db)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Circle already exists"))?;

    tracing::info!(admin_id = %auth_user.id, circle_id = %circle.id, "Circle created");
    Ok((StatusCode::CREATED, Json(circle)))
}

pub async fn delete_circle(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(circle_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    access::require(&auth_user, Capability::ModerateCircles)?;

    let result = sqlx::query("DELETE FROM circles WHERE id = $1")
        .bind(circle_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Circle not found".into()));
    }

    tracing::info!(admin_id = %auth_user.id, circle_id = %circle_id, "Circle deleted");
    Ok(Json(MessageResponse::new("Circle deleted")))
}

pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(circle_id): Path<Uuid>,
) -> AppResult<Json<Vec<ContactCard>>> {
    access::require(&auth_user, Capability::ModerateCircles)?;
    ensure_circle_exists(&state.db, circle_id).await?;

    let members = sqlx::query_as::<_, ContactCard>(
        r#"
        SELECT u.id, u.name, u.email
        FROM circle_members m
        JOIN users u ON u.id = m.user_id
        WHERE m.circle_id = $1
        ORDER BY m.joined_at ASC
        "#,
    )
    .bind(circle_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(members))
}

pub async fn ban_member(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((circle_id, user_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<MessageResponse>> {
    access::require(&auth_user, Capability::ModerateCircles)?;
    ensure_circle_exists(&state.db, circle_id).await?;

    let user_exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(&state.db)
        .await?;
    if !user_exists {
        return Err(AppError::NotFound("User not found".into()));
    }

    let writes = load_membership(&state.db, circle_id, user_id).await?.ban_writes();
    if writes.is_empty() {
        return Ok(Json(MessageResponse::new("User banned from circle")));
    }

    let mut tx = state.db.begin().await?;
    if writes.remove_membership {
        sqlx::query("DELETE FROM circle_members WHERE circle_id = $1 AND user_id = $2")
            .bind(circle_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }
    if writes.record_ban {
        sqlx::query(
            "INSERT INTO circle_bans (circle_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(circle_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::warn!(
        admin_id = %auth_user.id,
        circle_id = %circle_id,
        user_id = %user_id,
        "User banned from circle"
    );
    Ok(Json(MessageResponse::new("User banned from circle")))
}

async fn ensure_circle_exists(db: &PgPool, circle_id: Uuid) -> AppResult<()> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM circles WHERE id = $1)")
        .bind(circle_id)
        .fetch_one(db)
        .await?;

    if !exists {
        return Err(AppError::NotFound("Circle not found".into()));
    }
    Ok(())
}

async fn load_membership(db: &PgPool, circle_id: Uuid, user_id: Uuid) -> AppResult<Membership> {
    let (is_member, is_banned) = sqlx::query_as::<_, (bool, bool)>(
        r#"
        SELECT
            EXISTS (SELECT 1 FROM circle_members WHERE circle_id = $1 AND user_id = $2),
            EXISTS (SELECT 1 FROM circle_bans WHERE circle_id = $1 AND user_id = $2)
        "#,
    )
    .bind(circle_id)
    .bind(user_id)
    .fetch_one(db)
    .await?;

    Ok(Membership {
        is_member,
        is_banned,
    })
}
