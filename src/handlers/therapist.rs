use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::dto::{MessageResponse, MoodWindowQuery, SelectTherapistRequest, TherapistSelectedResponse};
use crate::error::{AppError, AppResult};
use crate::handlers::insights::{mood_distribution_for, mood_trend_for};
use crate::models::user::{ContactCard, PatientSummary, Role};
use crate::services::access::{self, Capability, PatientLink};
use crate::services::aggregation::{DistributionBucket, TrendPoint};
use crate::AppState;

pub async fn list_therapists(State(state): State<AppState>) -> AppResult<Json<Vec<ContactCard>>> {
    let therapists = sqlx::query_as::<_, ContactCard>(
        "SELECT id, name, email FROM users WHERE role = $1 ORDER BY name ASC",
    )
    .bind(Role::Therapist)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(therapists))
}

pub async fn select_therapist(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<SelectTherapistRequest>,
) -> AppResult<Json<TherapistSelectedResponse>> {
    let therapist = sqlx::query_as::<_, ContactCard>(
        "SELECT id, name, email FROM users WHERE id = $1 AND role = $2",
    )
    .bind(body.therapist_id)
    .bind(Role::Therapist)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::Validation("Invalid therapist".into()))?;

    let result = sqlx::query("UPDATE users SET therapist_id = $2, updated_at = NOW() WHERE id = $1")
        .bind(auth_user.id)
        .bind(therapist.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    tracing::info!(user_id = %auth_user.id, therapist_id = %therapist.id, "Therapist selected");
    Ok(Json(TherapistSelectedResponse {
        message: "Therapist selected successfully".into(),
        therapist,
    }))
}

pub async fn disconnect_therapist(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<MessageResponse>> {
    let result = sqlx::query("UPDATE users SET therapist_id = NULL, updated_at = NOW() WHERE id = $1")
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    tracing::info!(user_id = %auth_user.id, "Therapist disconnected");
    Ok(Json(MessageResponse::new("Disconnected successfully")))
}

pub async fn my_therapist(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Option<ContactCard>>> {
    let therapist = sqlx::query_as::<_, ContactCard>(
        r#"
        SELECT t.id, t.name, t.email
        FROM users u
        JOIN users t ON t.id = u.therapist_id
        WHERE u.id = $1
        "#,
    )
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?;

    Ok(Json(therapist))
}

pub async fn list_patients(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<PatientSummary>>> {
    access::require(&auth_user, Capability::ViewPatients)?;

    let patients = sqlx::query_as::<_, PatientSummary>(
        r#"
        SELECT id, name, email, created_at FROM users
        WHERE therapist_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(patients))
}

pub async fn patient_mood_trend(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(patient_id): Path<Uuid>,
    Query(query): Query<MoodWindowQuery>,
) -> AppResult<Json<Vec<TrendPoint>>> {
    let owner_id = authorize_patient(&state, &auth_user, patient_id).await?;
    let trend = mood_trend_for(&state.db, owner_id, &query).await?;
    Ok(Json(trend))
}

pub async fn patient_mood_distribution(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(patient_id): Path<Uuid>,
    Query(query): Query<MoodWindowQuery>,
) -> AppResult<Json<Vec<DistributionBucket>>> {
    let owner_id = authorize_patient(&state, &auth_user, patient_id).await?;
    let distribution = mood_distribution_for(&state.db, owner_id, &query).await?;
    Ok(Json(distribution))
}

async fn authorize_patient(state: &AppState, auth_user: &AuthUser, patient_id: Uuid) -> AppResult<Uuid> {
    // Role is checked before touching storage.
    access::require(auth_user, Capability::ViewPatients)?;

    let patient = sqlx::query_as::<_, (Uuid, Option<Uuid>)>(
        "SELECT id, therapist_id FROM users WHERE id = $1",
    )
    .bind(patient_id)
    .fetch_optional(&state.db)
    .await?
    .map(|(id, therapist_id)| PatientLink { id, therapist_id });

    access::authorize_patient_view(auth_user, patient)
}
