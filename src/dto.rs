//! # MindSpace request/response DTOs
//!
//! API contract types shared by the handlers.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body (camelCase keys)
//! - `*Response` → serialized to client JSON
//! - Field validation is expressed via `validator` derive macros; cross-field and
//!   domain checks live in `impl` blocks at the bottom of this module.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::models::meditation::{MeditationCategory, MeditationKind};
use crate::models::user::{Role, User};
use crate::services::aggregation::DateWindow;
use crate::services::calendar::{parse_entry_date, parse_query_date};
use crate::services::mood::Mood;

// ============================================================================
// Common
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: Uuid,
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/register
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom = "not_blank"
    )]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 254, message = "Email too long"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,

    pub admin_secret: Option<String>,
    pub therapist_secret: Option<String>,
}

/// POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub therapist_id: Option<Uuid>,
}

impl From<&User> for UserSummary {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role,
            therapist_id: u.therapist_id,
        }
    }
}

// ============================================================================
// Journal
// ============================================================================

/// POST /api/journal
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJournalEntryRequest {
    #[validate(length(max = 200, message = "Title must be under 200 characters"))]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = 20000, message = "Content is required"),
        custom = "not_blank"
    )]
    pub content: String,

    #[validate(length(max = 5000, message = "Gratitude note must be under 5000 characters"))]
    pub gratitude: Option<String>,

    /// One of the six mood labels. Default: "Okay"
    pub mood: Option<String>,

    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub date: String,
}

/// PUT /api/journal/{id}, partial update
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateJournalEntryRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = 20000, message = "Content cannot be empty"),
        custom = "not_blank"
    )]
    pub content: Option<String>,

    #[validate(length(max = 5000))]
    pub gratitude: Option<String>,

    pub mood: Option<String>,
    pub date: Option<String>,
}

// ============================================================================
// Insights
// ============================================================================

/// Query for the mood trend and distribution endpoints
#[derive(Debug, Default, Deserialize)]
pub struct MoodWindowQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

// ============================================================================
// Therapists
// ============================================================================

/// POST /api/therapist/select
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTherapistRequest {
    pub therapist_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TherapistSelectedResponse {
    pub message: String,
    pub therapist: crate::models::user::ContactCard,
}

// ============================================================================
// Circles
// ============================================================================

/// POST /api/circles
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCircleRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom = "not_blank"
    )]
    pub name: String,

    #[validate(
        length(min = 1, max = 2000, message = "Description is required"),
        custom = "not_blank"
    )]
    pub description: String,

    #[validate(length(max = 2000))]
    pub rules: Option<String>,
}

/// POST /api/circles/{id}/posts
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(
        length(min = 1, max = 5000, message = "Post must be 1-5000 characters"),
        custom = "not_blank"
    )]
    pub content: String,

    #[serde(default)]
    pub is_anonymous: bool,
}

// ============================================================================
// Goals
// ============================================================================

/// POST /api/goals
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    #[validate(
        length(min = 1, max = 500, message = "Description must be 1-500 characters"),
        custom = "not_blank"
    )]
    pub description: String,

    pub target_date: NaiveDate,

    #[serde(default)]
    pub completed: bool,
}

/// PUT /api/goals/{id}, partial update
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,

    pub target_date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

// ============================================================================
// Meditations
// ============================================================================

/// POST /api/meditations
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeditationRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Description is required"))]
    pub description: String,

    #[serde(rename = "type")]
    pub kind: Option<MeditationKind>,

    pub category: Option<MeditationCategory>,

    /// Default: 5
    #[validate(range(min = 1, max = 600, message = "Duration must be 1-600 minutes"))]
    pub duration_minutes: Option<i32>,

    #[validate(url(message = "audioUrl must be a valid URL"))]
    pub audio_url: String,
}

/// PUT /api/meditations/{id}, partial update
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeditationRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 2000))]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<MeditationKind>,

    pub category: Option<MeditationCategory>,

    #[validate(range(min = 1, max = 600, message = "Duration must be 1-600 minutes"))]
    pub duration_minutes: Option<i32>,

    #[validate(url(message = "audioUrl must be a valid URL"))]
    pub audio_url: Option<String>,
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Serialize)]
pub struct BanToggleResponse {
    pub message: String,
    pub is_banned: bool,
}

// ============================================================================
// Validation helpers
// ============================================================================

/// Whitespace-only text counts as empty.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Reject labels outside the mood scale.
pub fn parse_mood(label: &str) -> AppResult<Mood> {
    label.parse::<Mood>().map_err(|_| {
        AppError::Validation(format!(
            "Mood must be one of: {}",
            Mood::ALL.map(|m| m.as_str()).join(", ")
        ))
    })
}

impl CreateJournalEntryRequest {
    pub fn mood(&self) -> AppResult<Mood> {
        self.mood.as_deref().map(parse_mood).unwrap_or(Ok(Mood::default()))
    }

    pub fn entry_date(&self) -> AppResult<NaiveDate> {
        parse_entry_date(&self.date)
    }
}

impl UpdateJournalEntryRequest {
    pub fn mood(&self) -> AppResult<Option<Mood>> {
        self.mood.as_deref().map(parse_mood).transpose()
    }

    pub fn entry_date(&self) -> AppResult<Option<NaiveDate>> {
        self.date.as_deref().map(parse_entry_date).transpose()
    }
}

impl MoodWindowQuery {
    /// Parse both bounds and apply the default trailing window.
    pub fn window(&self, today: NaiveDate) -> AppResult<DateWindow> {
        let from = self
            .from
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| parse_query_date("from", s))
            .transpose()?;
        let to = self
            .to
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| parse_query_date("to", s))
            .transpose()?;
        Ok(DateWindow::resolve(from, to, today))
    }
}

impl RegisterRequest {
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    /// Role granted at signup. A matching therapist secret wins over the admin one.
    pub fn requested_role(&self, config: &crate::config::Config) -> Role {
        fn matches(given: &Option<String>, expected: &Option<String>) -> bool {
            matches!((given, expected), (Some(g), Some(e)) if g == e)
        }

        if matches(&self.therapist_secret, &config.therapist_signup_secret) {
            Role::Therapist
        } else if matches(&self.admin_secret, &config.admin_signup_secret) {
            Role::Admin
        } else {
            Role::User
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
