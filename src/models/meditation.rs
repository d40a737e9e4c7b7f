use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meditation {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub kind: MeditationKind,
    pub category: MeditationCategory,
    pub duration_minutes: i32,
    pub audio_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "meditation_kind", rename_all = "lowercase")]
pub enum MeditationKind {
    Meditation,
    Breathing,
    Other,
}

impl Default for MeditationKind {
    fn default() -> Self {
        Self::Meditation
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "meditation_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MeditationCategory {
    Audio,
    Video,
}

impl Default for MeditationCategory {
    fn default() -> Self {
        Self::Audio
    }
}
