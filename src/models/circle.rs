use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_RULES: &str = "Be respectful and supportive.";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Circle {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub rules: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CircleWithStatus {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub rules: String,
    pub is_member: bool,
    pub member_count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub circle_id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub circle_id: Uuid,
    pub content: String,
    pub is_anonymous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<PostAuthor>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PostAuthor {
    pub id: Uuid,
    pub name: String,
}

impl From<PostRow> for PostResponse {
    fn from(row: PostRow) -> Self {
        let author = (!row.is_anonymous).then(|| PostAuthor {
            id: row.user_id,
            name: row.author_name,
        });
        Self {
            id: row.id,
            circle_id: row.circle_id,
            content: row.content,
            is_anonymous: row.is_anonymous,
            author,
            created_at: row.created_at,
        }
    }
}
