use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

/// Tag name with the number of videos carrying it.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: i64,
}
