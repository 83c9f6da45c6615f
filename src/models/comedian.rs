use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Comedian {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ComedianVideoCount {
    pub id: Uuid,
    pub name: String,
    pub video_count: i64,
}

/// Catalog-wide totals, counting published videos only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_video_count: i64,
    pub total_comedian_count: i64,
    pub total_tag_count: i64,
    pub video_count_by_comedian: Vec<ComedianVideoCount>,
}
