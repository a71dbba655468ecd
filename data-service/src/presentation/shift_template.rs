use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{ShiftTemplate, ShiftTypeKey};
use utoipa::ToSchema;
use uuid::Uuid;

/// ShiftTemplate serializer DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShiftTemplateSerializer {
    pub id: Uuid,
    pub shift_type: ShiftTypeKey,
    pub default_start_time: NaiveTime,
    pub default_end_time: NaiveTime,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub favourite_count: i64,
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShiftTemplate> for ShiftTemplateSerializer {
    fn from(template: ShiftTemplate) -> Self {
        Self {
            id: template.id,
            shift_type: template.shift_type,
            default_start_time: template.default_start_time,
            default_end_time: template.default_end_time,
            notes: template.notes,
            tags: template.tags,
            favourite_count: template.favourite_count,
            usage_count: template.usage_count,
            created_at: template.created_at,
            updated_at: template.updated_at,
        }
    }
}
