use chrono::NaiveTime;
use serde::Deserialize;
use shared::ShiftTypeKey;
use utoipa::ToSchema;

/// Request to create a new shift template.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShiftTemplateRequest {
    pub shift_type: ShiftTypeKey,
    pub default_start_time: NaiveTime,
    pub default_end_time: NaiveTime,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to update a shift template's descriptive fields. `favourite_count`
/// and `usage_count` are not settable here; they are maintained by the
/// template's own increment operations.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateShiftTemplateRequest {
    pub default_start_time: Option<NaiveTime>,
    pub default_end_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}
