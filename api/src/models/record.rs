use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub activity_id: i64,
    pub activity_title: Option<String>,
    #[serde(default)]
    pub duration_minutes: u32,
    pub description: Option<String>,
    pub evaluation: Option<String>,
    pub rating: Option<u8>,
    #[serde(default)]
    pub points_earned: i32,
    pub created_at: Option<String>,
}

impl ServiceRecord {
    pub fn hours(&self) -> f64 {
        f64::from(self.duration_minutes) / 60.0
    }
}

/// Body of the create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordDraft {
    pub user_id: i64,
    pub activity_id: i64,
    pub duration_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_earned: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceStats {
    pub total_records: u64,
    pub total_service_hours: f64,
    pub total_points_earned: i64,
    pub average_service_hours: f64,
    pub max_service_hours: f64,
    pub min_service_hours: f64,
    pub total_activities: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsStats {
    pub user_id: i64,
    pub user_name: Option<String>,
    #[serde(default)]
    pub total_points: i64,
    pub current_ranking: Option<u32>,
    #[serde(default)]
    pub service_points: i64,
    #[serde(default)]
    pub adjustment_points: i64,
    #[serde(default)]
    pub total_service_hours: f64,
    #[serde(default)]
    pub service_records_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsRanking {
    pub user_id: i64,
    pub username: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub total_points: i64,
    pub ranking: u32,
    #[serde(default)]
    pub is_current_user: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsRecord {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub total_points: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_points: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_points: Option<i64>,
}
