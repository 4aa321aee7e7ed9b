use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminDashboard {
    pub total_users: u64,
    pub total_activities: u64,
    pub total_signups: u64,
    pub total_service_records: u64,
    pub system_uptime: Option<String>,
    pub online_users: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherDashboard {
    pub my_activities_count: u64,
    pub total_signups_count: u64,
    pub pending_approvals_count: u64,
    pub service_records_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentDashboard {
    pub my_signups_count: u64,
    pub total_service_hours: f64,
    pub total_points: i64,
    pub certificates_count: u64,
}
