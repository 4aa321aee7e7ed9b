use serde::Deserialize;
use serde::Serialize;

/// Lifecycle of a volunteer activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    Draft,
    PendingApproval,
    Published,
    Ongoing,
    Completed,
    Cancelled,
    Rejected,
}

impl ActivityStatus {
    /// Whether students may still sign up, ignoring capacity and deadline.
    pub fn accepts_signups(self) -> bool {
        matches!(self, ActivityStatus::Published)
    }

    pub fn is_final(self) -> bool {
        matches!(
            self,
            ActivityStatus::Completed | ActivityStatus::Cancelled | ActivityStatus::Rejected
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub registration_deadline: Option<String>,
    pub max_participants: Option<u32>,
    pub status: ActivityStatus,
    pub organizer_id: Option<i64>,
    pub organizer_name: Option<String>,
    pub requirements: Option<String>,
    pub contact_info: Option<String>,
    pub points: Option<i32>,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default)]
    pub checkin_count: u32,
    #[serde(default)]
    pub checkout_count: u32,
    #[serde(default)]
    pub can_signup: bool,
    pub approver_id: Option<i64>,
    pub approved_at: Option<String>,
    pub reject_reason: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Activity {
    pub fn is_full(&self) -> bool {
        self.max_participants
            .is_some_and(|max| self.current_participants >= max)
    }
}

/// Body of `POST /activities`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    /// `yyyy-MM-dd HH:mm:ss`
    pub start_time: String,
    pub end_time: String,
    pub registration_deadline: String,
    pub max_participants: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i32>,
}

/// Body of `PUT /activities`; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdate {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i32>,
}

/// Filters of the activity search; all optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStatistics {
    #[serde(default)]
    pub daily_statistics: Vec<DailyStatistics>,
    pub days: u32,
    #[serde(default)]
    pub total_activities: u64,
    #[serde(default)]
    pub total_participants: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatistics {
    /// `yyyy-MM-dd`
    pub date: String,
    #[serde(default)]
    pub activity_count: u64,
    #[serde(default)]
    pub participant_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_backend_activity() {
        let activity: Activity = serde_json::from_value(json!({
            "id": 9,
            "title": "Library shelving",
            "status": "PENDING_APPROVAL",
            "startTime": "2025-03-01 09:00:00",
            "maxParticipants": 20,
            "currentParticipants": 20,
            "canSignup": false,
            "organizerName": null
        }))
        .unwrap();

        assert_eq!(activity.status, ActivityStatus::PendingApproval);
        assert_eq!(activity.start_time.as_deref(), Some("2025-03-01 09:00:00"));
        assert!(activity.is_full());
        assert_eq!(activity.organizer_name, None);
        assert_eq!(activity.checkin_count, 0);
    }

    #[test]
    fn update_only_sends_changed_fields() {
        let update = ActivityUpdate {
            id: 3,
            title: Some("Beach cleanup".to_string()),
            status: Some(ActivityStatus::Cancelled),
            ..ActivityUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"id": 3, "title": "Beach cleanup", "status": "CANCELLED"})
        );
    }

    #[test]
    fn status_predicates() {
        assert!(ActivityStatus::Published.accepts_signups());
        assert!(!ActivityStatus::Ongoing.accepts_signups());
        assert!(ActivityStatus::Rejected.is_final());
        assert!(!ActivityStatus::Draft.is_final());
    }
}
