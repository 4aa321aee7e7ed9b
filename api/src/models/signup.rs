use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignupStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signup {
    pub id: i64,
    pub activity_id: i64,
    pub activity_title: Option<String>,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub status: SignupStatus,
    pub reason: Option<String>,
    pub reject_reason: Option<String>,
    #[serde(default)]
    pub signed_in: bool,
    #[serde(default)]
    pub signed_out: bool,
    pub sign_in_time: Option<String>,
    pub sign_out_time: Option<String>,
    pub created_at: Option<String>,
}

impl Signup {
    /// Attendance is complete once the volunteer checked both in and out.
    pub fn attended(&self) -> bool {
        self.signed_in && self.signed_out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignAction {
    #[serde(alias = "CHECKIN")]
    CheckIn,
    #[serde(alias = "CHECKOUT")]
    CheckOut,
}

/// Short-lived token an organizer shows as a QR code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignToken {
    pub token: String,
    pub expires_at: Option<String>,
    pub action: Option<SignAction>,
}

/// Body of `POST /checkin` and `POST /checkout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSignStudent {
    pub name: Option<String>,
    pub username: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Pending,
    Reviewed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupReview {
    pub signup_id: i64,
    pub activity_id: i64,
    pub activity_title: Option<String>,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub student_no: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub student_rating: Option<u8>,
    pub student_evaluation: Option<String>,
    pub teacher_rating: Option<u8>,
    pub teacher_evaluation: Option<String>,
    pub review_status: Option<ReviewStatus>,
    pub teacher_rating_confirmed_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_status: Option<ReviewStatus>,
}

/// Teacher's rating of one attendance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub teacher_rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_evaluation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn sign_action_accepts_compact_names() {
        let token: SignToken = serde_json::from_value(json!({
            "token": "abc",
            "expiresAt": "2025-03-01 09:05:00",
            "action": "CHECKIN"
        }))
        .unwrap();
        assert_eq!(token.action, Some(SignAction::CheckIn));

        let action: SignAction = serde_json::from_value(json!("CHECK_OUT")).unwrap();
        assert_eq!(action, SignAction::CheckOut);
    }

    #[test]
    fn signup_attendance() {
        let signup: Signup = serde_json::from_value(json!({
            "id": 1,
            "activityId": 2,
            "userId": 3,
            "status": "APPROVED",
            "signedIn": true,
            "signedOut": true
        }))
        .unwrap();
        assert!(signup.attended());
        assert_eq!(signup.status, SignupStatus::Approved);
    }
}
