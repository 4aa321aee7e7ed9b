use serde::Deserialize;
use serde::Serialize;

use super::common::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    ActivityStart,
    ActivityOngoing,
    ActivityEnd,
    RegistrationPending,
    RegistrationApproved,
    RegistrationRejected,
    CheckoutPending,
    CheckoutApproved,
    CheckoutRejected,
    ActivityCancel,
    System,
}

impl NotificationType {
    /// Wire name, as used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::ActivityStart => "ACTIVITY_START",
            NotificationType::ActivityOngoing => "ACTIVITY_ONGOING",
            NotificationType::ActivityEnd => "ACTIVITY_END",
            NotificationType::RegistrationPending => "REGISTRATION_PENDING",
            NotificationType::RegistrationApproved => "REGISTRATION_APPROVED",
            NotificationType::RegistrationRejected => "REGISTRATION_REJECTED",
            NotificationType::CheckoutPending => "CHECKOUT_PENDING",
            NotificationType::CheckoutApproved => "CHECKOUT_APPROVED",
            NotificationType::CheckoutRejected => "CHECKOUT_REJECTED",
            NotificationType::ActivityCancel => "ACTIVITY_CANCEL",
            NotificationType::System => "SYSTEM",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub content: Option<String>,
    pub link_url: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub created_time: Option<String>,
    pub read_time: Option<String>,
}

/// Filters of `GET /notifications`, sent as query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationQuery {
    pub page_num: u32,
    pub page_size: u32,
    pub kind: Option<NotificationType>,
    pub is_read: Option<bool>,
}

impl NotificationQuery {
    pub fn unread_only(mut self) -> Self {
        self.is_read = Some(false);
        self
    }

    pub fn of_kind(mut self, kind: NotificationType) -> Self {
        self.kind = Some(kind);
        self
    }
}

impl Default for NotificationQuery {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: DEFAULT_PAGE_SIZE,
            kind: None,
            is_read: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn wire_names_match_serde() {
        for kind in [
            NotificationType::ActivityStart,
            NotificationType::RegistrationRejected,
            NotificationType::CheckoutPending,
            NotificationType::System,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn decodes_notification() {
        let notification: Notification = serde_json::from_value(json!({
            "id": 11,
            "type": "ACTIVITY_CANCEL",
            "title": "Activity cancelled",
            "isRead": false,
            "createdTime": "2025-03-01 08:00:00"
        }))
        .unwrap();
        assert_eq!(notification.kind, NotificationType::ActivityCancel);
        assert!(!notification.is_read);
    }
}
