use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub name: Option<String>,
    pub purpose: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: CertificateStatus,
    pub reject_reason: Option<String>,
    pub approver_id: Option<i64>,
    pub approver_name: Option<String>,
    pub approved_at: Option<String>,
    /// Assigned on approval.
    pub certificate_number: Option<String>,
    pub created_at: Option<String>,
    pub statistics: Option<CertificateSummary>,
}

/// Service totals printed on the certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateSummary {
    pub completed_activity_count: u64,
    pub total_service_hours: f64,
}

/// Body of `POST /certificates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDraft {
    pub purpose: String,
    /// `yyyy-MM-dd`
    pub start_date: String,
    pub end_date: String,
}

/// Body of `POST /certificates/approve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDecision {
    pub certificate_id: i64,
    pub approved: bool,
    pub status: CertificateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
}

impl CertificateDecision {
    pub fn approve(certificate_id: i64) -> Self {
        Self {
            certificate_id,
            approved: true,
            status: CertificateStatus::Approved,
            reject_reason: None,
        }
    }

    pub fn reject(certificate_id: i64, reason: impl Into<String>) -> Self {
        Self {
            certificate_id,
            approved: false,
            status: CertificateStatus::Rejected,
            reject_reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn rejection_carries_reason_and_status() {
        assert_eq!(
            serde_json::to_value(CertificateDecision::reject(5, "hours do not match")).unwrap(),
            json!({
                "certificateId": 5,
                "approved": false,
                "status": "REJECTED",
                "rejectReason": "hours do not match"
            })
        );
    }

    #[test]
    fn decodes_statistics_block() {
        let certificate: Certificate = serde_json::from_value(json!({
            "id": 1,
            "userId": 2,
            "status": "APPROVED",
            "certificateNumber": "CVS-2025-0001",
            "statistics": {"completedActivityCount": 6, "totalServiceHours": 18.5}
        }))
        .unwrap();

        let summary = certificate.statistics.unwrap_or_default();
        assert_eq!(summary.completed_activity_count, 6);
        assert_eq!(summary.total_service_hours, 18.5);
    }
}
