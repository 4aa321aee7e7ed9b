use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use crate::error::ApiResult;
use crate::models::Notification;
use crate::models::NotificationQuery;
use crate::models::NotificationType;
use crate::models::PageResult;

const UNREAD_COUNT: &str = "/notifications/unread-count";

/// `/notifications`: the in-app inbox.
pub struct NotificationsApi<'a> {
    client: &'a CvsClient,
}

impl<'a> NotificationsApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    /// Unread count, with interactive retries and user-facing errors.
    pub async fn unread_count(&self) -> ApiResult<u64> {
        Ok(self.client.call(RequestSpec::get(UNREAD_COUNT)).await?)
    }

    /// Unread count for background badge refreshes. Uses the polling policy
    /// and yields `None` instead of surfacing any failure.
    pub async fn poll_unread_count(&self) -> Option<u64> {
        self.client.poll(RequestSpec::get(UNREAD_COUNT)).await
    }

    pub async fn list(&self, query: &NotificationQuery) -> ApiResult<PageResult<Notification>> {
        let spec = RequestSpec::get("/notifications")
            .query("pageNum", query.page_num)
            .query("pageSize", query.page_size)
            .query_opt("type", query.kind.map(NotificationType::as_str))
            .query_opt("isRead", query.is_read);
        Ok(self.client.call(spec).await?)
    }

    pub async fn unread(&self) -> ApiResult<Vec<Notification>> {
        Ok(self.client.call(RequestSpec::get("/notifications/unread")).await?)
    }

    pub async fn mark_read(&self, id: i64) -> ApiResult<()> {
        let spec = RequestSpec::put(format!("/notifications/{id}/read"));
        Ok(self.client.call_unit(spec).await?)
    }

    pub async fn mark_all_read(&self) -> ApiResult<()> {
        Ok(self
            .client
            .call_unit(RequestSpec::put("/notifications/mark-all-read"))
            .await?)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let spec = RequestSpec::delete(format!("/notifications/{id}"));
        Ok(self.client.call_unit(spec).await?)
    }

    /// Deletes every notification already read.
    pub async fn clear_read(&self) -> ApiResult<()> {
        Ok(self
            .client
            .call_unit(RequestSpec::delete("/notifications/clear-read"))
            .await?)
    }
}
