use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use crate::error::ApiResult;
use crate::models::Activity;
use crate::models::ActivityDraft;
use crate::models::ActivitySearch;
use crate::models::ActivityStatistics;
use crate::models::ActivityUpdate;
use crate::models::PageRequest;
use crate::models::PageResult;

pub struct ActivitiesApi<'a> {
    client: &'a CvsClient,
}

impl<'a> ActivitiesApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, draft: &ActivityDraft) -> ApiResult<Activity> {
        let spec = RequestSpec::post("/activities").json(draft)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn get(&self, id: i64) -> ApiResult<Activity> {
        Ok(self.client.call(RequestSpec::get(format!("/activities/{id}"))).await?)
    }

    pub async fn update(&self, update: &ActivityUpdate) -> ApiResult<Activity> {
        let spec = RequestSpec::put("/activities").json(update)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn search(&self, request: &PageRequest<ActivitySearch>) -> ApiResult<PageResult<Activity>> {
        let spec = RequestSpec::post("/activities/search").json(request)?;
        Ok(self.client.call(spec).await?)
    }

    /// Activities organized by the signed-in user.
    pub async fn mine(&self, request: &PageRequest<ActivitySearch>) -> ApiResult<PageResult<Activity>> {
        let spec = RequestSpec::post("/activities/my/search").json(request)?;
        Ok(self.client.call(spec).await?)
    }

    /// Submits a draft for approval.
    pub async fn publish(&self, id: i64) -> ApiResult<()> {
        Ok(self
            .client
            .call_unit(RequestSpec::post(format!("/activities/{id}/publish")))
            .await?)
    }

    pub async fn approve(&self, id: i64) -> ApiResult<()> {
        self.decide(id, true, None).await
    }

    pub async fn reject(&self, id: i64, reason: &str) -> ApiResult<()> {
        self.decide(id, false, Some(reason)).await
    }

    async fn decide(&self, id: i64, approved: bool, reject_reason: Option<&str>) -> ApiResult<()> {
        let spec = RequestSpec::post(format!("/activities/{id}/approve"))
            .query("approved", approved)
            .query_opt("rejectReason", reject_reason);
        Ok(self.client.call_unit(spec).await?)
    }

    pub async fn cancel(&self, id: i64) -> ApiResult<()> {
        Ok(self
            .client
            .call_unit(RequestSpec::post(format!("/activities/{id}/cancel")))
            .await?)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        Ok(self
            .client
            .call_unit(RequestSpec::delete(format!("/activities/{id}")))
            .await?)
    }

    /// Daily counts over the last `days` days; the backend assumes 7 when
    /// `None`.
    pub async fn statistics(&self, days: Option<u32>) -> ApiResult<ActivityStatistics> {
        let spec = RequestSpec::get("/activities/statistics").query_opt("days", days);
        Ok(self.client.call(spec).await?)
    }
}
