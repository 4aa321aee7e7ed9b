use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use super::paged;
use crate::error::ApiResult;
use crate::models::PageResult;
use crate::models::Paging;
use crate::models::ServiceRecord;
use crate::models::ServiceRecordDraft;
use crate::models::ServiceStats;

/// `/service-records`: attested volunteer hours.
pub struct ServiceRecordsApi<'a> {
    client: &'a CvsClient,
}

impl<'a> ServiceRecordsApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, draft: &ServiceRecordDraft) -> ApiResult<ServiceRecord> {
        let spec = RequestSpec::post("/service-records").json(draft)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn update(&self, id: i64, draft: &ServiceRecordDraft) -> ApiResult<ServiceRecord> {
        let spec = RequestSpec::put(format!("/service-records/{id}")).json(draft)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let spec = RequestSpec::delete(format!("/service-records/{id}"));
        Ok(self.client.call_unit(spec).await?)
    }

    pub async fn for_user(&self, user_id: i64, paging: Paging) -> ApiResult<PageResult<ServiceRecord>> {
        let spec = paged(RequestSpec::get(format!("/service-records/user/{user_id}")), paging);
        Ok(self.client.call(spec).await?)
    }

    pub async fn mine(&self, paging: Paging) -> ApiResult<PageResult<ServiceRecord>> {
        let spec = paged(RequestSpec::get("/service-records/my"), paging);
        Ok(self.client.call(spec).await?)
    }

    pub async fn all(&self, paging: Paging) -> ApiResult<PageResult<ServiceRecord>> {
        let spec = paged(RequestSpec::get("/service-records"), paging);
        Ok(self.client.call(spec).await?)
    }

    pub async fn for_activity(&self, activity_id: i64, paging: Paging) -> ApiResult<PageResult<ServiceRecord>> {
        let spec = paged(RequestSpec::get(format!("/service-records/activity/{activity_id}")), paging);
        Ok(self.client.call(spec).await?)
    }

    pub async fn stats_for_user(&self, user_id: i64) -> ApiResult<ServiceStats> {
        let spec = RequestSpec::get(format!("/service-records/stats/user/{user_id}"));
        Ok(self.client.call(spec).await?)
    }

    pub async fn my_stats(&self) -> ApiResult<ServiceStats> {
        Ok(self.client.call(RequestSpec::get("/service-records/stats/my")).await?)
    }

    /// Derives a record from a completed, checked-out signup.
    pub async fn generate(&self, signup_id: i64) -> ApiResult<()> {
        let spec = RequestSpec::post("/service-records/generate").query("signupId", signup_id);
        Ok(self.client.call_unit(spec).await?)
    }
}
