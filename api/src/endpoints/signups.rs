use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use super::paged;
use crate::error::ApiResult;
use crate::models::PageResult;
use crate::models::Paging;
use crate::models::Signup;

pub struct SignupsApi<'a> {
    client: &'a CvsClient,
}

impl<'a> SignupsApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    /// Signs the current user up. Some deployments answer without a body.
    pub async fn sign_up(&self, activity_id: i64) -> ApiResult<Option<Signup>> {
        let spec = RequestSpec::post(format!("/activities/{activity_id}/signup"));
        Ok(self.client.call(spec).await?)
    }

    pub async fn withdraw(&self, activity_id: i64) -> ApiResult<()> {
        let spec = RequestSpec::delete(format!("/activities/{activity_id}/signup"));
        Ok(self.client.call_unit(spec).await?)
    }

    /// Signups of one activity, for its organizer.
    pub async fn for_activity(&self, activity_id: i64, paging: Paging) -> ApiResult<PageResult<Signup>> {
        let spec = paged(RequestSpec::get(format!("/signups/activity/{activity_id}")), paging);
        Ok(self.client.call(spec).await?)
    }

    pub async fn mine(&self, paging: Paging) -> ApiResult<PageResult<Signup>> {
        Ok(self.client.call(paged(RequestSpec::get("/signups/my"), paging)).await?)
    }

    pub async fn approve(&self, signup_id: i64) -> ApiResult<()> {
        let spec = RequestSpec::put(format!("/signups/{signup_id}/approve"));
        Ok(self.client.call_unit(spec).await?)
    }

    pub async fn reject(&self, signup_id: i64) -> ApiResult<()> {
        let spec = RequestSpec::put(format!("/signups/{signup_id}/reject"));
        Ok(self.client.call_unit(spec).await?)
    }
}
