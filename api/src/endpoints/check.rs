use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use crate::error::ApiResult;
use crate::models::CheckRequest;
use crate::models::PendingSignStudent;
use crate::models::SignToken;

/// On-site attendance: organizers mint short-lived tokens, volunteers
/// redeem them.
pub struct CheckApi<'a> {
    client: &'a CvsClient,
}

impl<'a> CheckApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    pub async fn check_in_token(&self, activity_id: i64) -> ApiResult<SignToken> {
        let spec = RequestSpec::post(format!("/checkin/token/{activity_id}"));
        Ok(self.client.call(spec).await?)
    }

    pub async fn check_out_token(&self, activity_id: i64) -> ApiResult<SignToken> {
        let spec = RequestSpec::post(format!("/checkout/token/{activity_id}"));
        Ok(self.client.call(spec).await?)
    }

    pub async fn check_in(&self, token: &str) -> ApiResult<()> {
        self.redeem("/checkin", token).await
    }

    pub async fn check_out(&self, token: &str) -> ApiResult<()> {
        self.redeem("/checkout", token).await
    }

    async fn redeem(&self, path: &str, token: &str) -> ApiResult<()> {
        let body = CheckRequest {
            token: token.to_string(),
        };
        let spec = RequestSpec::post(path).json(&body)?;
        Ok(self.client.call_unit(spec).await?)
    }

    /// Approved volunteers who have not checked in yet.
    pub async fn pending_check_in(&self, activity_id: i64) -> ApiResult<Vec<PendingSignStudent>> {
        let spec = RequestSpec::get(format!("/checkin/{activity_id}/pending"));
        Ok(self.client.call(spec).await?)
    }

    pub async fn pending_check_out(&self, activity_id: i64) -> ApiResult<Vec<PendingSignStudent>> {
        let spec = RequestSpec::get(format!("/checkout/{activity_id}/pending"));
        Ok(self.client.call(spec).await?)
    }
}
