use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use crate::error::ApiResult;
use crate::models::PageRequest;
use crate::models::PageResult;
use crate::models::ReviewRequest;
use crate::models::ReviewSearch;
use crate::models::SignupReview;

pub struct ReviewsApi<'a> {
    client: &'a CvsClient,
}

impl<'a> ReviewsApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    pub async fn search(&self, request: &PageRequest<ReviewSearch>) -> ApiResult<PageResult<SignupReview>> {
        let spec = RequestSpec::post("/review/search").json(request)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn review(&self, signup_id: i64, review: &ReviewRequest) -> ApiResult<()> {
        let spec = RequestSpec::patch(format!("/review/{signup_id}")).json(review)?;
        Ok(self.client.call_unit(spec).await?)
    }
}
