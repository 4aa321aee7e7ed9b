use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use super::paged;
use crate::error::ApiResult;
use crate::models::PageRequest;
use crate::models::PageResult;
use crate::models::Paging;
use crate::models::PointsRanking;
use crate::models::PointsRecord;
use crate::models::PointsSearch;
use crate::models::PointsStats;

pub struct PointsApi<'a> {
    client: &'a CvsClient,
}

impl<'a> PointsApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    pub async fn my_stats(&self) -> ApiResult<PointsStats> {
        Ok(self.client.call(RequestSpec::get("/points/stats/my")).await?)
    }

    pub async fn ranking(&self, paging: Paging) -> ApiResult<PageResult<PointsRanking>> {
        let spec = paged(RequestSpec::get("/points/ranking/page"), paging);
        Ok(self.client.call(spec).await?)
    }

    pub async fn records(&self, request: &PageRequest<PointsSearch>) -> ApiResult<PageResult<PointsRecord>> {
        let spec = RequestSpec::post("/points/records/all").json(request)?;
        Ok(self.client.call(spec).await?)
    }

    /// Manual adjustment; `points` may be negative.
    pub async fn award(&self, user_id: i64, points: i32) -> ApiResult<()> {
        let spec = RequestSpec::post("/points/award")
            .query("userId", user_id)
            .query("points", points);
        Ok(self.client.call_unit(spec).await?)
    }
}
