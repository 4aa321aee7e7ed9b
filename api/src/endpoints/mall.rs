use bytes::Bytes;
use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use crate::error::ApiResult;
use crate::models::Category;
use crate::models::CategoryDraft;
use crate::models::DateRange;
use crate::models::PageRequest;
use crate::models::PageResult;
use crate::models::Product;
use crate::models::ProductDraft;
use crate::models::ProductQuery;
use crate::models::ProductRanking;
use crate::models::ProductStatus;
use crate::models::ProductUpdate;
use crate::models::Redemption;
use crate::models::RedemptionQuery;
use crate::models::RedemptionRequest;
use crate::models::RedemptionStatistics;
use crate::models::VerifyRedemptionRequest;

/// Points mall: products, categories, redemptions and mall statistics.
pub struct MallApi<'a> {
    client: &'a CvsClient,
}

impl<'a> MallApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    // Products

    pub async fn products(&self, query: &ProductQuery) -> ApiResult<PageResult<Product>> {
        let spec = RequestSpec::post("/products/list").json(query)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn product(&self, id: i64) -> ApiResult<Product> {
        Ok(self.client.call(RequestSpec::get(format!("/products/{id}"))).await?)
    }

    /// Returns the id of the new product.
    pub async fn create_product(&self, draft: &ProductDraft) -> ApiResult<i64> {
        let spec = RequestSpec::post("/products").json(draft)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn update_product(&self, update: &ProductUpdate) -> ApiResult<()> {
        let spec = RequestSpec::put(format!("/products/{}", update.id)).json(update)?;
        Ok(self.client.call_unit(spec).await?)
    }

    pub async fn delete_product(&self, id: i64) -> ApiResult<()> {
        Ok(self
            .client
            .call_unit(RequestSpec::delete(format!("/products/{id}")))
            .await?)
    }

    pub async fn set_product_status(&self, id: i64, status: ProductStatus) -> ApiResult<()> {
        let spec = RequestSpec::put(format!("/products/{id}/status")).query("status", i32::from(status));
        Ok(self.client.call_unit(spec).await?)
    }

    // Redemptions

    pub async fn redeem(&self, product_id: i64) -> ApiResult<Redemption> {
        let spec = RequestSpec::post("/redemptions").json(&RedemptionRequest { product_id })?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn my_redemptions(&self, request: &PageRequest<RedemptionQuery>) -> ApiResult<PageResult<Redemption>> {
        let spec = RequestSpec::post("/redemptions/my").json(request)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn all_redemptions(&self, request: &PageRequest<RedemptionQuery>) -> ApiResult<PageResult<Redemption>> {
        let spec = RequestSpec::post("/redemptions/all").json(request)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn redemption(&self, id: i64) -> ApiResult<Redemption> {
        Ok(self.client.call(RequestSpec::get(format!("/redemptions/{id}"))).await?)
    }

    pub async fn redemption_by_voucher(&self, voucher_code: &str) -> ApiResult<Redemption> {
        let spec = RequestSpec::get(format!("/redemptions/voucher/{voucher_code}"));
        Ok(self.client.call(spec).await?)
    }

    /// Marks a voucher as handed out.
    pub async fn verify_redemption(&self, voucher_code: &str) -> ApiResult<()> {
        let body = VerifyRedemptionRequest {
            voucher_code: voucher_code.to_string(),
        };
        let spec = RequestSpec::post("/redemptions/verify").json(&body)?;
        Ok(self.client.call_unit(spec).await?)
    }

    pub async fn cancel_redemption(&self, id: i64) -> ApiResult<()> {
        let spec = RequestSpec::put(format!("/redemptions/{id}/cancel"));
        Ok(self.client.call_unit(spec).await?)
    }

    // Categories

    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        Ok(self.client.call(RequestSpec::get("/categories")).await?)
    }

    /// Returns the id of the new category.
    pub async fn create_category(&self, draft: &CategoryDraft) -> ApiResult<i64> {
        let spec = RequestSpec::post("/categories").json(draft)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn update_category(&self, id: i64, draft: &CategoryDraft) -> ApiResult<()> {
        let spec = RequestSpec::put(format!("/categories/{id}")).json(draft)?;
        Ok(self.client.call_unit(spec).await?)
    }

    pub async fn delete_category(&self, id: i64) -> ApiResult<()> {
        Ok(self
            .client
            .call_unit(RequestSpec::delete(format!("/categories/{id}")))
            .await?)
    }

    // Statistics

    pub async fn redemption_statistics(&self, range: &DateRange) -> ApiResult<RedemptionStatistics> {
        let spec = dated(RequestSpec::get("/statistics/redemptions"), range);
        Ok(self.client.call(spec).await?)
    }

    /// Most redeemed products; the backend returns ten when `limit` is `None`.
    pub async fn product_ranking(&self, limit: Option<u32>) -> ApiResult<Vec<ProductRanking>> {
        let spec = RequestSpec::get("/statistics/ranking").query_opt("limit", limit);
        Ok(self.client.call(spec).await?)
    }

    pub async fn low_stock_products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.client.call(RequestSpec::get("/statistics/low-stock")).await?)
    }

    /// Spreadsheet of the redemptions in `range`.
    pub async fn export_redemptions(&self, range: &DateRange) -> ApiResult<Bytes> {
        let spec = dated(RequestSpec::get("/statistics/export"), range);
        Ok(self.client.call_bytes(spec).await?)
    }
}

fn dated(request: RequestSpec, range: &DateRange) -> RequestSpec {
    request
        .query_opt("startDate", range.start_date.as_deref())
        .query_opt("endDate", range.end_date.as_deref())
}
