use bytes::Bytes;
use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use super::paged;
use crate::error::ApiResult;
use crate::models::Certificate;
use crate::models::CertificateDecision;
use crate::models::CertificateDraft;
use crate::models::PageResult;
use crate::models::Paging;

/// `/certificates`: volunteer-service certificates and their approval.
pub struct CertificatesApi<'a> {
    client: &'a CvsClient,
}

impl<'a> CertificatesApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    pub async fn apply(&self, draft: &CertificateDraft) -> ApiResult<Certificate> {
        let spec = RequestSpec::post("/certificates").json(draft)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn get(&self, id: i64) -> ApiResult<Certificate> {
        Ok(self.client.call(RequestSpec::get(format!("/certificates/{id}"))).await?)
    }

    /// Public lookup used to check a printed certificate.
    pub async fn by_number(&self, number: &str) -> ApiResult<Certificate> {
        let spec = RequestSpec::get(format!("/certificates/number/{number}"));
        Ok(self.client.call(spec).await?)
    }

    pub async fn mine(&self, paging: Paging) -> ApiResult<PageResult<Certificate>> {
        let spec = paged(RequestSpec::get("/certificates/my"), paging);
        Ok(self.client.call(spec).await?)
    }

    pub async fn all(&self, paging: Paging) -> ApiResult<PageResult<Certificate>> {
        let spec = paged(RequestSpec::get("/certificates/all"), paging);
        Ok(self.client.call(spec).await?)
    }

    pub async fn pending(&self, paging: Paging) -> ApiResult<PageResult<Certificate>> {
        let spec = paged(RequestSpec::get("/certificates/pending"), paging);
        Ok(self.client.call(spec).await?)
    }

    pub async fn decide(&self, decision: &CertificateDecision) -> ApiResult<()> {
        let spec = RequestSpec::post("/certificates/approve").json(decision)?;
        Ok(self.client.call_unit(spec).await?)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        Ok(self
            .client
            .call_unit(RequestSpec::delete(format!("/certificates/{id}")))
            .await?)
    }

    pub async fn count_for_user(&self, user_id: i64) -> ApiResult<u64> {
        let spec = RequestSpec::get(format!("/certificates/count/{user_id}"));
        Ok(self.client.call(spec).await?)
    }

    /// Rendered certificate for inline display.
    pub async fn preview(&self, id: i64) -> ApiResult<Bytes> {
        let spec = RequestSpec::get(format!("/certificates/{id}/preview"));
        Ok(self.client.call_bytes(spec).await?)
    }

    pub async fn download(&self, id: i64) -> ApiResult<Bytes> {
        let spec = RequestSpec::get(format!("/certificates/{id}/download"));
        Ok(self.client.call_bytes(spec).await?)
    }
}
