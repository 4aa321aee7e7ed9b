use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use crate::error::ApiResult;
use crate::models::PageRequest;
use crate::models::PageResult;
use crate::models::User;
use crate::models::UserSearch;
use crate::models::UserUpdate;

pub struct UsersApi<'a> {
    client: &'a CvsClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: i64) -> ApiResult<User> {
        Ok(self.client.call(RequestSpec::get(format!("/users/{id}"))).await?)
    }

    pub async fn update(&self, update: &UserUpdate) -> ApiResult<User> {
        let spec = RequestSpec::put("/users").json(update)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn search(&self, request: &PageRequest<UserSearch>) -> ApiResult<PageResult<User>> {
        let spec = RequestSpec::post("/users/search").json(request)?;
        Ok(self.client.call(spec).await?)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        Ok(self.client.call_unit(RequestSpec::delete(format!("/users/{id}"))).await?)
    }
}
