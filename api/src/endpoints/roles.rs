use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use crate::error::ApiResult;
use crate::models::RoleAssignment;
use crate::models::UserRole;

pub struct RolesApi<'a> {
    client: &'a CvsClient,
}

impl<'a> RolesApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<UserRole>> {
        Ok(self.client.call(RequestSpec::get("/roles")).await?)
    }

    pub async fn assign(&self, user_id: i64, role: UserRole) -> ApiResult<()> {
        let spec = RequestSpec::post(format!("/roles/users/{user_id}")).json(&RoleAssignment { role })?;
        Ok(self.client.call_unit(spec).await?)
    }

    pub async fn of_user(&self, user_id: i64) -> ApiResult<UserRole> {
        let assignment: RoleAssignment = self
            .client
            .call(RequestSpec::get(format!("/roles/users/{user_id}")))
            .await?;
        Ok(assignment.role)
    }
}
