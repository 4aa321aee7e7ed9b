use cvs_client::CvsClient;
use cvs_client::RequestSpec;

use crate::error::ApiResult;
use crate::models::AdminDashboard;
use crate::models::StudentDashboard;
use crate::models::TeacherDashboard;

/// Role dashboards. Mall statistics live on [`crate::endpoints::MallApi`].
pub struct StatisticsApi<'a> {
    client: &'a CvsClient,
}

impl<'a> StatisticsApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    pub async fn admin_dashboard(&self) -> ApiResult<AdminDashboard> {
        Ok(self
            .client
            .call(RequestSpec::get("/statistics/admin-dashboard"))
            .await?)
    }

    pub async fn teacher_dashboard(&self) -> ApiResult<TeacherDashboard> {
        Ok(self
            .client
            .call(RequestSpec::get("/statistics/teacher-dashboard"))
            .await?)
    }

    pub async fn student_dashboard(&self) -> ApiResult<StudentDashboard> {
        Ok(self
            .client
            .call(RequestSpec::get("/statistics/student-dashboard"))
            .await?)
    }
}
