use cvs_client::CvsClient;
use cvs_client::RequestSpec;
use tracing::info;

use crate::error::ApiResult;
use crate::models::ForgotPasswordRequest;
use crate::models::LoginInfo;
use crate::models::LoginRequest;
use crate::models::RegisterRequest;
use crate::models::ResetPasswordRequest;
use crate::models::SendCodeRequest;
use crate::models::User;
use crate::models::VerifyCodeRequest;
use crate::models::VerifyCodeResult;

/// `/auth`: sign-in, registration and password recovery.
pub struct AuthApi<'a> {
    client: &'a CvsClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a CvsClient) -> Self {
        Self { client }
    }

    /// Signs in and stores the issued token as the current session, which
    /// also re-arms session invalidation.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginInfo> {
        let spec = RequestSpec::post("/auth/login").json(request)?.public();
        let info: LoginInfo = self.client.call(spec).await?;
        self.client.login(info.token.clone())?;
        info!(user_id = info.user_id, role = ?info.role, "signed in");
        Ok(info)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        let spec = RequestSpec::post("/auth/register").json(request)?.public();
        Ok(self.client.call(spec).await?)
    }

    /// Tells the backend, then drops local credentials whatever it answered.
    pub async fn logout(&self) -> ApiResult<()> {
        let remote = self.client.call_unit(RequestSpec::post("/auth/logout")).await;
        self.client.end_session()?;
        info!("signed out");
        Ok(remote?)
    }

    pub async fn send_code(&self, request: &SendCodeRequest) -> ApiResult<()> {
        let spec = RequestSpec::post("/auth/send-code").json(request)?.public();
        Ok(self.client.call_unit(spec).await?)
    }

    pub async fn verify_code(&self, request: &VerifyCodeRequest) -> ApiResult<VerifyCodeResult> {
        let spec = RequestSpec::post("/auth/verify-code").json(request)?.public();
        Ok(self.client.call(spec).await?)
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResult<()> {
        let spec = RequestSpec::post("/auth/reset-password").json(request)?;
        Ok(self.client.call_unit(spec).await?)
    }

    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> ApiResult<()> {
        let spec = RequestSpec::post("/auth/forgot-password").json(request)?.public();
        Ok(self.client.call_unit(spec).await?)
    }
}
