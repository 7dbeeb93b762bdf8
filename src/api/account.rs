use std::sync::Arc;

use poem::Request;
use poem_openapi::{payload::Json, ApiResponse, OpenApi, Tags};

use crate::api::auth::TokenCookie;
use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::api::AccountError;
use crate::services::AccountService;
use crate::types::dto::account::{DeleteAccountBody, DeleteAccountRequest};

/// Account self-service API endpoints
pub struct AccountApi {
    app_data: Arc<AppData>,
    account: AccountService,
}

impl AccountApi {
    /// Create a new AccountApi backed by the shared AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        let account = AccountService::new(app_data.clone());
        Self { app_data, account }
    }
}

/// API tags for account endpoints
#[derive(Tags)]
enum AccountTags {
    /// Account self-service
    Account,
}

/// Successful self-deletion, with the session cookie cleared
#[derive(ApiResponse)]
pub enum DeleteAccountResponse {
    #[oai(status = 200)]
    Ok(Json<DeleteAccountBody>, #[oai(header = "Set-Cookie")] String),
}

#[OpenApi(prefix_path = "/users")]
impl AccountApi {
    /// Permanently delete the caller's own account
    #[oai(path = "/delete-account", method = "delete", tag = "AccountTags::Account")]
    async fn delete_account(
        &self,
        req: &Request,
        auth: TokenCookie,
        body: Json<DeleteAccountRequest>,
    ) -> Result<DeleteAccountResponse, AccountError> {
        let ctx = helpers::request_context(&self.app_data, req, Some(&auth.0.key)).await;

        self.account
            .delete_own_account(&ctx, &body.password, &body.confirm_text)
            .await?;

        Ok(DeleteAccountResponse::Ok(
            Json(DeleteAccountBody {
                success: true,
                message: "Your account has been permanently deleted".to_string(),
            }),
            helpers::CLEAR_SESSION_COOKIE.to_string(),
        ))
    }
}
