use std::sync::Arc;

use chrono::Utc;

use crate::app_data::AppData;
use crate::errors::api::AccountError;
use crate::stores::{LessonStore, UserStore};
use crate::types::db::Role;
use crate::types::dto::account::UpcomingLessonSummary;
use crate::types::internal::{AdminAction, RequestContext};

/// Literal phrase the user must type to confirm self-deletion.
///
/// The backend accepts exactly this phrase; clients that present a
/// localized prompt still submit it verbatim.
pub const DELETE_CONFIRMATION_PHRASE: &str = "DELETE MY ACCOUNT";

/// Account self-service flows (currently: deletion)
pub struct AccountService {
    user_store: Arc<UserStore>,
    lesson_store: Arc<LessonStore>,
}

impl AccountService {
    /// Create AccountService from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: app_data.user_store.clone(),
            lesson_store: app_data.lesson_store.clone(),
        }
    }

    /// Delete the caller's own account.
    ///
    /// Requires the exact confirmation phrase and the current password.
    /// A TEACHER with lessons dated strictly in the future is rejected with
    /// the list of blocking lessons; other roles are not restricted. The
    /// deletion cascades to profiles, lessons, reviews and sessions, and is
    /// recorded as a DELETE_ACCOUNT admin log entry in the same transaction.
    pub async fn delete_own_account(
        &self,
        ctx: &RequestContext,
        password: &str,
        confirm_text: &str,
    ) -> Result<(), AccountError> {
        let claims = ctx
            .claims
            .as_ref()
            .ok_or_else(AccountError::unauthenticated)?;

        if confirm_text != DELETE_CONFIRMATION_PHRASE {
            return Err(AccountError::confirmation_mismatch());
        }

        let user = self
            .user_store
            .get_by_id(&claims.sub)
            .await
            .map_err(AccountError::from_internal)?;

        let password_valid = self
            .user_store
            .verify_password(&user, password)
            .await
            .map_err(AccountError::from_internal)?;

        if !password_valid {
            return Err(AccountError::incorrect_password());
        }

        if user.role == Role::Teacher {
            let now = Utc::now().timestamp();
            let upcoming = self
                .lesson_store
                .upcoming_for_teacher(&user.id, now)
                .await
                .map_err(AccountError::from_internal)?;

            if !upcoming.is_empty() {
                let summaries = upcoming
                    .into_iter()
                    .map(|lesson| UpcomingLessonSummary {
                        subject: lesson.subject,
                        date: lesson.date,
                        time: lesson.time,
                    })
                    .collect();
                return Err(AccountError::upcoming_lessons(summaries));
            }
        }

        self.user_store
            .delete_user(ctx, &user, AdminAction::DeleteAccount)
            .await
            .map_err(AccountError::from_internal)?;

        tracing::info!("Account {} deleted by its owner", user.id);

        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod account_service_tests;
