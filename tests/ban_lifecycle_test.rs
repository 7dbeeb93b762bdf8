// Ban lifecycle exercised through the request-context path:
// a ban must invalidate the target's live tokens immediately.

mod common;

use tutorhub_backend::api::helpers;
use tutorhub_backend::services::ModerationService;
use tutorhub_backend::types::db::Role;

use common::{context_for, create_user, open_session, setup_app_data};

#[tokio::test]
async fn ban_forces_logout_of_live_sessions() {
    let app_data = setup_app_data().await;

    let admin = create_user(&app_data, Role::Admin).await;
    let student = create_user(&app_data, Role::Student).await;
    let token = open_session(&app_data, &student).await;

    // Token authenticates while the session is live
    let req = poem::Request::builder().finish();
    let ctx = helpers::request_context(&app_data, &req, Some(&token)).await;
    assert!(ctx.claims.is_some());
    assert_eq!(ctx.actor_id, student.id);

    // Ban the student
    let moderation = ModerationService::new(app_data.clone());
    let admin_ctx = context_for(&admin);
    moderation
        .ban_user(&admin_ctx, &student.id, "Repeated policy violations")
        .await
        .unwrap();

    // The very same token no longer authenticates: its session row is gone
    // even though the JWT signature is still valid
    let req = poem::Request::builder().finish();
    let ctx = helpers::request_context(&app_data, &req, Some(&token)).await;
    assert!(ctx.claims.is_none());
    assert_eq!(ctx.actor_id, "anonymous");
}

#[tokio::test]
async fn unban_does_not_resurrect_old_sessions() {
    let app_data = setup_app_data().await;

    let admin = create_user(&app_data, Role::Admin).await;
    let student = create_user(&app_data, Role::Student).await;
    let token = open_session(&app_data, &student).await;

    let moderation = ModerationService::new(app_data.clone());
    let admin_ctx = context_for(&admin);
    moderation
        .ban_user(&admin_ctx, &student.id, "Repeated policy violations")
        .await
        .unwrap();
    moderation.unban_user(&admin_ctx, &student.id).await.unwrap();

    // The account is active again but the pre-ban token stays dead;
    // the user must log in again
    let user = app_data.user_store.get_by_id(&student.id).await.unwrap();
    assert!(user.is_active);
    assert!(!user.banned);

    let req = poem::Request::builder().finish();
    let ctx = helpers::request_context(&app_data, &req, Some(&token)).await;
    assert!(ctx.claims.is_none());
}

#[tokio::test]
async fn garbage_token_never_authenticates() {
    let app_data = setup_app_data().await;

    let req = poem::Request::builder().finish();
    let ctx = helpers::request_context(&app_data, &req, Some("not-a-jwt")).await;
    assert!(ctx.claims.is_none());
}
