#[cfg(test)]
mod tests {
    use super::super::ModerationService;
    use crate::errors::api::ModerationError;
    use crate::test::utils::{context_for, create_test_user, open_session, setup_test_app_data};
    use crate::types::db::Role;
    use crate::types::internal::RequestContext;

    // ==================== ban_user ====================

    #[tokio::test]
    async fn ban_of_missing_user_returns_not_found() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let admin = create_test_user(&app_data, Role::Admin).await;
        let ctx = context_for(&admin);

        let result = service
            .ban_user(&ctx, "no-such-user", "Repeated policy violations")
            .await;

        assert!(matches!(result, Err(ModerationError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn short_ban_reason_is_rejected_and_user_unchanged() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let admin = create_test_user(&app_data, Role::Admin).await;
        let student = create_test_user(&app_data, Role::Student).await;
        let ctx = context_for(&admin);

        let result = service.ban_user(&ctx, &student.id, "  too short  ").await;
        assert!(matches!(result, Err(ModerationError::ValidationError(_))));

        let unchanged = app_data.user_store.get_by_id(&student.id).await.unwrap();
        assert!(!unchanged.banned);
        assert!(unchanged.is_active);
        assert_eq!(unchanged.ban_reason, None);

        // No log entry either: validation failed before any mutation
        let entries = app_data
            .admin_log_store
            .entries_for_target(&student.id)
            .await
            .unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn ban_then_unban_round_trips() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let admin = create_test_user(&app_data, Role::Admin).await;
        let student = create_test_user(&app_data, Role::Student).await;
        let ctx = context_for(&admin);

        let banned = service
            .ban_user(&ctx, &student.id, "Repeated policy violations")
            .await
            .unwrap();
        assert!(banned.banned);
        assert!(!banned.is_active);
        assert_eq!(
            banned.ban_reason.as_deref(),
            Some("Repeated policy violations")
        );

        let unbanned = service.unban_user(&ctx, &student.id).await.unwrap();
        assert!(!unbanned.banned);
        assert!(unbanned.is_active);
        assert_eq!(unbanned.ban_reason, None);
    }

    #[tokio::test]
    async fn self_ban_is_rejected_for_every_role() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        for role in [Role::Admin, Role::SuperAdmin] {
            let caller = create_test_user(&app_data, role).await;
            let ctx = context_for(&caller);

            let result = service
                .ban_user(&ctx, &caller.id, "Repeated policy violations")
                .await;
            assert!(matches!(result, Err(ModerationError::SelfActionDenied(_))));
        }
    }

    #[tokio::test]
    async fn admin_cannot_ban_admins_but_super_admin_can() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let admin = create_test_user(&app_data, Role::Admin).await;
        let other_admin = create_test_user(&app_data, Role::Admin).await;
        let super_admin = create_test_user(&app_data, Role::SuperAdmin).await;

        let ctx = context_for(&admin);
        let result = service
            .ban_user(&ctx, &other_admin.id, "Repeated policy violations")
            .await;
        assert!(matches!(
            result,
            Err(ModerationError::SuperAdminRequired(_))
        ));

        let result = service
            .ban_user(&ctx, &super_admin.id, "Repeated policy violations")
            .await;
        assert!(matches!(
            result,
            Err(ModerationError::SuperAdminRequired(_))
        ));

        let ctx = context_for(&super_admin);
        let banned = service
            .ban_user(&ctx, &other_admin.id, "Repeated policy violations")
            .await
            .unwrap();
        assert!(banned.banned);
    }

    #[tokio::test]
    async fn already_banned_user_cannot_be_banned_again() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let admin = create_test_user(&app_data, Role::Admin).await;
        let student = create_test_user(&app_data, Role::Student).await;
        let ctx = context_for(&admin);

        service
            .ban_user(&ctx, &student.id, "Repeated policy violations")
            .await
            .unwrap();

        let result = service
            .ban_user(&ctx, &student.id, "Another sufficiently long reason")
            .await;
        assert!(matches!(result, Err(ModerationError::AlreadyBanned(_))));
    }

    #[tokio::test]
    async fn non_admin_callers_are_forbidden() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let student = create_test_user(&app_data, Role::Student).await;
        let teacher = create_test_user(&app_data, Role::Teacher).await;
        let target = create_test_user(&app_data, Role::Student).await;

        for caller in [&student, &teacher] {
            let ctx = context_for(caller);
            let result = service
                .ban_user(&ctx, &target.id, "Repeated policy violations")
                .await;
            assert!(matches!(result, Err(ModerationError::AdminRequired(_))));
        }
    }

    #[tokio::test]
    async fn unauthenticated_caller_is_rejected() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let target = create_test_user(&app_data, Role::Student).await;
        let ctx = RequestContext::new();

        let result = service
            .ban_user(&ctx, &target.id, "Repeated policy violations")
            .await;
        assert!(matches!(result, Err(ModerationError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn banning_a_student_deletes_sessions_and_logs_once() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let admin = create_test_user(&app_data, Role::Admin).await;
        let student = create_test_user(&app_data, Role::Student).await;

        // Two live sessions that must not survive the ban
        open_session(&app_data, &student).await;
        open_session(&app_data, &student).await;
        assert_eq!(
            app_data.session_store.count_for_user(&student.id).await.unwrap(),
            2
        );

        let ctx = context_for(&admin);
        let banned = service
            .ban_user(&ctx, &student.id, "Repeated policy violations")
            .await
            .unwrap();

        assert!(banned.banned);
        assert!(!banned.is_active);
        assert_eq!(
            app_data.session_store.count_for_user(&student.id).await.unwrap(),
            0
        );

        let entries = app_data
            .admin_log_store
            .entries_for_target(&student.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "BAN_USER");
        assert_eq!(entries[0].actor_id, admin.id);
        assert_eq!(entries[0].target_id, student.id);

        let details: serde_json::Value = serde_json::from_str(&entries[0].details).unwrap();
        assert_eq!(details["ban_reason"], "Repeated policy violations");
        assert_eq!(details["banned_user_email"], student.email.as_str());
    }

    // ==================== unban_user ====================

    #[tokio::test]
    async fn unban_of_unbanned_user_is_a_conflict() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let admin = create_test_user(&app_data, Role::Admin).await;
        let student = create_test_user(&app_data, Role::Student).await;
        let ctx = context_for(&admin);

        let result = service.unban_user(&ctx, &student.id).await;
        assert!(matches!(result, Err(ModerationError::NotBanned(_))));
    }

    #[tokio::test]
    async fn unban_records_the_previous_reason() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let admin = create_test_user(&app_data, Role::Admin).await;
        let student = create_test_user(&app_data, Role::Student).await;
        let ctx = context_for(&admin);

        service
            .ban_user(&ctx, &student.id, "Repeated policy violations")
            .await
            .unwrap();
        service.unban_user(&ctx, &student.id).await.unwrap();

        let entries = app_data
            .admin_log_store
            .entries_for_target(&student.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, "UNBAN_USER");

        let details: serde_json::Value = serde_json::from_str(&entries[1].details).unwrap();
        assert_eq!(details["previous_ban_reason"], "Repeated policy violations");
    }

    // ==================== delete_user ====================

    #[tokio::test]
    async fn self_delete_is_rejected_from_the_admin_panel() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let super_admin = create_test_user(&app_data, Role::SuperAdmin).await;
        let ctx = context_for(&super_admin);

        let result = service.delete_user(&ctx, &super_admin.id).await;
        assert!(matches!(result, Err(ModerationError::SelfActionDenied(_))));
    }

    #[tokio::test]
    async fn admin_cannot_delete_admins_but_super_admin_can() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let admin = create_test_user(&app_data, Role::Admin).await;
        let other_admin = create_test_user(&app_data, Role::Admin).await;
        let super_admin = create_test_user(&app_data, Role::SuperAdmin).await;

        let ctx = context_for(&admin);
        let result = service.delete_user(&ctx, &other_admin.id).await;
        assert!(matches!(
            result,
            Err(ModerationError::SuperAdminRequired(_))
        ));

        let ctx = context_for(&super_admin);
        service.delete_user(&ctx, &other_admin.id).await.unwrap();

        let gone = app_data.user_store.find_by_id(&other_admin.id).await.unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn delete_writes_one_snapshot_log_entry_and_cascades() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let admin = create_test_user(&app_data, Role::Admin).await;
        let student = create_test_user(&app_data, Role::Student).await;
        open_session(&app_data, &student).await;

        let ctx = context_for(&admin);
        let deleted = service.delete_user(&ctx, &student.id).await.unwrap();
        assert_eq!(deleted.id, student.id);

        // Row gone, sessions cascaded away
        assert!(app_data
            .user_store
            .find_by_id(&student.id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            app_data.session_store.count_for_user(&student.id).await.unwrap(),
            0
        );

        let entries = app_data
            .admin_log_store
            .entries_for_target(&student.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "DELETE_USER");
        assert_eq!(entries[0].actor_id, admin.id);

        let details: serde_json::Value = serde_json::from_str(&entries[0].details).unwrap();
        assert_eq!(details["deleted_user_email"], student.email.as_str());
        assert_eq!(details["deleted_user_role"], "STUDENT");
    }

    // ==================== list_users ====================

    #[tokio::test]
    async fn listing_requires_an_admin() {
        let app_data = setup_test_app_data().await;
        let service = ModerationService::new(app_data.clone());

        let student = create_test_user(&app_data, Role::Student).await;
        let ctx = context_for(&student);

        let result = service.list_users(&ctx).await;
        assert!(matches!(result, Err(ModerationError::AdminRequired(_))));

        let admin = create_test_user(&app_data, Role::Admin).await;
        let ctx = context_for(&admin);
        let users = service.list_users(&ctx).await.unwrap();
        assert_eq!(users.len(), 2);
    }
}
