// Reminder sweep behavior: lessons inside the lead window are reminded
// exactly once; lessons outside it are left alone.

mod common;

use chrono::Utc;
use sea_orm::EntityTrait;

use tutorhub_backend::services::reminder::{self, REMINDER_LEAD_SECONDS};
use tutorhub_backend::stores::NewLesson;
use tutorhub_backend::types::db::{lesson, Role};

use common::{create_user, setup_app_data};

async fn book_lesson(
    app_data: &std::sync::Arc<tutorhub_backend::app_data::AppData>,
    teacher_id: &str,
    student_id: &str,
    date: i64,
) -> lesson::Model {
    app_data
        .lesson_store
        .create(NewLesson {
            teacher_id: teacher_id.to_string(),
            student_id: student_id.to_string(),
            subject: "Mathematics".to_string(),
            date,
            time: "15:00".to_string(),
            duration_hours: Some(1.0),
            price: 40.0,
            meeting_link: Some("https://meet.example.com/abc".to_string()),
            comment: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn sweep_marks_due_lessons_exactly_once() {
    let app_data = setup_app_data().await;

    let teacher = create_user(&app_data, Role::Teacher).await;
    let student = create_user(&app_data, Role::Student).await;

    let now = Utc::now().timestamp();
    let due = book_lesson(&app_data, &teacher.id, &student.id, now + 600).await;
    let far = book_lesson(
        &app_data,
        &teacher.id,
        &student.id,
        now + REMINDER_LEAD_SECONDS + 3600,
    )
    .await;

    // The mailer is disabled so sends are soft no-ops; the sweep still
    // marks the due lesson as reminded
    let sent = reminder::run_sweep(&app_data).await.unwrap();
    assert_eq!(sent, 1);

    let due_row = lesson::Entity::find_by_id(&due.id)
        .one(&app_data.db)
        .await
        .unwrap()
        .unwrap();
    assert!(due_row.reminder_sent);

    let far_row = lesson::Entity::find_by_id(&far.id)
        .one(&app_data.db)
        .await
        .unwrap()
        .unwrap();
    assert!(!far_row.reminder_sent);

    // Second pass finds nothing new
    let sent = reminder::run_sweep(&app_data).await.unwrap();
    assert_eq!(sent, 0);
}

#[tokio::test]
async fn sweep_ignores_lessons_already_started() {
    let app_data = setup_app_data().await;

    let teacher = create_user(&app_data, Role::Teacher).await;
    let student = create_user(&app_data, Role::Student).await;

    let now = Utc::now().timestamp();
    book_lesson(&app_data, &teacher.id, &student.id, now - 600).await;

    let sent = reminder::run_sweep(&app_data).await.unwrap();
    assert_eq!(sent, 0);
}
