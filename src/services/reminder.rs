use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::services::notification_service::LessonEmail;
use crate::types::db::{lesson, user};

/// How far ahead of the lesson start the reminder pair goes out
pub const REMINDER_LEAD_SECONDS: i64 = 15 * 60;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn the background reminder sweep.
///
/// Runs once a minute for the lifetime of the process. A failed send is
/// left unmarked and retried on the next tick until the lesson start
/// passes out of the window.
pub fn spawn_reminder_sweep(app_data: Arc<AppData>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            match run_sweep(&app_data).await {
                Ok(0) => {}
                Ok(sent) => tracing::info!("Reminder sweep sent {} reminder pairs", sent),
                Err(e) => tracing::error!("Reminder sweep failed: {}", e),
            }
        }
    })
}

/// One pass over lessons starting within the lead window.
///
/// # Returns
/// The number of lessons for which the reminder pair was sent and marked.
pub async fn run_sweep(app_data: &AppData) -> Result<usize, InternalError> {
    let now = Utc::now().timestamp();
    let due = app_data
        .lesson_store
        .pending_reminders(now, now + REMINDER_LEAD_SECONDS)
        .await?;

    let mut sent = 0;
    for lesson in due {
        let Some(student) = app_data.user_store.find_by_id(&lesson.student_id).await? else {
            continue;
        };
        let Some(teacher) = app_data.user_store.find_by_id(&lesson.teacher_id).await? else {
            continue;
        };

        let email = lesson_email(&lesson, &student, &teacher);

        match app_data.notification_service.send_lesson_reminder(&email).await {
            Ok(()) => {
                app_data.lesson_store.mark_reminder_sent(lesson).await?;
                sent += 1;
            }
            Err(e) => {
                tracing::warn!("Reminder email failed for lesson {}: {}", lesson.id, e);
            }
        }
    }

    Ok(sent)
}

/// Assemble the template payload for a lesson and its two parties
pub fn lesson_email(
    lesson: &lesson::Model,
    student: &user::Model,
    teacher: &user::Model,
) -> LessonEmail {
    LessonEmail {
        student_email: student.email.clone(),
        student_name: student.full_name(),
        teacher_email: teacher.email.clone(),
        teacher_name: teacher.full_name(),
        subject: lesson.subject.clone(),
        date: lesson.date,
        time: lesson.time.clone(),
        price: lesson.price,
        duration_hours: lesson.duration_hours,
        meeting_link: lesson.meeting_link.clone(),
        comment: lesson.comment.clone(),
    }
}
