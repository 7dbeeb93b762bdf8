use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::lesson::{self, Entity as Lesson};

/// Fields required to book a lesson
pub struct NewLesson {
    pub teacher_id: String,
    pub student_id: String,
    pub subject: String,
    pub date: i64,
    pub time: String,
    pub duration_hours: Option<f64>,
    pub price: f64,
    pub meeting_link: Option<String>,
    pub comment: Option<String>,
}

/// LessonStore manages scheduled lessons between teachers and students
pub struct LessonStore {
    db: DatabaseConnection,
}

impl LessonStore {
    /// Create a new LessonStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record a booked lesson
    pub async fn create(&self, new_lesson: NewLesson) -> Result<lesson::Model, InternalError> {
        let row = lesson::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            teacher_id: Set(new_lesson.teacher_id),
            student_id: Set(new_lesson.student_id),
            subject: Set(new_lesson.subject),
            date: Set(new_lesson.date),
            time: Set(new_lesson.time),
            duration_hours: Set(new_lesson.duration_hours),
            price: Set(new_lesson.price),
            meeting_link: Set(new_lesson.meeting_link),
            comment: Set(new_lesson.comment),
            reminder_sent: Set(false),
            created_at: Set(Utc::now().timestamp()),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_lesson", e))
    }

    /// Lessons taught by `teacher_id` whose start is strictly after `now`.
    ///
    /// Used to block teacher self-deletion while commitments remain.
    pub async fn upcoming_for_teacher(
        &self,
        teacher_id: &str,
        now: i64,
    ) -> Result<Vec<lesson::Model>, InternalError> {
        Lesson::find()
            .filter(lesson::Column::TeacherId.eq(teacher_id))
            .filter(lesson::Column::Date.gt(now))
            .order_by_asc(lesson::Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("upcoming_lessons_for_teacher", e))
    }

    /// Lessons starting inside [now, horizon] that have not been reminded yet
    pub async fn pending_reminders(
        &self,
        now: i64,
        horizon: i64,
    ) -> Result<Vec<lesson::Model>, InternalError> {
        Lesson::find()
            .filter(lesson::Column::ReminderSent.eq(false))
            .filter(lesson::Column::Date.gte(now))
            .filter(lesson::Column::Date.lte(horizon))
            .order_by_asc(lesson::Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("pending_reminders", e))
    }

    /// Mark a lesson as reminded so the sweep does not send twice
    pub async fn mark_reminder_sent(&self, lesson: lesson::Model) -> Result<(), InternalError> {
        let mut active: lesson::ActiveModel = lesson.into();
        active.reminder_sent = Set(true);

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("mark_reminder_sent", e))?;

        Ok(())
    }
}
