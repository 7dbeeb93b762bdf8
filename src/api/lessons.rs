use std::sync::Arc;

use chrono::Utc;
use poem::Request;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::auth::TokenCookie;
use crate::api::helpers;
use crate::app_data::AppData;
use crate::errors::api::LessonError;
use crate::services::reminder;
use crate::stores::NewLesson;
use crate::types::db::Role;
use crate::types::dto::lessons::{BookLessonRequest, BookLessonResponse};

/// Lesson booking API endpoints
pub struct LessonsApi {
    app_data: Arc<AppData>,
}

impl LessonsApi {
    /// Create a new LessonsApi backed by the shared AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for lesson endpoints
#[derive(Tags)]
enum LessonTags {
    /// Lesson booking
    Lessons,
}

#[OpenApi(prefix_path = "/lessons")]
impl LessonsApi {
    /// Book a lesson with a teacher.
    ///
    /// Sends confirmation emails to both parties. An email failure does not
    /// fail the booking; it is logged and the booking stands.
    #[oai(path = "/book", method = "post", tag = "LessonTags::Lessons")]
    async fn book(
        &self,
        req: &Request,
        auth: TokenCookie,
        body: Json<BookLessonRequest>,
    ) -> Result<Json<BookLessonResponse>, LessonError> {
        let ctx = helpers::request_context(&self.app_data, req, Some(&auth.0.key)).await;
        let claims = ctx.claims.as_ref().ok_or_else(LessonError::unauthenticated)?;

        if body.date <= Utc::now().timestamp() {
            return Err(LessonError::validation_error(
                "Lesson date must be in the future",
            ));
        }

        let teacher = self
            .app_data
            .user_store
            .get_by_id(&body.teacher_id)
            .await
            .map_err(LessonError::from_internal)?;

        if teacher.role != Role::Teacher {
            return Err(LessonError::validation_error("Target user is not a teacher"));
        }

        let student = self
            .app_data
            .user_store
            .get_by_id(&claims.sub)
            .await
            .map_err(LessonError::from_internal)?;

        let lesson = self
            .app_data
            .lesson_store
            .create(NewLesson {
                teacher_id: body.teacher_id.clone(),
                student_id: student.id.clone(),
                subject: body.subject.clone(),
                date: body.date,
                time: body.time.clone(),
                duration_hours: body.duration_hours,
                price: body.price,
                meeting_link: body.meeting_link.clone(),
                comment: body.comment.clone(),
            })
            .await
            .map_err(LessonError::from_internal)?;

        let email = reminder::lesson_email(&lesson, &student, &teacher);
        if let Err(e) = self
            .app_data
            .notification_service
            .send_booking_confirmation(&email)
            .await
        {
            tracing::error!(
                "Booking confirmation emails failed for lesson {}: {}",
                lesson.id,
                e
            );
        }

        Ok(Json(BookLessonResponse {
            success: true,
            message: "Lesson booked successfully".to_string(),
            lesson_id: lesson.id,
        }))
    }
}
