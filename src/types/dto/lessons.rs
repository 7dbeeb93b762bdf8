use poem_openapi::Object;

/// Request to book a lesson with a teacher
#[derive(Object, Debug)]
pub struct BookLessonRequest {
    /// The teacher to book
    pub teacher_id: String,

    pub subject: String,

    /// Lesson start as unix seconds; must be in the future
    pub date: i64,

    /// Display time, e.g. "15:00"
    pub time: String,

    pub price: f64,

    pub duration_hours: Option<f64>,

    pub meeting_link: Option<String>,

    pub comment: Option<String>,
}

/// Response after booking a lesson
#[derive(Object, Debug)]
pub struct BookLessonResponse {
    pub success: bool,
    pub message: String,

    /// ID of the created lesson
    pub lesson_id: String,
}
