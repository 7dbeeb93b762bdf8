use poem_openapi::Object;

/// Request to delete the caller's own account
#[derive(Object, Debug)]
pub struct DeleteAccountRequest {
    /// Current password, required to confirm the deletion
    pub password: String,

    /// Literal confirmation phrase; must be exactly "DELETE MY ACCOUNT"
    pub confirm_text: String,
}

/// Response body after a successful self-deletion
#[derive(Object, Debug)]
pub struct DeleteAccountBody {
    pub success: bool,
    pub message: String,
}

/// A future lesson blocking a teacher's self-deletion
#[derive(Object, Debug, Clone)]
pub struct UpcomingLessonSummary {
    pub subject: String,

    /// Lesson start as unix seconds
    pub date: i64,

    /// Display time, e.g. "15:00"
    pub time: String,
}
