use sea_orm::entity::prelude::*;

/// A scheduled session between a teacher and a student.
///
/// `date` is the lesson start as unix seconds; `time` keeps the display
/// form shown in listings and emails (e.g. "15:00").
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub teacher_id: String,
    pub student_id: String,
    pub subject: String,
    pub date: i64,
    pub time: String,
    pub duration_hours: Option<f64>,
    pub price: f64,
    pub meeting_link: Option<String>,
    pub comment: Option<String>,
    pub reminder_sent: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl ActiveModelBehavior for ActiveModel {}
