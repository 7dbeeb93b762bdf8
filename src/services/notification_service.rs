use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

use crate::config::MailerConfig;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Errors surfaced by the notification dispatcher.
///
/// Callers decide how much a failed email matters: the booking flow logs
/// and continues, the reminder sweep retries on its next tick.
#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Email provider rejected the request ({status}): {body}")]
    Provider { status: u16, body: String },

    #[error("Email transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Lesson details carried into the email templates
#[derive(Debug, Clone)]
pub struct LessonEmail {
    pub student_email: String,
    pub student_name: String,
    pub teacher_email: String,
    pub teacher_name: String,
    pub subject: String,
    /// Lesson start as unix seconds
    pub date: i64,
    /// Display time, e.g. "15:00"
    pub time: String,
    pub price: f64,
    pub duration_hours: Option<f64>,
    pub meeting_link: Option<String>,
    pub comment: Option<String>,
}

/// Notification dispatcher for transactional lesson emails.
///
/// Holds the provider configuration and a shared HTTP client; constructed
/// once at startup and passed around, never reached through a global.
/// Without an API key every send degrades to a logged no-op.
pub struct NotificationService {
    config: MailerConfig,
    http: reqwest::Client,
}

impl NotificationService {
    /// Create a new NotificationService with the given mailer configuration
    pub fn new(config: MailerConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Send booking confirmation emails to both student and teacher.
    ///
    /// The two sends are dispatched concurrently and awaited jointly.
    pub async fn send_booking_confirmation(
        &self,
        lesson: &LessonEmail,
    ) -> Result<(), MailerError> {
        if !self.config.is_configured() {
            tracing::warn!("Mailer not configured - skipping booking confirmation email");
            return Ok(());
        }

        let student_subject = format!("Lesson confirmed - {}", lesson.subject);
        let teacher_subject = format!("New student booked - {}", lesson.subject);

        let student = self.deliver(
            &lesson.student_email,
            &student_subject,
            booking_confirmation_student_html(lesson),
        );
        let teacher = self.deliver(
            &lesson.teacher_email,
            &teacher_subject,
            booking_confirmation_teacher_html(lesson),
        );

        tokio::try_join!(student, teacher)?;

        tracing::info!(
            "Booking confirmation emails sent to {} and {}",
            lesson.student_email,
            lesson.teacher_email
        );

        Ok(())
    }

    /// Send the pre-lesson reminder pair.
    ///
    /// Both parties receive the same body.
    pub async fn send_lesson_reminder(&self, lesson: &LessonEmail) -> Result<(), MailerError> {
        if !self.config.is_configured() {
            tracing::warn!("Mailer not configured - skipping lesson reminder email");
            return Ok(());
        }

        let subject = format!("Lesson reminder - {} (starting soon)", lesson.subject);
        let html = lesson_reminder_html(lesson);

        let student = self.deliver(&lesson.student_email, &subject, html.clone());
        let teacher = self.deliver(&lesson.teacher_email, &subject, html);

        tokio::try_join!(student, teacher)?;

        tracing::info!(
            "Reminder emails sent to {} and {}",
            lesson.student_email,
            lesson.teacher_email
        );

        Ok(())
    }

    /// POST one message to the delivery provider
    async fn deliver(&self, to: &str, subject: &str, html: String) -> Result<(), MailerError> {
        // is_configured() was checked by the caller
        let api_key = self.config.api_key.as_deref().unwrap_or_default();

        let payload = json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.config.sender },
            "subject": subject,
            "content": [{ "type": "text/html", "value": html }],
        });

        let response = self
            .http
            .post(SENDGRID_SEND_URL)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Lesson date formatted for email bodies, e.g. "Friday, March 14, 2025"
fn format_lesson_date(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => "unknown date".to_string(),
    }
}

fn optional_row(label: &str, value: Option<String>) -> String {
    match value {
        Some(v) => format!("<p><strong>{}:</strong> {}</p>", label, v),
        None => String::new(),
    }
}

fn meeting_link_block(link: &Option<String>) -> String {
    match link {
        Some(url) => format!(
            r#"<p><strong>Meeting link:</strong> <a href="{url}">{url}</a></p>"#,
            url = url
        ),
        None => String::new(),
    }
}

fn booking_confirmation_student_html(lesson: &LessonEmail) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h1>Your lesson is booked</h1>
  <p><strong>Teacher:</strong> {teacher}</p>
  <p><strong>Subject:</strong> {subject}</p>
  <p><strong>Date:</strong> {date}</p>
  <p><strong>Time:</strong> {time}</p>
  <p><strong>Price:</strong> {price} GEL</p>
  {duration}{comment}{link}
  <p>You will receive a reminder email 15 minutes before the lesson starts.</p>
  <p style="color: #94a3b8; font-size: 12px;">This is an automated message, please do not reply.</p>
</div>"#,
        teacher = lesson.teacher_name,
        subject = lesson.subject,
        date = format_lesson_date(lesson.date),
        time = lesson.time,
        price = lesson.price,
        duration = optional_row(
            "Duration",
            lesson.duration_hours.map(|h| format!("{} hours", h))
        ),
        comment = optional_row("Comment", lesson.comment.clone()),
        link = meeting_link_block(&lesson.meeting_link),
    )
}

fn booking_confirmation_teacher_html(lesson: &LessonEmail) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h1>You have a new student</h1>
  <p><strong>Student:</strong> {student}</p>
  <p><strong>Subject:</strong> {subject}</p>
  <p><strong>Date:</strong> {date}</p>
  <p><strong>Time:</strong> {time}</p>
  <p><strong>Earnings:</strong> {price} GEL</p>
  {duration}{link}
  <p>You will receive a reminder email 15 minutes before the lesson starts.</p>
  <p style="color: #94a3b8; font-size: 12px;">This is an automated message, please do not reply.</p>
</div>"#,
        student = lesson.student_name,
        subject = lesson.subject,
        date = format_lesson_date(lesson.date),
        time = lesson.time,
        price = lesson.price,
        duration = optional_row(
            "Duration",
            lesson.duration_hours.map(|h| format!("{} hours", h))
        ),
        link = meeting_link_block(&lesson.meeting_link),
    )
}

fn lesson_reminder_html(lesson: &LessonEmail) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h1>Your lesson starts in 15 minutes</h1>
  <p><strong>Student:</strong> {student}</p>
  <p><strong>Teacher:</strong> {teacher}</p>
  <p><strong>Subject:</strong> {subject}</p>
  <p><strong>Date:</strong> {date}</p>
  <p><strong>Time:</strong> {time}</p>
  {comment}{link}
  <p>Please be ready a few minutes early.</p>
</div>"#,
        student = lesson.student_name,
        teacher = lesson.teacher_name,
        subject = lesson.subject,
        date = format_lesson_date(lesson.date),
        time = lesson.time,
        comment = optional_row("Comment", lesson.comment.clone()),
        link = meeting_link_block(&lesson.meeting_link),
    )
}
