use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use htmlescape::encode_minimal;
use tracing::field::display;
use tracing::Span;
use uuid::Uuid;

use crate::{
    domain::{ContactRequest, ContactValidationError},
    email_client::EmailClient,
    startup::{ApplicationBaseUrl, SiteOwner},
    utils::error_chain_fmt,
};

#[derive(serde::Deserialize)]
pub struct ContactFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub company: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    ValidationError(#[from] ContactValidationError),
    #[error("Failed to deliver the {recipient} email")]
    DeliveryError {
        recipient: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::DeliveryError { .. } | ContactError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Server-side failures are reported with an opaque body; the cause
        // chain is only ever logged.
        let error = match self.status_code() {
            StatusCode::BAD_REQUEST => self.to_string(),
            _ => "Internal server error".to_owned(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": error }))
    }
}

#[tracing::instrument(
    name = "Relay a contact form submission",
    skip(form, email_client, owner, base_url),
    fields(
        submission_id = tracing::field::Empty,
        submitter_email = %form.email,
        subject = %form.subject
    )
)]
pub async fn submit_contact(
    form: web::Json<ContactFormData>,
    email_client: web::Data<EmailClient>,
    owner: web::Data<SiteOwner>,
    base_url: web::Data<ApplicationBaseUrl>,
) -> Result<HttpResponse, ContactError> {
    let request = ContactRequest::try_from(form.into_inner())?;
    let submission_id = Uuid::new_v4();
    Span::current().record("submission_id", &display(&submission_id));
    let submitted_at = Utc::now();

    send_owner_notification(&email_client, &owner, &request, submission_id, submitted_at).await?;
    send_submitter_confirmation(&email_client, &owner, &request, submitted_at, &base_url.0)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Message sent successfully" })))
}

#[tracing::instrument(name = "Notify the site owner", skip_all)]
async fn send_owner_notification(
    email_client: &EmailClient,
    owner: &SiteOwner,
    request: &ContactRequest,
    submission_id: Uuid,
    submitted_at: DateTime<Utc>,
) -> Result<(), ContactError> {
    let subject = format!("New contact form: {}", request.subject);
    let company = request.company.as_deref().unwrap_or("Not provided");
    let text_body = format!(
        "You received a new contact form submission.\n\n\
        Name: {}\n\
        Email: {}\n\
        Company: {}\n\
        Subject: {}\n\
        Submitted: {}\n\
        Reference: {}\n\n\
        Message:\n{}\n",
        request.name,
        request.email,
        company,
        request.subject,
        submitted_at.to_rfc2822(),
        submission_id,
        request.message
    );
    let html_body = format!(
        "<h2>New contact form submission</h2>\
        <p><strong>Name:</strong> {}</p>\
        <p><strong>Email:</strong> <a href=\"mailto:{}\">{}</a></p>\
        <p><strong>Company:</strong> {}</p>\
        <p><strong>Subject:</strong> {}</p>\
        <p><strong>Submitted:</strong> {}</p>\
        <p><strong>Reference:</strong> {}</p>\
        <h3>Message</h3>\
        <p>{}</p>",
        encode_minimal(&request.name),
        encode_minimal(request.email.as_ref()),
        encode_minimal(request.email.as_ref()),
        encode_minimal(company),
        encode_minimal(&request.subject),
        submitted_at.to_rfc2822(),
        submission_id,
        encode_minimal(&request.message)
    );
    email_client
        .send_email(&owner.email, &subject, &html_body, &text_body)
        .await
        .map_err(|e| ContactError::DeliveryError {
            recipient: "owner notification",
            source: e,
        })
}

// The confirmation deliberately omits the submitted message body.
#[tracing::instrument(name = "Confirm receipt to the submitter", skip_all)]
async fn send_submitter_confirmation(
    email_client: &EmailClient,
    owner: &SiteOwner,
    request: &ContactRequest,
    submitted_at: DateTime<Utc>,
    base_url: &str,
) -> Result<(), ContactError> {
    let company_text = match &request.company {
        Some(company) => format!("Company: {}\n", company),
        None => String::new(),
    };
    let text_body = format!(
        "Thank you for your inquiry!\n\n\
        Subject: {}\n\
        {}Submitted: {}\n\n\
        What happens next:\n\
        - Your inquiry will be reviewed within the next few hours.\n\
        - You can expect a detailed response within 24 hours.\n\n\
        Need immediate assistance? Reach out directly:\n\
        Email: {}\n\
        Phone: {}\n\n\
        Visit the portfolio: {}\n",
        request.subject,
        company_text,
        submitted_at.to_rfc2822(),
        owner.email,
        owner.phone,
        base_url
    );
    let company_html = match &request.company {
        Some(company) => format!("<p><strong>Company:</strong> {}</p>", encode_minimal(company)),
        None => String::new(),
    };
    let html_body = format!(
        "<h1>Thank you for your inquiry!</h1>\
        <p><strong>Subject:</strong> {}</p>\
        {}\
        <p><strong>Submitted:</strong> {}</p>\
        <h3>What happens next?</h3>\
        <ul>\
        <li>Your inquiry will be reviewed within the next few hours.</li>\
        <li>You can expect a detailed response within 24 hours.</li>\
        </ul>\
        <p>Need immediate assistance? Reach out directly at \
        <a href=\"mailto:{}\">{}</a> or {}.</p>\
        <p><a href=\"{}\">Visit the portfolio</a></p>",
        encode_minimal(&request.subject),
        company_html,
        submitted_at.to_rfc2822(),
        encode_minimal(owner.email.as_ref()),
        encode_minimal(owner.email.as_ref()),
        encode_minimal(&owner.phone),
        base_url
    );
    email_client
        .send_email(
            &request.email,
            "Thank you for your inquiry",
            &html_body,
            &text_body,
        )
        .await
        .map_err(|e| ContactError::DeliveryError {
            recipient: "submitter confirmation",
            source: e,
        })
}
