use std::time::Duration;

// The API gives no abort mechanism once a request is in flight; the
// timeout bounds how long the form can stay pending.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const SUCCESS_MESSAGE: &str =
    "Thank you! Your message has been sent successfully. You can expect a response within 24 hours.";

#[derive(Debug, Clone, Copy)]
pub enum FormField {
    Name,
    Email,
    Company,
    Subject,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Pending,
    Succeeded { message: String },
    Failed { message: String },
}

pub struct ContactForm {
    name: String,
    email: String,
    company: String,
    subject: String,
    message: String,
    status: SubmissionStatus,
    endpoint: String,
    owner_email: String,
    http_client: reqwest::Client,
}

impl ContactForm {
    pub fn new(endpoint: String, owner_email: String) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build the submission HTTP client.");
        Self {
            name: String::new(),
            email: String::new(),
            company: String::new(),
            subject: String::new(),
            message: String::new(),
            status: SubmissionStatus::Idle,
            endpoint,
            owner_email,
            http_client,
        }
    }

    pub fn update_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Company => self.company = value,
            FormField::Subject => self.subject = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Company => &self.company,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    // Gates the submit action only; the server re-validates everything.
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty()
            && !self.email.is_empty()
            && !self.subject.is_empty()
            && !self.message.is_empty()
    }

    pub async fn submit(&mut self) {
        if self.status == SubmissionStatus::Pending {
            return;
        }
        self.status = SubmissionStatus::Pending;

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "name": self.name,
                "email": self.email,
                "company": self.company,
                "subject": self.subject,
                "message": self.message,
            }))
            .send()
            .await;

        self.status = match response {
            Ok(response) if response.status().is_success() => {
                self.clear_fields();
                SubmissionStatus::Succeeded {
                    message: SUCCESS_MESSAGE.to_owned(),
                }
            }
            // Non-2xx and transport errors read the same to the submitter:
            // the message was not sent.
            Ok(_) | Err(_) => SubmissionStatus::Failed {
                message: format!(
                    "Sorry, there was an error sending your message. \
                    Please try again or reach out directly at {}.",
                    self.owner_email
                ),
            },
        };
    }

    fn clear_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.company.clear();
        self.subject.clear();
        self.message.clear();
    }
}
