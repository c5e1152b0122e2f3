use crate::{domain::Email, routes::ContactFormData};

// A submission that survived validation. `company` is normalized:
// an absent or blank value becomes `None`.
pub struct ContactRequest {
    pub name: String,
    pub email: Email,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ContactValidationError {
    #[error("Missing required fields")]
    MissingRequiredFields,
    #[error("Invalid email format")]
    InvalidEmailFormat,
}

impl TryFrom<ContactFormData> for ContactRequest {
    type Error = ContactValidationError;
    fn try_from(value: ContactFormData) -> Result<Self, Self::Error> {
        let name = required_text(value.name)?;
        let subject = required_text(value.subject)?;
        let message = required_text(value.message)?;
        let email = required_text(value.email)?;
        let email =
            Email::parse(email).map_err(|_| ContactValidationError::InvalidEmailFormat)?;
        let company = value
            .company
            .map(|company| company.trim().to_owned())
            .filter(|company| !company.is_empty());
        Ok(Self {
            name,
            email,
            company,
            subject,
            message,
        })
    }
}

fn required_text(value: String) -> Result<String, ContactValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ContactValidationError::MissingRequiredFields)
    } else {
        Ok(trimmed.to_owned())
    }
}
