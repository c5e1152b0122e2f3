mod contact_request;
mod email;

pub use contact_request::{ContactRequest, ContactValidationError};
pub use email::Email;
