use once_cell::sync::Lazy;
use regex::Regex;

// Shape check only: something before the `@`, a dot somewhere after it,
// something after that dot. Deliverability is not checked here.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email shape pattern"));

#[derive(Debug)]
pub struct Email(String);
impl Email {
    pub fn parse(s: String) -> Result<Email, String> {
        if EMAIL_SHAPE.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid email.", s))
        }
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
