use super::{
    ContactForm, FieldErrors, MAX_EMAIL_LEN, MAX_MESSAGE_LEN, MAX_NAME_LEN, MAX_SUBJECT_LEN,
    MIN_MESSAGE_LEN,
};

/// Validate a sender name: required, bounded length.
pub fn validate_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Some("Name is required".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Some(format!("Name must be at most {MAX_NAME_LEN} characters"));
    }
    None
}

/// Validate an email: required, bounded length, `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.chars().count() > MAX_EMAIL_LEN {
        return Some(format!("Email must be at most {MAX_EMAIL_LEN} characters"));
    }
    if !is_valid_address(trimmed) {
        return Some("Email must be a valid address".to_string());
    }
    None
}

/// Validate a subject line: required, bounded length.
pub fn validate_subject(subject: &str) -> Option<String> {
    let trimmed = subject.trim();
    if trimmed.is_empty() {
        return Some("Subject is required".to_string());
    }
    if trimmed.chars().count() > MAX_SUBJECT_LEN {
        return Some(format!("Subject must be at most {MAX_SUBJECT_LEN} characters"));
    }
    None
}

/// Validate a message body: required, within the min/max length bounds.
pub fn validate_message(message: &str) -> Option<String> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Some("Message is required".to_string());
    }
    let len = trimmed.chars().count();
    if len < MIN_MESSAGE_LEN {
        return Some(format!(
            "Message must be at least {MIN_MESSAGE_LEN} characters"
        ));
    }
    if len > MAX_MESSAGE_LEN {
        return Some(format!("Message must be at most {MAX_MESSAGE_LEN} characters"));
    }
    None
}

/// Check every field independently. Errors accumulate instead of
/// short-circuiting so the form can surface all problems at once.
pub fn validate(form: &ContactForm) -> FieldErrors {
    FieldErrors {
        name: validate_name(&form.name),
        email: validate_email(&form.email),
        subject: validate_subject(&form.subject),
        message: validate_message(&form.message),
    }
}

/// `local@domain.tld`-shaped check: non-empty local part, dotted domain
/// with no empty labels, no whitespace anywhere.
fn is_valid_address(addr: &str) -> bool {
    if addr.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = addr.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}
