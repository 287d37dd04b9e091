use askama::Template;

use crate::contact::{ContactForm, FieldErrors};

/// Field values echoed back into the form so a rejected submission never
/// costs the visitor their text.
#[derive(Debug, Clone, Default)]
pub struct ContactFormValues {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<&ContactForm> for ContactFormValues {
    fn from(form: &ContactForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            subject: form.subject.clone(),
            message: form.message.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub site_name: String,
    pub csrf_token: String,
    pub values: ContactFormValues,
    pub errors: FieldErrors,
    pub general_error: Option<String>,
}

#[derive(Template)]
#[template(path = "contact_success.html")]
pub struct ContactSuccessTemplate {
    pub site_name: String,
}
