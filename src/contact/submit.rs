use std::net::IpAddr;

use actix_session::Session;

use super::{ContactForm, FieldErrors, validate};
use crate::config::AppConfig;
use crate::email::{EmailSender, OutboundEmail};
use crate::security::{csrf, rate_limit::RateLimiter};

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please wait a moment and try again.";
pub const SESSION_EXPIRED_MESSAGE: &str =
    "Your session expired. A new security token has been issued — please try again.";
pub const SEND_FAILED_MESSAGE: &str = "Could not send your message. Please try again later.";

/// What became of one submission attempt. Drives the HTTP response only;
/// nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Message validated and accepted by the mail transport.
    Accepted,
    /// Honeypot tripped. Dropped without delivery, but reported to the
    /// caller exactly like `Accepted` so bots learn nothing.
    Discarded,
    RejectedValidation(FieldErrors),
    RejectedCsrf,
    RejectedRateLimit,
    /// Transport refused or failed; carries the user-facing message.
    Failed(String),
}

/// Run one submission through the full pipeline: CSRF, rate limit,
/// honeypot, validation, delivery. The CSRF check comes first and always
/// consumes the stored token; the limiter records every attempt that gets
/// past it, valid or not. Blocked attempts are not recorded.
pub async fn process(
    form: &ContactForm,
    session: &Session,
    peer_ip: IpAddr,
    limiter: &RateLimiter,
    sender: &dyn EmailSender,
    config: &AppConfig,
) -> SubmissionOutcome {
    if !csrf::consume_token(session, &form.csrf_token) {
        return SubmissionOutcome::RejectedCsrf;
    }

    if limiter.is_blocked(peer_ip) {
        return SubmissionOutcome::RejectedRateLimit;
    }
    limiter.record(peer_ip);

    if !form.website.trim().is_empty() {
        log::debug!("Honeypot tripped from {peer_ip} — discarding submission");
        return SubmissionOutcome::Discarded;
    }

    let errors = validate::validate(form);
    if !errors.is_empty() {
        return SubmissionOutcome::RejectedValidation(errors);
    }

    match sender.send(build_email(form, config)).await {
        Ok(true) => SubmissionOutcome::Accepted,
        Ok(false) => {
            log::error!("Mail transport returned a negative response for contact submission");
            SubmissionOutcome::Failed(SEND_FAILED_MESSAGE.to_string())
        }
        Err(err) => {
            log::error!("Failed to send contact email: {err}");
            SubmissionOutcome::Failed(SEND_FAILED_MESSAGE.to_string())
        }
    }
}

fn build_email(form: &ContactForm, config: &AppConfig) -> OutboundEmail {
    OutboundEmail {
        recipient: config.contact_recipient.clone(),
        subject: format!("[Contact Form] {}", form.subject.trim()),
        body: format!(
            "Message from {} ({}) via {}:\n\n{}",
            form.name.trim(),
            form.email.trim(),
            config.site_name,
            form.message.trim()
        ),
        reply_to: Some(form.email.trim().to_string()),
    }
}
