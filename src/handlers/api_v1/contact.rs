use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::config::AppConfig;
use crate::contact::ContactForm;
use crate::contact::submit::{self, SubmissionOutcome};
use crate::email::EmailSender;
use crate::security::{csrf, rate_limit::RateLimiter};

/// GET /api/v1/contact/token - issue a fresh single-use CSRF token.
///
/// Fetch-based clients call this once per page load and again after every
/// submission attempt, since a token never survives its first use.
pub async fn token(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "csrfToken": csrf::issue_token(&session) }))
}

/// POST /api/v1/contact - validate and deliver a contact message.
///
/// Status codes consumed by clients: 200 accepted, 400 validation (with a
/// per-field error map), 403 bad/expired token, 429 rate limited, 500
/// delivery failure. Honeypot submissions answer 200 with nothing sent.
pub async fn submit_message(
    req: HttpRequest,
    session: Session,
    payload: web::Json<ContactForm>,
    limiter: web::Data<RateLimiter>,
    sender: web::Data<dyn EmailSender>,
    config: web::Data<AppConfig>,
) -> HttpResponse {
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    match submit::process(&payload, &session, ip, &limiter, sender.get_ref(), &config).await {
        SubmissionOutcome::Accepted | SubmissionOutcome::Discarded => {
            HttpResponse::Ok().json(json!({ "success": true }))
        }
        SubmissionOutcome::RejectedValidation(errors) => HttpResponse::BadRequest().json(json!({
            "error": "Validation failed",
            "fields": errors,
        })),
        SubmissionOutcome::RejectedCsrf => HttpResponse::Forbidden().json(json!({
            "error": "Invalid or expired security token",
        })),
        SubmissionOutcome::RejectedRateLimit => HttpResponse::TooManyRequests().json(json!({
            "error": submit::RATE_LIMIT_MESSAGE,
        })),
        SubmissionOutcome::Failed(message) => {
            HttpResponse::InternalServerError().json(json!({ "error": message }))
        }
    }
}
