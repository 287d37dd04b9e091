use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::config::AppConfig;
use crate::contact::submit::{self, SubmissionOutcome};
use crate::contact::{ContactForm, FieldErrors};
use crate::email::EmailSender;
use crate::errors::{AppError, render};
use crate::security::{csrf, rate_limit::RateLimiter};
use crate::templates_structs::{ContactFormValues, ContactSuccessTemplate, ContactTemplate};

pub async fn contact_page(
    session: Session,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let csrf_token = csrf::issue_token(&session);
    render(ContactTemplate {
        site_name: config.site_name.clone(),
        csrf_token,
        values: ContactFormValues::default(),
        errors: FieldErrors::default(),
        general_error: None,
    })
}

pub async fn contact_submit(
    req: HttpRequest,
    session: Session,
    form: web::Form<ContactForm>,
    limiter: web::Data<RateLimiter>,
    sender: web::Data<dyn EmailSender>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    let outcome = submit::process(&form, &session, ip, &limiter, sender.get_ref(), &config).await;

    // Tokens are single-use; every response carries a fresh one.
    let csrf_token = csrf::issue_token(&session);

    let rejected = |values: ContactFormValues, errors: FieldErrors, banner: Option<String>| {
        render(ContactTemplate {
            site_name: config.site_name.clone(),
            csrf_token: csrf_token.clone(),
            values,
            errors,
            general_error: banner,
        })
    };

    match outcome {
        SubmissionOutcome::Accepted | SubmissionOutcome::Discarded => {
            render(ContactSuccessTemplate {
                site_name: config.site_name.clone(),
            })
        }
        SubmissionOutcome::RejectedValidation(errors) => {
            rejected((&*form).into(), errors, None)
        }
        SubmissionOutcome::RejectedCsrf => rejected(
            (&*form).into(),
            FieldErrors::default(),
            Some(submit::SESSION_EXPIRED_MESSAGE.to_string()),
        ),
        SubmissionOutcome::RejectedRateLimit => rejected(
            (&*form).into(),
            FieldErrors::default(),
            Some(submit::RATE_LIMIT_MESSAGE.to_string()),
        ),
        SubmissionOutcome::Failed(message) => {
            rejected((&*form).into(), FieldErrors::default(), Some(message))
        }
    }
}
