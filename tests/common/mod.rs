//! Shared test infrastructure for the contact-flow tests.
//!
//! Provides a recording mail sender and an app harness wired exactly like
//! the production server (session middleware, limiter, shared route table),
//! plus helpers for walking the token-issuance step of the flow.

use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, Error, test, web};
use async_trait::async_trait;

use atelier::config::AppConfig;
use atelier::email::{EmailError, EmailSender, OutboundEmail};
use atelier::handlers;
use atelier::security::rate_limit::RateLimiter;

pub const TEST_RECIPIENT: &str = "studio@atelier.example";

#[derive(Clone, Copy)]
pub enum SendMode {
    /// Transport accepts the message.
    Accept,
    /// Transport answers with a negative response.
    Reject,
    /// Transport errors out entirely.
    Fail,
}

/// Recording mail sender. Every delivered message lands in `sent`; `mode`
/// selects the result handed back to the pipeline.
pub struct MockEmailSender {
    pub sent: Mutex<Vec<OutboundEmail>>,
    mode: SendMode,
}

impl MockEmailSender {
    pub fn new(mode: SendMode) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            mode,
        })
    }

    pub fn accepting() -> Arc<Self> {
        Self::new(SendMode::Accept)
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("sender lock").len()
    }

    pub fn last_sent(&self) -> OutboundEmail {
        self.sent
            .lock()
            .expect("sender lock")
            .last()
            .expect("no email was sent")
            .clone()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, email: OutboundEmail) -> Result<bool, EmailError> {
        match self.mode {
            SendMode::Fail => Err(EmailError::Transport("connection refused".to_string())),
            SendMode::Reject => Ok(false),
            SendMode::Accept => {
                self.sent.lock().expect("sender lock").push(email);
                Ok(true)
            }
        }
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        site_name: "Atelier".to_string(),
        contact_recipient: TEST_RECIPIENT.to_string(),
        smtp_url: "smtp://127.0.0.1:25".to_string(),
        smtp_from: "no-reply@atelier.example".to_string(),
    }
}

/// Build the app exactly as main.rs does, with the given sender swapped in.
pub async fn init_app(
    sender: Arc<MockEmailSender>,
) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    let sender: Arc<dyn EmailSender> = sender;
    test::init_service(
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_secure(false)
                    .cookie_http_only(true)
                    .build(),
            )
            .app_data(web::Data::new(test_config()))
            .app_data(web::Data::new(RateLimiter::new()))
            .app_data(web::Data::from(sender))
            .configure(handlers::configure),
    )
    .await
}

/// GET /contact and return the session cookie plus the CSRF token embedded
/// in the rendered form.
pub async fn get_form(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
) -> (Cookie<'static>, String) {
    let resp = test::call_service(
        app,
        test::TestRequest::get().uri("/contact").to_request(),
    )
    .await;
    assert!(resp.status().is_success(), "GET /contact failed");
    let cookie = session_cookie(&resp);
    let html = read_html(resp).await;
    let token = extract_csrf_token(&html);
    (cookie, token)
}

/// GET /api/v1/contact/token and return the session cookie plus the token
/// from the JSON body.
pub async fn get_api_token(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
) -> (Cookie<'static>, String) {
    let resp = test::call_service(
        app,
        test::TestRequest::get()
            .uri("/api/v1/contact/token")
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success(), "token endpoint failed");
    let cookie = session_cookie(&resp);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["csrfToken"]
        .as_str()
        .expect("csrfToken missing from response")
        .to_string();
    (cookie, token)
}

pub fn session_cookie(resp: &ServiceResponse) -> Cookie<'static> {
    resp.response()
        .cookies()
        .next()
        .expect("no session cookie in response")
        .into_owned()
}

pub async fn read_html(resp: ServiceResponse) -> String {
    let body = test::read_body(resp).await;
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

pub fn extract_csrf_token(html: &str) -> String {
    let re = regex::Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).expect("regex");
    re.captures(html)
        .expect("no csrf token in page")
        .get(1)
        .expect("capture group")
        .as_str()
        .to_string()
}

/// A form body that passes every validation rule.
pub fn valid_form(token: &str) -> Vec<(String, String)> {
    vec![
        ("name".to_string(), "Jane Doe".to_string()),
        ("email".to_string(), "jane@example.com".to_string()),
        ("subject".to_string(), "Project inquiry".to_string()),
        (
            "message".to_string(),
            "We would like to discuss a new marketing site.".to_string(),
        ),
        ("website".to_string(), String::new()),
        ("csrf_token".to_string(), token.to_string()),
    ]
}

/// The JSON equivalent of `valid_form`, using the API's camelCase key.
pub fn valid_json(token: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "subject": "Project inquiry",
        "message": "We would like to discuss a new marketing site.",
        "website": "",
        "csrfToken": token,
    })
}
