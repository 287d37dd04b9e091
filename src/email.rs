use std::fmt;

use async_trait::async_trait;
use lettre::message::{Mailbox, header};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// A single outbound message, transport-agnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub reply_to: Option<String>,
}

#[derive(Debug)]
pub enum EmailError {
    Address(String),
    Transport(String),
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailError::Address(e) => write!(f, "Bad email address: {e}"),
            EmailError::Transport(e) => write!(f, "Mail transport error: {e}"),
        }
    }
}

impl std::error::Error for EmailError {}

/// Delivery abstraction so handlers and tests never touch SMTP directly.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Returns `Ok(true)` only if the transport accepted the message.
    async fn send(&self, email: OutboundEmail) -> Result<bool, EmailError>;
}

/// SMTP delivery over lettre's async transport, configured from a
/// `smtp://` URL.
#[derive(Clone)]
pub struct SmtpEmailSender {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailSender {
    pub fn new(url: &str, from: &str) -> Result<Self, EmailError> {
        let from = parse_mailbox(from)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
            .map_err(|e| EmailError::Transport(e.to_string()))?
            .build();
        Ok(Self { from, transport })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, email: OutboundEmail) -> Result<bool, EmailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.recipient)?)
            .subject(email.subject)
            .header(header::ContentType::TEXT_PLAIN);
        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to)?);
        }
        let message = builder
            .body(email.body)
            .map_err(|e| EmailError::Transport(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(|e| EmailError::Transport(e.to_string()))
    }
}

fn parse_mailbox(addr: &str) -> Result<Mailbox, EmailError> {
    addr.parse()
        .map_err(|e: lettre::address::AddressError| EmailError::Address(e.to_string()))
}
