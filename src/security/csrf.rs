use actix_session::Session;
use rand::Rng;

const SESSION_KEY: &str = "csrf_token";

/// Issue a fresh CSRF token into the session, replacing any previous one.
/// Every rendered form and every token-endpoint call gets its own token.
pub fn issue_token(session: &Session) -> String {
    let token = generate_token();
    let _ = session.insert(SESSION_KEY, &token);
    token
}

/// Validate and consume the session token in one step. Tokens are
/// single-use: the stored value is removed on every attempt, match or not,
/// so a spent or mismatched token cannot be retried without obtaining the
/// fresh one carried by the response.
pub fn consume_token(session: &Session, submitted: &str) -> bool {
    let stored = match session.remove_as::<String>(SESSION_KEY) {
        Some(Ok(token)) => token,
        _ => return false,
    };
    !stored.is_empty() && !submitted.is_empty() && constant_time_eq(&stored, submitted)
}

/// Generate a random 32-byte hex token.
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
