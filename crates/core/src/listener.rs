//! Listener identity anonymization.
//!
//! A connected stream client is reduced to a pseudonymous [`UserId`] derived
//! from its IP, user agent and the streaming server's session id. The raw
//! values are never stored.

use crate::hashing::sha256_hex_parts;
use crate::reaction::UserId;

/// Derive the stable pseudonymous identity of a connected client.
///
/// Deterministic and side-effect free: the same triple always yields the
/// same identity, distinct triples yield distinct identities with
/// overwhelming probability.
pub fn anonymize_listener(ip: &str, user_agent: &str, session_id: u64) -> UserId {
    let session = session_id.to_string();
    UserId::from_digest(sha256_hex_parts(&[
        ip.as_bytes(),
        user_agent.as_bytes(),
        session.as_bytes(),
    ]))
}
