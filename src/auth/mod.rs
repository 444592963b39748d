/// Authentication utilities
///
/// # Modules
///
/// - `password`: Argon2id password hashing and verification
/// - `token`: session-token (JWT) issuance
///
/// The session token is written to storage on login and removed on
/// logout; nothing in the system validates it on read. `token::inspect`
/// exists for callers that want to look inside anyway.
pub mod password;
pub mod token;
