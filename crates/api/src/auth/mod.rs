//! Session tokens, password hashing, and the session cookie.

pub mod cookie;
pub mod jwt;
pub mod password;
