//! Value Object Module

pub mod account_id;
pub mod email;
pub mod password;
pub mod session_token;
