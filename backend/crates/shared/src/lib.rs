//! Shared Kernel
//!
//! Vocabulary every crate in the gateway agrees on:
//! - The stable error taxonomy exposed to clients
//! - A unified error type and result alias
//! - Typed identifiers
//!
//! Only things whose meaning is identical across crates belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
