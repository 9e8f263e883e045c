//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `toast`) so components depend on small
//! focused models. `storage` is the persistence seam behind `auth`.

pub mod auth;
pub mod storage;
pub mod toast;
