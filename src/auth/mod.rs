//! Authentication module for QuickChat.
//!
//! This module provides credential validation, password hashing, and the
//! single-account register/login flow that gates the messaging core.

mod credentials;
mod password;
pub mod validation;

pub use credentials::{login_status_message, Login, RegistrationOutcome, REGISTRATION_SUCCESS};
pub use password::{hash_password, verify_password, PasswordError};
pub use validation::ValidationError;
