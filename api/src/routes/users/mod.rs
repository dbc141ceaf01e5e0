//! User route handlers for email verification

pub mod email_verification_status;
pub mod send_email_verification;
pub mod verify_email;

pub use email_verification_status::email_verification_status;
pub use send_email_verification::send_email_verification;
pub use verify_email::{verify_email, verify_email_link};
