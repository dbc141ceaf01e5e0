//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{
    AuthOutcome, AuthService, AuthServiceConfig, Authenticator, DevCodes, RegisterInput,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use token::{IssuedToken, TokenService, TokenServiceConfig};
pub use verification::{
    IssueResult, NotificationDispatcher, VerificationService, VerificationServiceConfig,
    VerificationStatus,
};
