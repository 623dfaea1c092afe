pub mod certification_request;
pub mod role;
pub mod user;

pub use certification_request::{
    CertificationRequest, Status, ValidationError, validate_submission,
};
pub use role::Role;
pub use user::User;
