pub mod handlers;
pub mod jwt;
pub mod password;
