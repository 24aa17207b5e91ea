pub mod login;
pub mod oauth;
pub mod otp;
pub mod profile;
pub mod register;
pub mod session;
pub mod study;
