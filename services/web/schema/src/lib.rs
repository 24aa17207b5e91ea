//! sea-orm entities for the Study Smart Timer database.

pub mod otp_storage;
pub mod study_sessions;
pub mod users;
