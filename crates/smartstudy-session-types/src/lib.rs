//! Session types for the Study Smart Timer service.
//!
//! Provides the signed session/flow token validation, cookie builders, the
//! [`flow::PendingFlow`] continuation state carried between steps of a
//! multi-step login, and the [`identity::Identity`] extractor.

pub mod cookie;
pub mod flow;
pub mod identity;
pub mod token;
