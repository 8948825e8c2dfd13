//! Route handlers of the demo application.

pub mod callback;
pub mod home;
pub mod idp;
