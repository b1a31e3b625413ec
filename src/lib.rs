//! The authentication and session store behind Skill Demand Pulse.
//!
//! A [`SessionStore`] holds at most one logged-in [`User`], saves every
//! change through a [`storage::SessionStorage`], and tells subscribers about
//! it.
//!
//! ```rust
//! use skillpulse_session::{storage::MemoryStorage, views::View, SessionStore};
//!
//! let mut store = SessionStore::new(MemoryStorage::new());
//! assert!(store.login("admin@skillpulse.com", "admin123"));
//! assert!(store.session().can_view(View::Admin));
//!
//! store.logout();
//! assert!(store.current_user().is_none());
//! ```

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod credentials;
pub mod forms;
mod id;
mod session;
pub mod storage;
mod store;
mod user;
pub mod views;

pub use id::UserId;
pub use session::Session;
pub use store::{SessionStore, Subscription};
pub use user::{Role, User};

use std::error::Error;

/// Render an error and all of its causes on a single line.
pub fn error_chain(err: &dyn Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }

    msg
}
