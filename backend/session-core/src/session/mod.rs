//! Session state management.
//!
//! Holds the single authoritative copy of the client's session: access
//! token, refresh token, derived authenticated flag and the user profile.
//!
//! # Architecture
//!
//! - [`SessionState`] is an immutable value; [`SessionAction`] is the closed
//!   set of transitions applied to it by a pure reducer.
//! - [`SessionStore`] owns the current value and swaps in whole new states,
//!   so readers never observe a half-applied transition.
//! - Store handles are `Clone` and injected explicitly into the components
//!   that need them.

pub mod state;
pub mod store;

pub use state::{SessionAction, SessionState, User};
pub use store::{SessionSnapshot, SessionStore};
