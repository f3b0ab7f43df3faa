//! Client-side session state.
//!
//! DESIGN
//! ======
//! `roles` turns the caller's project memberships into the permissions the
//! billing UI checks; `session` owns the mutable session record and the
//! login/logout flow around it.

pub mod roles;
pub mod session;
