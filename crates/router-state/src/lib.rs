//! Stack state machine and action dispatch for the scene router
//!
//! This crate owns everything that changes during navigation: the router
//! state machine and its scene stacks, the action bus with its veto hooks,
//! and navigation state persistence.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bus;
pub mod machine;
pub mod persist;
