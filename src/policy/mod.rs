//! Caller policy for reconciling a path.
//!
//! A [`LinkPolicy`](crate::policy::LinkPolicy) states which structural changes
//! the planner may schedule. Anything it forbids surfaces as a `412` outcome
//! and leaves the filesystem untouched.

pub mod config;

pub use config::LinkPolicy;
