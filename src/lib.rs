#![forbid(unsafe_code)]
//! linkstate: declarative, reversible symlink management.
//!
//! Safety model highlights:
//! - Every change is planned first: the planner compares the probed state of a
//!   path with the desired one and returns a do list plus the undo list that
//!   reverses it.
//! - Real files and directories are never deleted. They are moved into a trash
//!   holding area, and only when the policy allows it.
//! - Link creation follows a TOCTOU-safe sequence using directory handles (open
//!   parent O_DIRECTORY|O_NOFOLLOW → symlinkat tmp → renameat → fsync(parent)).
//! - This crate forbids `unsafe` and uses `rustix` for syscalls.

pub mod adapters;
pub mod api;
pub mod config;
pub mod constants;
pub mod fs;
pub mod logging;
pub mod policy;
pub mod steps;
pub mod types;

pub use api::*;
pub use config::Config;
pub use policy::LinkPolicy;
pub use types::{Action, ActionPlan, ApplyMode, Decision, DesiredState, Outcome, Status};
