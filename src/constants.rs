//! Shared crate-wide constants for linkstate.
//!
//! Centralizes magic values and default labels used across modules.

/// Default tool name. The default trash holding area is `~/.<tool_name>/trash`.
pub const DEFAULT_TOOL_NAME: &str = "linkstate";

/// Name of the holding directory below `~/.<tool_name>/`.
pub const TRASH_SUBDIR: &str = "trash";

/// Temporary filename suffix used while staging a symlink before the atomic rename.
/// The staged name is `.{fname}.{pid}.{ctr}{TMP_SUFFIX}`; e.g., `.vimrc.4242.0.linkstate.tmp`.
pub const TMP_SUFFIX: &str = ".linkstate.tmp";

/// UUIDv5 namespace tag for deterministic plan/action IDs.
pub const NS_TAG: &str = "https://linkstate.dev/plan";

/// Subsystem label attached to every emitted fact.
pub const SUBSYSTEM: &str = "linkstate";
