pub mod atomic;
pub mod probe;

pub use atomic::{open_parent_dir, symlink_swap, unlink_entry};
pub use probe::{inspect, ProbeResult};
