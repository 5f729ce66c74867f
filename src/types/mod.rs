pub mod desired;
pub mod errors;
pub mod ids;
pub mod linkpath;
pub mod plan;
pub mod report;

pub use desired::*;
pub use errors::*;
pub use ids::*;
pub use linkpath::*;
pub use plan::*;
pub use report::*;
