pub mod trash;

pub use trash::dir::DirTrash;
pub use trash::Trash;
