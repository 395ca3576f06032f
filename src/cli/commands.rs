pub mod project;
pub mod serve;

pub use project::{ProjectOptions, project};
pub use serve::serve;
