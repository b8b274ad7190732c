pub mod config;
pub mod line;
pub mod tree;

pub use config::*;
pub use line::*;
pub use tree::*;
