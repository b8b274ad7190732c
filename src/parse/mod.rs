pub mod line_classifier;
pub mod tree_builder;

pub use line_classifier::classify_line;
pub use tree_builder::build_tree;
