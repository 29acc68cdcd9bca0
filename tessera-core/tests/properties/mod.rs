//! Property test modules

mod edit_mode_tests;
mod editability_tests;
mod hover_tests;
mod reorder_tests;
mod subscription_tests;
mod tree_path_tests;
