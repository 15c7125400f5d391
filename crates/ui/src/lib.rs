pub mod render;
pub mod views;
pub mod vm;

pub use render::{render_home, render_question, render_restart, render_results};
