// ClassSplit partitioning engine

pub mod engine;
pub mod render;

pub use engine::PartitionEngine;
pub use render::{render, render_json, render_text, OutputFormat};
