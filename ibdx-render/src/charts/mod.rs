//! Chart kinds

pub mod bar;
pub mod heatmap;
pub mod scatter;
pub mod table;
