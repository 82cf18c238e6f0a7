pub mod analyzer;
pub mod panels;
pub mod plot;
