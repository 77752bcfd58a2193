//! File I/O around the pipeline: CSV loading and series export.

pub mod export;
pub mod load;
