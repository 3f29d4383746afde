// src/core/mod.rs

pub mod parser;
pub mod scoring;
