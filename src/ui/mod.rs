// src/ui/mod.rs

pub mod draw;
pub mod help;
