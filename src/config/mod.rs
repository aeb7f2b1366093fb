// src/config/mod.rs

pub mod parameters;
