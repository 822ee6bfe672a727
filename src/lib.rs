//! Regnal Names - dynastic name resolution for simulated populations

pub mod core;
pub mod names;
pub mod world;
