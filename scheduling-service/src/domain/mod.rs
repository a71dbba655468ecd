pub mod constraints;
pub mod entities;
pub mod fairness;
pub mod orchestrator;
pub mod repository;
pub mod shift_types;
