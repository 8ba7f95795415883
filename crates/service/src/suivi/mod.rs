//! Tracking records (`suivi`): repository seam and application service.
pub mod memory;
pub mod repository;
pub mod service;
