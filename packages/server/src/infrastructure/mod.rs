//! Infrastructure layer: concrete stores and wire formats.

pub mod dto;
pub mod registry;
pub mod repository;
