//! Infrastructure layer: concrete implementations of the domain trait seams
//! plus the wire-level DTOs.

pub mod broadcaster;
pub mod dto;
pub mod registry;
