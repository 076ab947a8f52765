#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # addrmap-entities
//!
//! Reusable, agnostic domain entities for addrmap.
//!
//! The entities only contain generic functionality that does not reveal any
//! widget-specific business logic.

pub mod access;
pub mod field;
pub mod geo;
pub mod id;
pub mod marker;
pub mod mode;
pub mod record;
pub mod value;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
