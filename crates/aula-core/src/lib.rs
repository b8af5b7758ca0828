//! # aula-core
//!
//! Domain types and pure decision logic for Aula, the student welfare and
//! intervention tracking client.
//!
//! This crate performs no I/O. It provides:
//! - Status, priority, type, scope, and role enums with their wire values
//! - Entity structs for interventions, comments, students, and staff users
//! - The permission and status-transition engine
//! - Field validation for interventions, comments, students, and users
//! - Chilean RUT checksum helpers
//! - Display formatting and wire payload normalisation
//! - Client-side filtering, sorting, and paging of intervention lists

pub mod drafts;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod filter;
pub mod format;
pub mod limits;
pub mod permissions;
pub mod rut;
pub mod timestamps;
pub mod validation;
