//! # roll-core
//!
//! Core types and validation shared across all Rollcall crates.
//!
//! This crate provides:
//! - Entity structs for lecture sessions, attendance records, and directory data
//! - Role and propagation status enums with their SQL string forms
//! - The inbound submission payload and its shape validation
//! - Eligibility facts and batches handed to the eligibility subsystem
//! - The read-side attendance snapshot served to edge devices

pub mod entities;
pub mod enums;
pub mod errors;
pub mod snapshot;
pub mod submission;
