//! Repository modules for the attendance store.
//!
//! Each module adds methods to `AttendanceStore` via `impl AttendanceStore` blocks.

pub mod directory;
pub mod outbox;
pub mod session;
pub mod snapshot;
