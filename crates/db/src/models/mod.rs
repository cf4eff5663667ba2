//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Ledger entry types live in `history`; they have insert structs instead
//! of update DTOs because ledger rows are append-only.

pub mod crew;
pub mod history;
pub mod member;
pub mod project;
pub mod reclamation;
pub mod snapshot;
