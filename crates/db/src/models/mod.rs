//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the table row and the `Deserialize` DTOs used to insert or patch it.

pub mod assignment;
pub mod audit;
pub mod case;
pub mod comment;
pub mod dashboard;
pub mod document;
pub mod finding;
pub mod legal_notice;
pub mod regulatory_report;
pub mod user;
pub mod verification;
