//! Domain logic for fraud case management. No IO.

pub mod audit;
pub mod case_id;
pub mod communication;
pub mod error;
pub mod hashing;
pub mod identity;
pub mod legal;
pub mod regulatory;
pub mod risk;
pub mod roles;
pub mod types;
pub mod workflow;
