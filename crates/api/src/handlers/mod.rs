pub mod admin;
pub mod audit;
pub mod auth;
pub mod cases;
pub mod communications;
pub mod dashboard;
pub mod documents;
pub mod legal;
pub mod regulatory;
pub mod reports;
pub mod risk;
pub mod verification;
pub mod workflow;
