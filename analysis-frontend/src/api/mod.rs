//! Typed bindings for the remote analysis API, one module per domain.
pub mod audit;
pub mod auth;
pub mod budgets;
pub mod comparison;
pub mod cvp;
pub mod dashboard;
pub mod expenses;
pub mod kpi;
pub mod orders;
pub mod reports;
pub mod stores;
