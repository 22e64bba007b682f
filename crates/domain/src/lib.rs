//! Domain layer for the Rent Manager backend.
//!
//! This crate contains:
//! - Domain models (Property, Tenant, Lease, Payment, reminder types)
//! - Billing-period and reminder-classification logic
//! - Channel sender abstractions

pub mod models;
pub mod services;
