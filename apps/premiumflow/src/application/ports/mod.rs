//! Application Ports (Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod transaction_source_port;

pub use transaction_source_port::{TransactionQuery, TransactionSourceError, TransactionSourcePort};
