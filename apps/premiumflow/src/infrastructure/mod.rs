//! Infrastructure Layer
//!
//! This module contains the adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `persistence/`: Transaction sources (in-memory, JSON file)

pub mod persistence;
