// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! PremiumFlow - Rust Core Library
//!
//! Reconstructs option positions from normalized brokerage transactions and
//! rolls realized cash flow into period reports.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, pure services)
//!   - `option_transaction`: Normalized fills, contract keys, validation, ordering
//!   - `leg_matching`: FIFO matcher, matched legs and lots
//!   - `cash_flow`: Period keys, metrics, report aggregation
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `TransactionSourcePort`
//!   - `use_cases`: `MatchLegs`, `CashFlowReport`
//!   - `dto`: Request and rendered output types
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: In-memory and JSON-file transaction sources

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration with environment interpolation.
pub mod config;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::cash_flow::{
    AssignmentHandling, CashFlowPnlReport, PeriodKey, PeriodMetrics, PeriodType, ReportError,
    ReportOptions, generate_cash_flow_pnl_report, generate_cash_flow_pnl_report_with_legs,
    generate_cash_flow_pnl_report_with_options,
};
pub use domain::leg_matching::{
    LegStatus, LotResolution, MatchedLeg, MatchedLegLot, MatchingError, match_legs,
};
pub use domain::option_transaction::{
    ActionCode, ContractKey, NormalizedOptionTransaction, OptionType, PositionSide,
    TransactionError,
};
pub use domain::shared::{Money, Symbol};

// Application re-exports
pub use application::ports::{TransactionQuery, TransactionSourceError, TransactionSourcePort};
pub use application::use_cases::{CashFlowReportUseCase, MatchLegsUseCase, UseCaseError};

// Infrastructure re-exports
pub use infrastructure::persistence::{InMemoryTransactionRepository, JsonFileTransactionSource};
