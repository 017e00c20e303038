//! Cash Flow Domain Services

mod aggregator;

pub use aggregator::{
    generate_cash_flow_pnl_report, generate_cash_flow_pnl_report_with_legs,
    generate_cash_flow_pnl_report_with_options,
};
