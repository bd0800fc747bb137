//! Core domain model for Sensor Tower monthly download reports.
//!
//! This crate holds everything that does not touch the network: the report
//! month, the resolved run configuration, the fetched-data types, and the
//! assembler that merges them into report rows.

pub mod assemble;
pub mod config;
pub mod error;
pub mod month;
pub mod types;

pub use assemble::assemble_report;
pub use config::ReportConfig;
pub use error::{Error, Result};
pub use month::ReportMonth;
pub use types::{
    AppAllTimeSales, AppMetadata, AppSalesDelta, MonthlySales, PublisherMetadata, ReportRow,
    UNKNOWN,
};
