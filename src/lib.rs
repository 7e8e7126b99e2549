pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::FeeConfig, ReportSettings};
pub use crate::core::{
    etl::{fees_report, ReportEngine},
    pipeline::FeesPipeline,
};
pub use domain::model::{CheckoutRecord, FeeReport, FeeReportRow, PatronFeeTotals};
pub use utils::dates::{add_date_range, date_range, date_range_from_json, reformat_dates};
pub use utils::error::{ReportError, Result};
