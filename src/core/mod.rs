pub mod etl;
pub mod fees;
pub mod pipeline;

pub use crate::domain::model::{CheckoutRecord, FeeReport, FeeReportRow, PatronFeeTotals};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
