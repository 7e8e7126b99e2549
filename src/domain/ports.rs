use crate::domain::model::{CheckoutRecord, FeeReport};
use crate::utils::error::Result;
use rust_decimal::Decimal;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn daily_rate(&self) -> Decimal;
    fn date_format(&self) -> &str;
    fn skip_first_row(&self) -> bool;
    fn output_formats(&self) -> &[String];
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<CheckoutRecord>>;
    fn transform(&self, records: Vec<CheckoutRecord>) -> Result<FeeReport>;
    fn load(&self, report: FeeReport) -> Result<String>;
}
