use crate::core::fees::{accumulate_fees, build_report};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{CheckoutRecord, FeeReport, CHECKOUT_COLUMNS, REPORT_HEADERS};
use crate::utils::error::{ReportError, Result};
use std::path::Path;

pub struct FeesPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> FeesPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn json_output_path(&self) -> String {
        Path::new(self.config.output_path())
            .with_extension("json")
            .to_string_lossy()
            .into_owned()
    }
}

fn column(row: &csv::StringRecord, row_number: usize, index: usize) -> Result<String> {
    row.get(index)
        .map(str::to_string)
        .ok_or_else(|| ReportError::MissingColumnError {
            row: row_number,
            column: CHECKOUT_COLUMNS[index].to_string(),
        })
}

fn to_checkout_record(row: &csv::StringRecord, row_number: usize) -> Result<CheckoutRecord> {
    Ok(CheckoutRecord {
        book_uid: column(row, row_number, 0)?,
        isbn_13: column(row, row_number, 1)?,
        patron_id: column(row, row_number, 2)?,
        date_checkout: column(row, row_number, 3)?,
        date_due: column(row, row_number, 4)?,
        date_returned: column(row, row_number, 5)?,
    })
}

impl<S: Storage, C: ConfigProvider> Pipeline for FeesPipeline<S, C> {
    fn extract(&self) -> Result<Vec<CheckoutRecord>> {
        tracing::debug!("Reading checkouts from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path())?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_slice());

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row?;
            let row_number = index + 1;

            if index == 0 && self.config.skip_first_row() {
                tracing::debug!("Discarding first row: {:?}", row);
                continue;
            }

            records.push(to_checkout_record(&row, row_number)?);
        }

        // An empty export still produces a header-only report instead of failing.
        if records.is_empty() {
            tracing::warn!("No checkout records found in {}", self.config.input_path());
        }

        Ok(records)
    }

    fn transform(&self, records: Vec<CheckoutRecord>) -> Result<FeeReport> {
        let (totals, late_records) = accumulate_fees(
            &records,
            self.config.daily_rate(),
            self.config.date_format(),
        )?;

        tracing::debug!(
            "{} patron(s), {} late record(s) out of {}",
            totals.len(),
            late_records,
            records.len()
        );

        Ok(build_report(&totals, records.len(), late_records))
    }

    fn load(&self, report: FeeReport) -> Result<String> {
        let output_path = self.config.output_path().to_string();
        let formats = self.config.output_formats();

        if formats.iter().any(|f| f == "csv") {
            let csv_data = {
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .terminator(csv::Terminator::CRLF)
                    .from_writer(Vec::new());
                writer.write_record(REPORT_HEADERS)?;
                for row in &report.patrons {
                    writer.serialize(row)?;
                }
                writer.into_inner().map_err(|e| ReportError::IoError(e.into_error()))?
            };

            tracing::debug!("Writing {} bytes to {}", csv_data.len(), output_path);
            self.storage.write_file(&output_path, &csv_data)?;
        }

        if formats.iter().any(|f| f == "json") {
            let json_path = self.json_output_path();
            let json_data = serde_json::to_string_pretty(&report)?;
            tracing::debug!("Writing JSON summary to {}", json_path);
            self.storage.write_file(&json_path, json_data.as_bytes())?;
        }

        Ok(output_path)
    }
}
