use crate::config::cli::LocalStorage;
use crate::config::ReportSettings;
use crate::core::pipeline::FeesPipeline;
use crate::core::{FeeReport, Pipeline};
use crate::utils::error::Result;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        self.run_with_report().map(|(output_path, _)| output_path)
    }

    /// Same as [`run`](Self::run), also handing back the computed report.
    pub fn run_with_report(&self) -> Result<(String, FeeReport)> {
        tracing::info!("Starting fee report...");

        // Extract
        let records = self.pipeline.extract()?;
        tracing::info!("Extracted {} checkout records", records.len());

        // Transform
        let report = self.pipeline.transform(records)?;
        tracing::info!(
            "Computed fees for {} patrons ({} late returns, {} total)",
            report.patrons.len(),
            report.late_records,
            report.total_fees
        );

        // Load: nothing is written until every record has been processed
        let output_path = self.pipeline.load(report.clone())?;
        tracing::info!("Report saved to: {}", output_path);

        Ok((output_path, report))
    }
}

/// Runs the report on local files with the default settings: 0.25 per day,
/// `MM/DD/YYYY` dates, first row discarded, CSV output only.
pub fn fees_report(infile: &str, outfile: &str) -> Result<FeeReport> {
    let settings = ReportSettings::new(infile, outfile);
    let engine = ReportEngine::new(FeesPipeline::new(LocalStorage::default(), settings));

    engine.run_with_report().map(|(_, report)| report)
}
