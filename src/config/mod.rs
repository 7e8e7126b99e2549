pub mod cli;
pub mod toml_config;

use crate::core::fees::{DEFAULT_DAILY_RATE, DEFAULT_DATE_FORMAT};
use crate::core::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{validate_path, Validate};
use rust_decimal::Decimal;
use std::path::Path;
use toml_config::FeeConfig;

/// Everything one report run needs: the two paths plus the fee settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub input_path: String,
    pub output_path: String,
    pub daily_rate: Decimal,
    pub date_format: String,
    pub skip_first_row: bool,
    pub output_formats: Vec<String>,
}

impl ReportSettings {
    pub fn new(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            daily_rate: DEFAULT_DAILY_RATE,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            skip_first_row: true,
            output_formats: vec!["csv".to_string()],
        }
    }

    pub fn from_fee_config(
        input_path: impl Into<String>,
        output_path: impl Into<String>,
        config: FeeConfig,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            daily_rate: config.fees.daily_rate,
            date_format: config.input.date_format,
            skip_first_row: config.input.skip_first_row,
            output_formats: config.output.formats,
        }
    }
}

impl ConfigProvider for ReportSettings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }

    fn date_format(&self) -> &str {
        &self.date_format
    }

    fn skip_first_row(&self) -> bool {
        self.skip_first_row
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }
}

impl Validate for ReportSettings {
    fn validate(&self) -> Result<()> {
        validate_path("input_path", &self.input_path)?;
        validate_path("output_path", &self.output_path)?;

        let writes_both = ["csv", "json"]
            .iter()
            .all(|format| self.output_formats.iter().any(|f| f == format));
        let json_named = Path::new(&self.output_path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if writes_both && json_named {
            return Err(ReportError::InvalidConfigValueError {
                field: "output_path".to_string(),
                value: self.output_path.clone(),
                reason: "The JSON summary would overwrite the CSV report; use a .csv output path"
                    .to_string(),
            });
        }

        FeeConfig {
            fees: toml_config::FeesSection {
                daily_rate: self.daily_rate,
            },
            input: toml_config::InputSection {
                date_format: self.date_format.clone(),
                skip_first_row: self.skip_first_row,
            },
            output: toml_config::OutputSection {
                formats: self.output_formats.clone(),
            },
        }
        .validate()
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "late-fees")]
#[command(about = "Computes late-return fees per patron from a library checkout CSV")]
pub struct CliConfig {
    /// Checkout export to read
    pub input_path: String,

    /// Where to write the patron_id,late_fees report
    pub output_path: String,

    /// Optional TOML file with fee, input and output settings
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_log: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn into_settings(self) -> Result<ReportSettings> {
        let fee_config = match &self.config {
            Some(path) => FeeConfig::from_file(path)?,
            None => FeeConfig::default(),
        };

        Ok(ReportSettings::from_fee_config(
            self.input_path,
            self.output_path,
            fee_config,
        ))
    }
}
