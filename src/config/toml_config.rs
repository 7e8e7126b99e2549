use crate::core::fees::{DEFAULT_DAILY_RATE, DEFAULT_DATE_FORMAT};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative_amount, validate_one_of, Validate,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

/// Report settings read from a TOML file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    pub fees: FeesSection,
    pub input: InputSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeesSection {
    pub daily_rate: Decimal,
}

impl Default for FeesSection {
    fn default() -> Self {
        Self {
            daily_rate: DEFAULT_DAILY_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    pub date_format: String,
    /// The checkout export's first row is dropped unless this is turned off.
    pub skip_first_row: bool,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            skip_first_row: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub formats: Vec<String>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            formats: vec!["csv".to_string()],
        }
    }
}

impl FeeConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LATE_FEE_RATE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for FeeConfig {
    fn validate(&self) -> Result<()> {
        validate_non_negative_amount("fees.daily_rate", self.fees.daily_rate)?;
        validate_non_empty_string("input.date_format", &self.input.date_format)?;
        validate_one_of("output.formats", &self.output.formats, &OUTPUT_FORMATS)?;

        if self.output.formats.is_empty() {
            return Err(ReportError::ConfigValidationError {
                field: "output.formats".to_string(),
                message: "At least one output format is required".to_string(),
            });
        }

        Ok(())
    }
}
