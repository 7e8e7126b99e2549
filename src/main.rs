use clap::Parser;
use late_fees::utils::{logger, validation::Validate};
use late_fees::{CliConfig, FeesPipeline, LocalStorage, ReportEngine};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_log {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting late-fees report");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入並驗證配置
    let settings = match config.into_settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let pipeline = FeesPipeline::new(LocalStorage::default(), settings);
    let engine = ReportEngine::new(pipeline);

    match engine.run() {
        Ok(output_path) => {
            println!("✅ Fee report written to {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Fee report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }
}
