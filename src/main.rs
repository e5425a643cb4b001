use clap::Parser;
use salary_stats::adapters::http::build_client;
use salary_stats::utils::logger;
use salary_stats::{build_sources, CliConfig, StatisticsEngine, StatsError};

fn report_error(context: &str, e: &StatsError) {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = CliConfig::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting salary-stats");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            report_error("Configuration failed", &e);
            std::process::exit(1);
        }
    };

    let client = build_client()?;
    let sources = build_sources(&config, &client);
    if sources.is_empty() {
        tracing::warn!("Both job boards are disabled, nothing to do");
        return Ok(());
    }

    let engine = StatisticsEngine::new(config.search.clone());
    let outcome = engine.run_sources(&sources).await;
    for failure in &outcome.failures {
        report_error(&format!("{} failed", failure.source_name), &failure.error);
    }

    let mut worst = outcome.worst_severity();
    match outcome.render(config.format) {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => tracing::info!("No source produced statistics, nothing to print"),
        Err(e) => {
            report_error("Rendering the report failed", &e);
            worst = worst.max(Some(e.severity()));
        }
    }

    if let Some(severity) = worst {
        std::process::exit(severity.exit_code());
    }

    tracing::info!("✅ Done");
    Ok(())
}
