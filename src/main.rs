use mijia_configs::settings::Settings;
use mijia_configs::{generate_configs, Error};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{util::SubscriberInitExt, Layer};

fn main() -> ExitCode {
    config();

    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(x) => {
            error!("Failed to read settings: {}", x);
            return ExitCode::FAILURE;
        }
    };

    match generate_configs(&settings) {
        Ok(report) => {
            info!(
                grafana = ?report.grafana.as_ref().map(Vec::len),
                smarthome = ?report.smarthome.as_ref().map(Vec::len),
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(Error::MissingNamesInput) => {
            println!("{}", Error::MissingNamesInput);
            ExitCode::FAILURE
        }
        Err(x) => {
            error!(
                "Failure while generating configs (some outputs may have been written): {}",
                x
            );
            ExitCode::FAILURE
        }
    }
}

fn config() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::filter::LevelFilter::INFO),
        )
        .init();
}
