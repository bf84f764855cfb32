use std::path::Path;

use grafana::{add_sensors_to_dashboard, AddedTarget};
use names::SensorNames;
use serde_json::Value;
use settings::Settings;
use smarthome::{add_sensors_to_items, ITEMS_FILE_NAME};
use tracing::{debug, info};

pub mod error;
pub mod grafana;
pub mod names;
pub mod settings;
pub mod smarthome;

pub use error::Error;

/// Prefix shared by dashboard measurements and SmartHome item keys.
pub const MEASUREMENT_PREFIX: &str = "MijiaBridge";

/// What a run added. A system that was not configured is `None`.
#[derive(Debug, Default)]
pub struct Report {
    pub grafana: Option<Vec<AddedTarget>>,
    pub smarthome: Option<Vec<String>>,
}

pub fn generate_configs(settings: &Settings) -> Result<Report, Error> {
    let names_path = settings
        .names
        .input
        .as_deref()
        .ok_or(Error::MissingNamesInput)?;
    let names = SensorNames::from_file(names_path)?;
    info!("Loaded {} sensor names from {}", names.len(), names_path.display());

    let mut report = Report::default();

    match settings.grafana.paths() {
        Some((input, output)) => {
            report.grafana = Some(add_named_sensors_to_grafana(&names, input, output)?);
        }
        None => debug!("Grafana input and output not both set, skipping"),
    }

    match settings.smarthome.jsondb.paths() {
        Some((input, output)) => {
            std::fs::create_dir_all(output).map_err(|e| Error::io(output, e))?;
            report.smarthome = Some(add_named_sensors_to_smarthome(
                &names,
                &input.join(ITEMS_FILE_NAME),
                &output.join(ITEMS_FILE_NAME),
            )?);
        }
        None => debug!("SmartHome jsondb input and output not both set, skipping"),
    }

    Ok(report)
}

pub fn add_named_sensors_to_grafana(
    names: &SensorNames,
    input: &Path,
    output: &Path,
) -> Result<Vec<AddedTarget>, Error> {
    let mut model = read_json(input)?;
    let added = add_sensors_to_dashboard(&mut model, names).map_err(|e| e.with_path(input))?;
    write_json(output, &model)?;

    Ok(added)
}

pub fn add_named_sensors_to_smarthome(
    names: &SensorNames,
    input: &Path,
    output: &Path,
) -> Result<Vec<String>, Error> {
    let mut model = read_json(input)?;
    let added = add_sensors_to_items(&mut model, names).map_err(|e| e.with_path(input))?;
    write_json(output, &model)?;

    Ok(added)
}

fn read_json(path: &Path) -> Result<Value, Error> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.to_owned(),
        source,
    })
}

fn write_json(path: &Path, model: &Value) -> Result<(), Error> {
    let mut text = serde_json::to_string_pretty(model).map_err(|source| Error::Json {
        path: path.to_owned(),
        source,
    })?;
    text.push('\n');

    std::fs::write(path, text).map_err(|e| Error::io(path, e))?;
    info!("Wrote {}", path.display());

    Ok(())
}
