use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use serde_json::{json, Value};
use tracing::info;

use crate::error::Error;
use crate::names::SensorNames;
use crate::MEASUREMENT_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedTarget {
    pub panel: usize,
    pub measurement: String,
}

/// Splits `MijiaBridge_<mac>_<readingType>` into `(mac, readingType)`.
pub fn parse_measurement(measurement: &str) -> Option<(&str, &str)> {
    let rest = measurement
        .strip_prefix(MEASUREMENT_PREFIX)?
        .strip_prefix('_')?;

    let mut parts = rest.split('_');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(mac), Some(reading_type), None) => Some((mac, reading_type)),
        _ => None,
    }
}

pub fn sensor_target(mac: &str, reading_type: &str, name: &str) -> Value {
    json!({
        "alias": name,
        "groupBy": [
            {"params": ["$__interval"], "type": "time"},
            {"params": ["none"], "type": "fill"}
        ],
        "measurement": format!("{MEASUREMENT_PREFIX}_{mac}_{reading_type}"),
        "orderByTime": "ASC",
        "policy": "default",
        "resultFormat": "time_series",
        "select": [[
            {"params": ["value"], "type": "field"},
            {"params": [], "type": "mean"}
        ]],
        "tags": []
    })
}

/// Appends a target for every named sensor missing from panels that plot a
/// single reading type. Panels with no sensor targets, or with several
/// reading types, are not touched.
pub fn add_sensors_to_dashboard(
    model: &mut Value,
    names: &SensorNames,
) -> Result<Vec<AddedTarget>, Error> {
    let panels = model
        .get_mut("panels")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::UnexpectedShape {
            path: PathBuf::new(),
            reason: "dashboard has no panels array".to_owned(),
        })?;

    let mut panel_reading_types: Vec<BTreeSet<String>> = Vec::with_capacity(panels.len());
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for panel in panels.iter() {
        let mut reading_types = BTreeSet::new();
        for (mac, reading_type) in panel_sensors(panel) {
            reading_types.insert(reading_type.to_owned());
            seen.insert((mac.to_owned(), reading_type.to_owned()));
        }
        panel_reading_types.push(reading_types);
    }

    let mut added = Vec::new();

    for (panel_index, (panel, reading_types)) in
        panels.iter_mut().zip(panel_reading_types).enumerate()
    {
        let mut reading_types = reading_types.into_iter();
        let reading_type = match (reading_types.next(), reading_types.next()) {
            (Some(reading_type), None) => reading_type,
            _ => continue,
        };

        let Some(targets) = panel.get_mut("targets").and_then(Value::as_array_mut) else {
            continue;
        };

        for (mac, name) in names.iter() {
            if seen.contains(&(mac.to_owned(), reading_type.clone())) {
                continue;
            }

            info!("Adding {} {} {} to {}", mac, reading_type, name, panel_index);
            targets.push(sensor_target(mac, &reading_type, name));
            added.push(AddedTarget {
                panel: panel_index,
                measurement: format!("{MEASUREMENT_PREFIX}_{mac}_{reading_type}"),
            });
        }
    }

    Ok(added)
}

fn panel_sensors(panel: &Value) -> impl Iterator<Item = (&str, &str)> {
    panel
        .get("targets")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|target| target.get("measurement").and_then(Value::as_str))
        .filter_map(parse_measurement)
}
