use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::Error;
use crate::names::SensorNames;
use crate::MEASUREMENT_PREFIX;

pub const ITEMS_FILE_NAME: &str = "org.eclipse.smarthome.core.items.Item.json";

const PERSISTED_ITEM_CLASS: &str =
    "org.eclipse.smarthome.core.items.ManagedItemProvider$PersistedItem";

/// Number items created under every sensor group, as (key suffix, label suffix).
pub const READINGS: [(&str, &str); 3] = [
    ("Temperature", "temperature"),
    ("Humidity", "humidity"),
    ("BatteryLevel", "battery level"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedItem {
    pub class: String,
    pub value: ItemValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemValue {
    pub group_names: Vec<String>,
    pub item_type: String,
    pub tags: Vec<String>,
    pub label: String,
}

impl PersistedItem {
    pub fn group(name: &str) -> Self {
        Self::new(MEASUREMENT_PREFIX.to_owned(), "Group", format!("{name} sensor"))
    }

    pub fn number(mac: &str, name: &str, label_suffix: &str) -> Self {
        Self::new(group_key(mac), "Number", format!("{name} {label_suffix}"))
    }

    fn new(group: String, item_type: &str, label: String) -> Self {
        Self {
            class: PERSISTED_ITEM_CLASS.to_owned(),
            value: ItemValue {
                group_names: vec![group],
                item_type: item_type.to_owned(),
                tags: Vec::new(),
                label,
            },
        }
    }
}

impl From<PersistedItem> for Value {
    fn from(item: PersistedItem) -> Self {
        json!({
            "class": item.class,
            "value": {
                "groupNames": item.value.group_names,
                "itemType": item.value.item_type,
                "tags": item.value.tags,
                "label": item.value.label,
            }
        })
    }
}

pub fn group_key(mac: &str) -> String {
    format!("{MEASUREMENT_PREFIX}_{mac}")
}

pub fn number_key(mac: &str, key_suffix: &str) -> String {
    format!("{MEASUREMENT_PREFIX}_{mac}_{key_suffix}")
}

/// Makes sure every named sensor has a group item and one number item per
/// reading. Existing group items are kept as they are; an existing number item
/// must match the generated one exactly or the whole run is refused.
///
/// Returns the keys that were created, in creation order.
pub fn add_sensors_to_items(model: &mut Value, names: &SensorNames) -> Result<Vec<String>, Error> {
    let items = model.as_object_mut().ok_or_else(|| Error::UnexpectedShape {
        path: PathBuf::new(),
        reason: "item database is not a JSON object".to_owned(),
    })?;

    let mut added = Vec::new();

    for (mac, name) in names.iter() {
        let key = group_key(mac);
        if !items.contains_key(&key) {
            info!("adding {} => {}", key, name);
            items.insert(key.clone(), PersistedItem::group(name).into());
            added.push(key);
        }

        for (key_suffix, label_suffix) in READINGS {
            let key = number_key(mac, key_suffix);
            let expected: Value = PersistedItem::number(mac, name, label_suffix).into();

            match items.get(&key) {
                None => {
                    info!("adding {} => {}", key, name);
                    items.insert(key.clone(), expected);
                    added.push(key);
                }
                Some(actual) if *actual == expected => {}
                Some(actual) => {
                    return Err(Error::ItemConflict {
                        key,
                        expected,
                        actual: actual.clone(),
                    })
                }
            }
        }
    }

    Ok(added)
}
