use std::path::{Path, PathBuf};

use crate::error::Error;

/// Sensor MAC addresses (colons removed) mapped to display names, in file order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SensorNames {
    entries: Vec<(String, String)>,
}

impl SensorNames {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        Self::parse(&text).map_err(|e| e.with_path(path))
    }

    /// Parses `MAC=name` lines. Colons anywhere on the line are dropped, so
    /// `AA:BB:CC:DD:EE:FF=Kitchen` and `AABBCCDDEEFF=Kitchen` are equivalent.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut names = SensorNames::default();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.replace(':', "");
            let mut parts = line.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(mac), Some(name), None) => names.insert(mac, name),
                _ => {
                    return Err(Error::MalformedNameLine {
                        path: PathBuf::new(),
                        line_number: index + 1,
                        line: raw.to_owned(),
                    })
                }
            }
        }

        Ok(names)
    }

    fn insert(&mut self, mac: &str, name: &str) {
        match self.entries.iter_mut().find(|(existing, _)| existing == mac) {
            Some(entry) => entry.1 = name.to_owned(),
            None => self.entries.push((mac.to_owned(), name.to_owned())),
        }
    }

    pub fn get(&self, mac: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == mac)
            .map(|(_, name)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(mac, name)| (mac.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for SensorNames {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut names = SensorNames::default();
        iter.into_iter()
            .for_each(|(mac, name)| names.insert(mac, name));
        names
    }
}
