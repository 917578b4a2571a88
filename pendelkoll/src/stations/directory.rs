//! Station name lookup.

use std::collections::HashMap;

use crate::domain::StationCode;

/// Signatures and names along the Malmö – Kalmar / Karlskrona corridor.
const SMALAND_STATIONS: &[(&str, &str)] = &[
    ("Hie", "Hyllie"),
    ("Mc", "Malmö C"),
    ("Lu", "Lund C"),
    ("Hm", "Hässleholm"),
    ("Av", "Alvesta"),
    ("Vö", "Växjö"),
    ("Lo", "Lessebo"),
    ("Em", "Emmaboda"),
    ("Nyb", "Nybro"),
    ("Kac", "Kalmar C"),
    ("Ck", "Karlskrona C"),
    ("Rnb", "Ronneby"),
    ("Bkb", "Bräkne-Hoby"),
    ("Khn", "Karlshamn"),
];

/// Static station signature → display name mapping.
///
/// Unknown signatures fall back to the raw code, so a lookup never fails.
///
/// # Examples
///
/// ```
/// use pendelkoll::domain::StationCode;
/// use pendelkoll::stations::StationDirectory;
///
/// let directory = StationDirectory::smaland();
/// let em = StationCode::parse("Em").unwrap();
/// let xx = StationCode::parse("Xyz").unwrap();
///
/// assert_eq!(directory.name(&em), "Emmaboda");
/// assert_eq!(directory.name(&xx), "Xyz");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    names: HashMap<StationCode, String>,
}

impl StationDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in directory for the Småland commuter corridor.
    pub fn smaland() -> Self {
        let mut directory = Self::new();
        for (code, name) in SMALAND_STATIONS {
            directory.insert_raw(code, name);
        }
        directory
    }

    /// Add or replace a name.
    pub fn insert(&mut self, code: StationCode, name: impl Into<String>) {
        self.names.insert(code, name.into());
    }

    /// Add or replace entries from another mapping.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (StationCode, String)>) {
        self.names.extend(entries);
    }

    /// Display name for a station, or the raw code if unknown.
    pub fn name(&self, code: &StationCode) -> String {
        self.get(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string())
    }

    /// Display name if the station is known.
    pub fn get(&self, code: &StationCode) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Returns the number of known stations.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no stations are known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn insert_raw(&mut self, code: &str, name: &str) {
        if let Ok(code) = StationCode::parse(code) {
            self.names.insert(code, name.to_string());
        }
    }
}

impl FromIterator<(StationCode, String)> for StationDirectory {
    fn from_iter<I: IntoIterator<Item = (StationCode, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
