use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::astro::GeoPoint;
use crate::data::DataError;

/// Column where the free-text observer name starts
const NAME_COLUMN: usize = 38;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    pub id: u32,
    pub abbrev: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
    pub name: String,
}

impl Site {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }

    /// Parse `id abbrev latitude longitude altitude_m name`
    fn parse(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            return Err(format!("expected at least 5 fields, got {}", fields.len()));
        }

        let number = |i: usize| {
            fields[i]
                .parse::<f64>()
                .map_err(|e| format!("field {} ({:?}): {e}", i + 1, fields[i]))
        };
        let id = fields[0]
            .parse()
            .map_err(|e| format!("site id {:?}: {e}", fields[0]))?;

        let name = line
            .get(NAME_COLUMN..)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fields[5..].join(" "));

        Ok(Site {
            id,
            abbrev: fields[1].to_string(),
            latitude: number(2)?,
            longitude: number(3)?,
            altitude_km: number(4)? / 1000.0,
            name,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SiteTable {
    pub sites: Vec<Site>,
}

impl SiteTable {
    /// Lines containing `#` are comments. Malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut sites = Vec::new();

        for (index, line) in text.lines().enumerate() {
            if line.contains('#') || line.trim().is_empty() {
                continue;
            }
            match Site::parse(line) {
                Ok(site) => sites.push(site),
                Err(message) => log::warn!(
                    "Skipping site: {}",
                    DataError::Parse {
                        line: index + 1,
                        message
                    }
                ),
            }
        }

        Self { sites }
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        let table = Self::parse(&text);
        log::debug!("Loaded {} sites from {}", table.sites.len(), path.display());
        Ok(table)
    }

    /// Last entry with the given id
    pub fn find(&self, id: u32) -> Option<&Site> {
        self.sites.iter().rev().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }
}
