use std::fs;
use std::path::Path;

use crate::astro::{GeoPoint, EARTH_RADIUS_KM};
use crate::data::DataError;
use crate::geometry::{near_side_paths, Point2, ViewOrientation};

/// Latitude value marking a break between coastline segments
pub const PEN_UP_LATITUDE: f64 = 9999.0;

/// Coastline polylines. `None` separates segments.
#[derive(Debug, Clone, Default)]
pub struct GlobeOutline {
    pub points: Vec<Option<GeoPoint>>,
}

impl GlobeOutline {
    /// Parse `latitude longitude` pairs, one per line.
    pub fn parse(text: &str) -> Result<Self, DataError> {
        let mut points = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace().map(str::parse::<f64>);
            let (Some(Ok(latitude)), Some(Ok(longitude))) = (fields.next(), fields.next()) else {
                return Err(DataError::Parse {
                    line: index + 1,
                    message: format!("expected `latitude longitude`, got {line:?}"),
                });
            };

            if latitude == PEN_UP_LATITUDE {
                points.push(None);
            } else {
                points.push(Some(GeoPoint::new(longitude, latitude)));
            }
        }

        Ok(Self { points })
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        let outline = Self::parse(&text)?;
        log::debug!(
            "Loaded {} globe points from {}",
            outline.points.len(),
            path.display()
        );
        Ok(outline)
    }

    /// Near-side polylines in the given view
    pub fn paths(&self, view: &ViewOrientation) -> Vec<Vec<Point2>> {
        self.points
            .split(Option::is_none)
            .flat_map(|segment| {
                near_side_paths(
                    segment
                        .iter()
                        .flatten()
                        .map(|p| view.project_geographic(*p, EARTH_RADIUS_KM)),
                )
            })
            .collect()
    }
}
