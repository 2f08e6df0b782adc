use std::fs;
use std::path::Path;
use std::vec::IntoIter;

use sgp4::Elements;

use crate::predict::error::PredictError;

/// One parsed two-line element set
#[derive(Debug, Clone)]
pub struct ElementSet {
    pub name: String,
    pub norad_id: u64,
    pub elements: Elements,
}

/// Sequential reader over the element sets in a TLE text.
///
/// Yields one `Result` per record so that a malformed record can be
/// skipped without ending the stream. Exhausting the text ends iteration.
pub struct TleReader {
    records: IntoIter<(Option<String>, String, String)>,
    satno: Option<u64>,
}

impl TleReader {
    pub fn new(content: &str) -> Self {
        Self {
            records: split_records(content).into_iter(),
            satno: None,
        }
    }

    pub fn open(path: &Path) -> Result<Self, PredictError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::new(&content))
    }

    /// Only yield the element set with this NORAD id; `0` keeps all.
    pub fn with_satno(mut self, satno: u64) -> Self {
        self.satno = (satno != 0).then_some(satno);
        self
    }
}

impl Iterator for TleReader {
    type Item = Result<ElementSet, PredictError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (name, line1, line2) = self.records.next()?;

            if let Some(satno) = self.satno {
                if catalog_number(&line1) != Some(satno) {
                    continue;
                }
            }

            return Some(parse_record(name, &line1, &line2));
        }
    }
}

fn parse_record(name: Option<String>, line1: &str, line2: &str) -> Result<ElementSet, PredictError> {
    let elements =
        Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes()).map_err(|e| {
            PredictError::InvalidTle {
                name: name
                    .clone()
                    .unwrap_or_else(|| line1.get(2..7).unwrap_or(line1).trim().to_string()),
                message: e.to_string(),
            }
        })?;

    let norad_id = elements.norad_id;
    Ok(ElementSet {
        name: name.unwrap_or_else(|| format!("NORAD {}", norad_id)),
        norad_id,
        elements,
    })
}

fn catalog_number(line1: &str) -> Option<u64> {
    line1.get(2..7)?.trim().parse().ok()
}

/// Split multi-satellite TLE content into (name, line1, line2)
fn split_records(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            // 2-line TLE (no name)
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            // 3-line TLE, name may carry a leading "0 "
            let name = lines[i].trim();
            let name = name.strip_prefix("0 ").unwrap_or(name).trim().to_string();
            result.push((Some(name), lines[i + 1].to_string(), lines[i + 2].to_string()));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub const ISS_TLE: &str = "ISS (ZARYA)
1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992
2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008
";

    const BARE_TLE: &str = "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992
2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008
";

    #[test]
    fn reads_named_record() {
        let sets: Vec<_> = TleReader::new(ISS_TLE).collect();
        assert_eq!(sets.len(), 1);
        let set = sets[0].as_ref().unwrap();
        assert_eq!(set.name, "ISS (ZARYA)");
        assert_eq!(set.norad_id, 25544);
    }

    #[test]
    fn reads_unnamed_record() {
        let set = TleReader::new(BARE_TLE).next().unwrap().unwrap();
        assert_eq!(set.name, "NORAD 25544");
    }

    #[test]
    fn filters_by_catalog_number() {
        let content = format!("{ISS_TLE}\n# comment\n{BARE_TLE}");
        assert_eq!(TleReader::new(&content).with_satno(25544).count(), 2);
        assert_eq!(TleReader::new(&content).with_satno(12345).count(), 0);
        assert_eq!(TleReader::new(&content).with_satno(0).count(), 2);
    }

    #[test]
    fn bad_record_does_not_end_stream() {
        let broken = "BROKEN
1 99999U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  999X
2 99999  51.6461 221.2784 0001413  89.1723 280.4612 15.4950789623600X
";
        let content = format!("{broken}{ISS_TLE}");
        let results: Vec<_> = TleReader::new(&content).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
    }

    #[test]
    fn empty_source_is_not_an_error() {
        assert_eq!(TleReader::new("").count(), 0);
        assert_eq!(TleReader::new("\n\nnothing here\n").count(), 0);
    }

    #[test]
    fn open_missing_file_fails() {
        assert!(matches!(
            TleReader::open(Path::new("/nonexistent/classfd.tle")),
            Err(PredictError::FileRead(_))
        ));
    }
}
