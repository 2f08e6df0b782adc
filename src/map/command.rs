use thiserror::Error;

use crate::geometry::Point2;

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown key '{0}'")]
    UnknownKey(char),
    #[error("'{0}' needs a cursor position `x y` in km")]
    MissingCursor(char),
    #[error("invalid cursor position: {0}")]
    InvalidCursor(String),
    #[error("invalid integration length {0:?}: {1}")]
    InvalidLength(String, String),
}

/// Direction of a stepped adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Down,
    Up,
}

impl Step {
    pub fn sign(self) -> f64 {
        match self {
            Step::Down => -1.0,
            Step::Up => 1.0,
        }
    }
}

/// Interactive map command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Return to the live clock with the default integration length
    Redraw,
    ToggleOrientation,
    /// Centre the view on the globe point under the cursor
    Recenter(Point2),
    ZoomIn,
    ZoomOut,
    PanLatitude(Step),
    PanLongitude(Step),
    /// Halve or double the integration length
    ScaleLength(Step),
    /// Move the epoch by one integration length
    StepTime(Step),
    SetIntegrationLength(i64),
    Quit,
}

impl Command {
    /// Decode one input line: a key character, then either a cursor
    /// position `x y` (for `c`) or an integration length (for `l`).
    ///
    /// | key | command |
    /// |-----|---------|
    /// | `r` | redraw at the current time |
    /// | `o` | toggle terrestrial/sidereal orientation |
    /// | `c` | recenter on the cursor |
    /// | `-` / `+` `=` | zoom out / in |
    /// | `{` `}` | pan latitude |
    /// | `[` `]` | pan longitude |
    /// | `<` `>` | halve / double integration length |
    /// | `,` `.` | step time back / forward |
    /// | `l` | set integration length |
    /// | `q` `Q` | quit |
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        let mut chars = line.chars();
        let key = chars.next().ok_or(CommandError::Empty)?;
        let rest = chars.as_str().trim();

        let command = match key {
            'r' => Command::Redraw,
            'o' => Command::ToggleOrientation,
            'c' => Command::Recenter(parse_cursor(key, rest)?),
            '-' => Command::ZoomOut,
            '+' | '=' => Command::ZoomIn,
            '{' => Command::PanLatitude(Step::Down),
            '}' => Command::PanLatitude(Step::Up),
            '[' => Command::PanLongitude(Step::Down),
            ']' => Command::PanLongitude(Step::Up),
            '<' => Command::ScaleLength(Step::Down),
            '>' => Command::ScaleLength(Step::Up),
            ',' => Command::StepTime(Step::Down),
            '.' => Command::StepTime(Step::Up),
            'l' => Command::SetIntegrationLength(parse_length(rest)?),
            'q' | 'Q' => Command::Quit,
            other => return Err(CommandError::UnknownKey(other)),
        };

        Ok(command)
    }
}

fn parse_cursor(key: char, text: &str) -> Result<Point2, CommandError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    match fields.as_slice() {
        [] => Err(CommandError::MissingCursor(key)),
        &[x, y] => {
            let coordinate = |s: &str| {
                s.parse::<f64>()
                    .map_err(|e| CommandError::InvalidCursor(format!("{s:?}: {e}")))
            };
            Ok(Point2::new(coordinate(x)?, coordinate(y)?))
        }
        _ => Err(CommandError::InvalidCursor(text.to_string())),
    }
}

/// Integration length in whole seconds, either a bare number (`120`) or a
/// duration (`2m`, `1h 30s`).
pub fn parse_length(text: &str) -> Result<i64, CommandError> {
    let text = text.trim();
    if let Ok(seconds) = text.parse::<i64>() {
        return Ok(seconds);
    }
    humantime::parse_duration(text)
        .map_err(|e| CommandError::InvalidLength(text.to_string(), e.to_string()))
        .and_then(|d| {
            i64::try_from(d.as_secs())
                .map_err(|e| CommandError::InvalidLength(text.to_string(), e.to_string()))
        })
}
