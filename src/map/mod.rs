mod command;
mod frame;
mod state;

pub use command::{parse_length, Command, CommandError, Step};
pub use frame::{draw_frame, draw_track, illumination_color};
pub use state::{MapState, Orientation, ViewContext, DEFAULT_LENGTH_S, DEFAULT_ZOOM};
