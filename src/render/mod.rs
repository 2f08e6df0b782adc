mod error;
mod recorder;
mod surface;
mod svg;

pub use error::RenderError;
pub use recorder::{DrawCommand, Recorder};
pub use surface::{Color, Edge, Fill, LineStyle, Marker, Surface};
pub use svg::SvgSurface;
