mod error;
mod globe;
mod sites;

pub use error::DataError;
pub use globe::{GlobeOutline, PEN_UP_LATITUDE};
pub use sites::{Site, SiteTable};
