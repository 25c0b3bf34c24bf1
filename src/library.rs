//! Song library: folder scanning and display names.
//!
//! A scan yields a flat playlist of `Track`s in directory-listing order; each
//! track carries a display label derived from its filename.

mod display;
mod model;
mod scan;

pub use display::format_duration;
pub use model::Track;
pub use scan::scan;
