//! Startup playlist building: turns path arguments into an ordered list of
//! playable files, collecting a warning for anything skipped.

mod display;
mod model;
mod scan;

pub use display::format_mmss;
pub use model::Playlist;
pub use scan::build_playlist;
