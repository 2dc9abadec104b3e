/// Use-case operations driven by the front end
///
/// Each operation takes the store (and photo store where needed), validates
/// user input, performs the writes and returns a serializable response.
/// Operations that depend on "today" take it as an argument.

pub mod body_log;
pub mod workout;
pub mod goal;
pub mod status;

// Re-export tool functions for easy access
pub use body_log::*;
pub use workout::*;
pub use goal::*;
pub use status::*;
