//! Rose control library - client, CLI and terminal output for rosectl.

pub mod cli;
pub mod client;
pub mod flavor;
pub mod output;
pub mod play;

/// Where rosed listens unless told otherwise.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8001";
