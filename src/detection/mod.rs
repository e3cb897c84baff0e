//! Detection implementation submodule.
//!
//! Process-level building blocks used by the discovery cache:
//!
//! - `find_executable`: search-path lookup with fallback locations
//! - `CommandProbe` / `SystemProbe`: bounded `--version` style probing
//! - `parse_version`: first-line version extraction with a sentinel fallback

mod parser;
mod path_finder;
mod probe;

pub use parser::{parse_version, try_parse_version};
pub(crate) use path_finder::{command_stem, find_executable};
pub use probe::{CommandProbe, ProbeResult, SystemProbe};
