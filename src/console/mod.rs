pub mod state;
pub mod strip;
pub mod surface;

use crate::console::strip::StripKey;
use anyhow::Result;

/// Everything a request handler is allowed to do to the screen: flip
/// strip cells and raise notifications. Handlers never touch the console
/// state directly, so tests can swap in a scripted surface.
pub trait Surface: Send + Sync {
    fn select(&self, key: &StripKey) -> Result<()>;

    fn deselect(&self, key: &StripKey) -> Result<()>;

    /// Show a transient notification. Best effort, no result to report.
    fn toast(&self, message: String);
}
