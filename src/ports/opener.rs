/// URL opener port trait
///
/// Opens a ready artifact's location in a new context (browser tab, viewer).
use crate::error::Result;

pub trait UrlOpenerPort: Send + Sync {
    /// Open `url` without blocking on the viewer
    fn open_url(&self, url: &str) -> Result<()>;
}
