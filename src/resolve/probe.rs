use std::fmt;
use std::io::{self, ErrorKind};
use std::path::Path;

/// Read-only existence check used while walking the layer stack.
pub trait Probe: fmt::Debug + Send + Sync {
    /// Returns `true` when `path` exists. Must never fail: any error reads as
    /// "does not exist".
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by `stat` on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskProbe;

impl Probe for DiskProbe {
    fn exists(&self, path: &Path) -> bool {
        stat_found(path, std::fs::metadata(path).map(|_| ()))
    }
}

/// Interpret a stat result: only success counts as present.
pub(crate) fn stat_found(path: &Path, stat: io::Result<()>) -> bool {
    match stat {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            log::debug!("treating {} as missing: {e}", path.display());
            false
        }
    }
}
