use std::path::Path;
use std::sync::Arc;

use crate::layer::LayerSnapshot;
use crate::util::{normalize_path, split_query, substitute_first};

use super::probe::{DiskProbe, Probe};

/// Resolves already-aliased requests against a fixed layer snapshot.
///
/// A request is rewritten by substituting the project root with each layer
/// root in turn; the first layer where the rewritten file exists wins. When no
/// layer matches, the request comes back untouched so the host's default
/// resolution can take over.
#[derive(Debug, Clone)]
pub struct LayerResolver {
    root_dir: String,
    snapshot: LayerSnapshot,
    probe: Arc<dyn Probe>,
}

impl LayerResolver {
    pub fn new(root_dir: impl AsRef<Path>, snapshot: LayerSnapshot) -> Self {
        Self::with_probe(root_dir, snapshot, Arc::new(DiskProbe))
    }

    pub fn with_probe(
        root_dir: impl AsRef<Path>,
        snapshot: LayerSnapshot,
        probe: Arc<dyn Probe>,
    ) -> Self {
        Self {
            root_dir: normalize_path(&root_dir.as_ref().to_string_lossy()),
            snapshot,
            probe,
        }
    }

    pub fn root_dir(&self) -> &str {
        &self.root_dir
    }

    pub fn snapshot(&self) -> &LayerSnapshot {
        &self.snapshot
    }

    /// Resolve `request` to the first layer that contains it.
    ///
    /// The `?query` suffix is ignored for the existence check but kept in the
    /// returned path.
    pub fn resolve(&self, request: &str) -> String {
        let (bare, _query) = split_query(request);

        for layer in &self.snapshot {
            let candidate = substitute_first(bare, &self.root_dir, layer.root());
            if self.probe.exists(Path::new(&candidate)) {
                let resolved = substitute_first(request, &self.root_dir, layer.root());
                log::trace!("{request} -> {resolved} (layer {})", layer.name());
                return resolved;
            }
        }

        log::trace!("{request} not found in any layer, passing through");
        request.to_string()
    }
}
