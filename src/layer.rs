use std::path::Path;
use std::sync::Arc;

use crate::util::normalize_path;

/// Folder name skipped when deriving a layer's alias name.
const SOURCE_DIR: &str = "src";

/// One root directory in the layer stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    root: String,
    name: String,
}

impl Layer {
    /// Build a layer from its root directory, normalizing the path text.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = normalize_path(&root.as_ref().to_string_lossy());
        let name = layer_name(&root).to_string();
        Self { root, name }
    }

    /// Normalized root directory (`/` separators, no trailing slash).
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Name used for the synthetic `~<name>` alias.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Immutable, priority-ordered capture of the layer stack.
///
/// Iteration order is search order: the first layer is the highest priority
/// and is always consulted first, and resolution stops at the first layer that
/// satisfies a request. The snapshot is detached from whatever list it was
/// captured from, so later reordering by the host never changes it. Clones
/// share the same storage.
#[derive(Debug, Clone, Default)]
pub struct LayerSnapshot {
    layers: Arc<[Layer]>,
}

impl LayerSnapshot {
    /// Copy the host's current layer roots into a fresh snapshot.
    pub fn capture<P: AsRef<Path>>(roots: &[P]) -> Self {
        let layers: Vec<Layer> = roots.iter().map(Layer::new).collect();
        log::debug!("captured {} layer(s)", layers.len());
        Self {
            layers: layers.into(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl<'a> IntoIterator for &'a LayerSnapshot {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Derive the alias name of a layer from its normalized root.
///
/// Uses the last path segment, or the one before it when the last segment is
/// `src`. No other segment is ever skipped.
pub(crate) fn layer_name(root: &str) -> &str {
    let mut segments = root.rsplit('/');
    let last = segments.next().unwrap_or("");
    if last == SOURCE_DIR {
        segments.next().unwrap_or("")
    } else {
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_name_skips_trailing_src() {
        assert_eq!(Layer::new("/repo/packages/widget/src").name(), "widget");
    }

    #[test]
    fn layer_name_uses_last_segment_without_src() {
        assert_eq!(Layer::new("/repo/packages/widget").name(), "widget");
    }

    #[test]
    fn layer_name_only_skips_src() {
        assert_eq!(Layer::new("/repo/src/widget/lib").name(), "lib");
        assert_eq!(Layer::new("/repo/src/widget").name(), "widget");
    }

    #[test]
    fn layer_name_ignores_trailing_separator() {
        assert_eq!(Layer::new("/repo/packages/widget/").name(), "widget");
        assert_eq!(Layer::new("/repo/packages/widget/src/").name(), "widget");
    }

    #[test]
    fn layer_root_is_normalized() {
        let layer = Layer::new("C:\\repo\\base\\");
        assert_eq!(layer.root(), "C:/repo/base");
        assert_eq!(layer.name(), "base");
    }

    #[test]
    fn capture_preserves_priority_order() {
        let snapshot = LayerSnapshot::capture(&["/app", "/layers/base", "/layers/theme/src"]);
        let names: Vec<&str> = snapshot.iter().map(Layer::name).collect();
        assert_eq!(names, vec!["app", "base", "theme"]);
    }

    #[test]
    fn capture_is_detached_from_host_list() {
        let mut host = vec!["/app".to_string(), "/layers/base".to_string()];
        let snapshot = LayerSnapshot::capture(&host);
        host.reverse();
        host.push("/layers/extra".to_string());

        let roots: Vec<&str> = snapshot.iter().map(Layer::root).collect();
        assert_eq!(roots, vec!["/app", "/layers/base"]);
    }

    #[test]
    fn capture_empty_yields_empty_snapshot() {
        let snapshot = LayerSnapshot::capture::<&str>(&[]);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
    }

    #[test]
    fn clones_share_layers() {
        let snapshot = LayerSnapshot::capture(&["/a", "/b"]);
        let clone = snapshot.clone();
        assert!(Arc::ptr_eq(&snapshot.layers, &clone.layers));
    }
}
