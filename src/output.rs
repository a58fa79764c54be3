use std::fmt;

use crate::alias::AliasRule;
use crate::layer::LayerSnapshot;

/// Expanded alias list together with the layers it was built from.
pub struct AliasTable<'a> {
    pub root_dir: &'a str,
    pub snapshot: &'a LayerSnapshot,
    pub rules: &'a [AliasRule],
}

impl fmt::Display for AliasTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "root: {}", self.root_dir)?;
        writeln!(f)?;

        if self.snapshot.is_empty() {
            writeln!(f, "layers: (none)")?;
        } else {
            writeln!(f, "layers:")?;
            for (i, layer) in self.snapshot.iter().enumerate() {
                writeln!(f, "  {}. {}  (~{})", i + 1, layer.root(), layer.name())?;
            }
        }
        writeln!(f)?;

        writeln!(f, "aliases:")?;
        for rule in self.rules {
            writeln!(f, "  {rule}")?;
        }
        Ok(())
    }
}

/// A request and the path it resolved to.
pub struct Resolution<'a> {
    pub request: &'a str,
    pub resolved: &'a str,
}

impl fmt::Display for Resolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.request == self.resolved {
            write!(f, "{}  (unresolved)", self.request)
        } else {
            write!(f, "{}\n  -> {}", self.request, self.resolved)
        }
    }
}
