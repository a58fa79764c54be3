use std::fmt;
use std::sync::Arc;

use crate::layer::LayerSnapshot;
use crate::resolve::LayerResolver;
use crate::util::normalize_path;

/// Tokens whose target is searched across layers on every request.
pub const DYNAMIC_TOKENS: &[&str] = &["@", "~", "@@", "~~", "assets", "public"];

/// Ordered alias mapping as supplied by the host (token, base path).
pub type AliasMap = Vec<(String, String)>;

/// A single alias entry handed back to the host.
#[derive(Debug, Clone)]
pub struct AliasRule {
    pub find: String,
    pub replacement: String,
    pub custom_resolver: Option<Arc<LayerResolver>>,
}

impl AliasRule {
    /// True when `request` is the token itself or starts with `token/`.
    pub fn matches(&self, request: &str) -> bool {
        match request.strip_prefix(self.find.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Rewrite `request`, running the layer search for dynamic rules.
    ///
    /// Returns `None` when the rule does not match.
    pub fn apply(&self, request: &str) -> Option<String> {
        if !self.matches(request) {
            return None;
        }
        let rest = request.strip_prefix(self.find.as_str())?;
        let rewritten = format!("{}{rest}", self.replacement);
        Some(match &self.custom_resolver {
            Some(resolver) => resolver.resolve(&rewritten),
            None => rewritten,
        })
    }

    pub fn is_dynamic(&self) -> bool {
        self.custom_resolver.is_some()
    }
}

impl fmt::Display for AliasRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_dynamic() { "layered" } else { "static" };
        write!(f, "{} -> {}  [{kind}]", self.find, self.replacement)
    }
}

pub fn is_dynamic_token(find: &str) -> bool {
    DYNAMIC_TOKENS.contains(&find)
}

/// Expand an alias mapping into the ordered rule list the host consumes.
///
/// Mapping entries keep their order; dynamic tokens share one resolver bound to
/// `resolver`'s snapshot. One `~<name>` rule per layer follows, in priority
/// order. Collisions between the two groups are kept as-is. Replacements are
/// normalized like layer roots so the resolver's root substitution sees the
/// same separators.
pub fn expand_aliases(aliases: &[(String, String)], resolver: &Arc<LayerResolver>) -> Vec<AliasRule> {
    let snapshot: &LayerSnapshot = resolver.snapshot();
    let mut rules = Vec::with_capacity(aliases.len() + snapshot.len());

    for (find, replacement) in aliases {
        let custom_resolver = is_dynamic_token(find).then(|| Arc::clone(resolver));
        rules.push(AliasRule {
            find: find.clone(),
            replacement: normalize_path(replacement),
            custom_resolver,
        });
    }

    for layer in snapshot {
        rules.push(AliasRule {
            find: format!("~{}", layer.name()),
            replacement: layer.root().to_string(),
            custom_resolver: None,
        });
    }

    log::debug!(
        "expanded {} alias(es) and {} layer alias(es)",
        aliases.len(),
        snapshot.len()
    );
    rules
}

/// Resolve `request` through the first matching rule, or return it unchanged.
pub fn apply_aliases(rules: &[AliasRule], request: &str) -> String {
    rules
        .iter()
        .find_map(|rule| rule.apply(request))
        .unwrap_or_else(|| request.to_string())
}
