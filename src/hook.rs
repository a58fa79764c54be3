use std::path::PathBuf;
use std::sync::Arc;

use crate::alias::{expand_aliases, AliasMap, AliasRule};
use crate::layer::LayerSnapshot;
use crate::resolve::{LayerResolver, Probe};

/// Options the host exposes to the module at setup time.
#[derive(Debug, Clone, Default)]
pub struct HostOptions {
    pub root_dir: PathBuf,
    /// Layer roots, highest priority first.
    pub layers: Vec<PathBuf>,
}

/// Alias slot of a build config: a mapping on the way in, rules on the way out.
#[derive(Debug, Clone)]
pub enum AliasSlot {
    Mapping(AliasMap),
    Rules(Vec<AliasRule>),
}

impl Default for AliasSlot {
    fn default() -> Self {
        Self::Mapping(AliasMap::new())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub alias: AliasSlot,
}

/// The part of a host build config this module touches.
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    pub resolve: ResolveOptions,
}

impl BuildConfig {
    pub fn with_aliases(alias: AliasMap) -> Self {
        Self {
            resolve: ResolveOptions {
                alias: AliasSlot::Mapping(alias),
            },
        }
    }

    /// Expanded rules, if the hook has already run on this config.
    pub fn rules(&self) -> Option<&[AliasRule]> {
        match &self.resolve.alias {
            AliasSlot::Rules(rules) => Some(rules),
            AliasSlot::Mapping(_) => None,
        }
    }
}

/// Layer alias module bound to one configuration pass.
///
/// The layer snapshot is taken in [`LayerAliasModule::setup`]; a host reload
/// must call `setup` again rather than reuse an existing module.
#[derive(Debug, Clone)]
pub struct LayerAliasModule {
    resolver: Arc<LayerResolver>,
}

impl LayerAliasModule {
    pub fn setup(options: &HostOptions) -> Self {
        let snapshot = LayerSnapshot::capture(&options.layers);
        Self {
            resolver: Arc::new(LayerResolver::new(&options.root_dir, snapshot)),
        }
    }

    pub fn setup_with_probe(options: &HostOptions, probe: Arc<dyn Probe>) -> Self {
        let snapshot = LayerSnapshot::capture(&options.layers);
        Self {
            resolver: Arc::new(LayerResolver::with_probe(&options.root_dir, snapshot, probe)),
        }
    }

    pub fn resolver(&self) -> &Arc<LayerResolver> {
        &self.resolver
    }

    /// Build-config hook: replace the alias mapping with the expanded rules.
    ///
    /// A slot that already holds rules is left alone.
    pub fn extend_config(&self, config: &mut BuildConfig) {
        let AliasSlot::Mapping(mapping) = &config.resolve.alias else {
            log::debug!("alias slot already expanded, skipping");
            return;
        };
        let rules = expand_aliases(mapping, &self.resolver);
        config.resolve.alias = AliasSlot::Rules(rules);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::Path;

    #[derive(Debug)]
    struct SetProbe(HashSet<PathBuf>);

    impl Probe for SetProbe {
        fn exists(&self, path: &Path) -> bool {
            self.0.contains(path)
        }
    }

    fn options(layers: &[&str]) -> HostOptions {
        HostOptions {
            root_dir: PathBuf::from("/app"),
            layers: layers.iter().map(PathBuf::from).collect(),
        }
    }

    fn nuxt_aliases() -> AliasMap {
        [("~", "/app"), ("@", "/app"), ("~~", "/app"), ("@@", "/app"), ("#build", "/app/.nuxt")]
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn extend_config_replaces_mapping_with_rules() {
        let module = LayerAliasModule::setup(&options(&["/app", "/layers/base"]));
        let mut config = BuildConfig::with_aliases(nuxt_aliases());
        module.extend_config(&mut config);

        let rules = config.rules().unwrap();
        assert_eq!(rules.len(), 7);
        assert_eq!(rules[5].find, "~app");
        assert_eq!(rules[6].find, "~base");
    }

    #[test]
    fn extend_config_is_idempotent() {
        let module = LayerAliasModule::setup(&options(&["/app", "/layers/base"]));
        let mut config = BuildConfig::with_aliases(nuxt_aliases());
        module.extend_config(&mut config);
        module.extend_config(&mut config);

        assert_eq!(config.rules().unwrap().len(), 7);
    }

    #[test]
    fn setup_snapshots_layers_once() {
        let mut opts = options(&["/app", "/layers/base"]);
        let module = LayerAliasModule::setup(&opts);
        opts.layers.insert(0, PathBuf::from("/layers/late"));

        let mut config = BuildConfig::with_aliases(AliasMap::new());
        module.extend_config(&mut config);
        let finds: Vec<&str> = config.rules().unwrap().iter().map(|r| r.find.as_str()).collect();
        assert_eq!(finds, vec!["~app", "~base"]);
    }

    #[test]
    fn reload_produces_fresh_resolver() {
        let first = LayerAliasModule::setup(&options(&["/app"]));
        let second = LayerAliasModule::setup(&options(&["/app", "/layers/base"]));

        assert!(!Arc::ptr_eq(first.resolver(), second.resolver()));
        assert_eq!(first.resolver().snapshot().len(), 1);
        assert_eq!(second.resolver().snapshot().len(), 2);
    }

    #[test]
    fn expanded_rules_resolve_through_layers() {
        let probe = SetProbe(["/layers/base/components/Nav.vue"].iter().map(PathBuf::from).collect());
        let module =
            LayerAliasModule::setup_with_probe(&options(&["/app", "/layers/base"]), Arc::new(probe));
        let mut config = BuildConfig::with_aliases(nuxt_aliases());
        module.extend_config(&mut config);

        let rules = config.rules().unwrap();
        assert_eq!(
            crate::alias::apply_aliases(rules, "~/components/Nav.vue?macro=true"),
            "/layers/base/components/Nav.vue?macro=true"
        );
        assert_eq!(
            crate::alias::apply_aliases(rules, "#build/app.config"),
            "/app/.nuxt/app.config"
        );
    }
}
