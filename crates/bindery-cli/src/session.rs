//! Loading the demo module into a fresh reference host

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use bindery_core::host::{HostValue, Object, Realm};
use bindery_core::{BridgeConfig, ClassRegistry, InitOptions, Module, Traversal};
use serde::Serialize;
use tracing::debug;

use crate::demo;

/// Init options and the config file they were read from
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    /// Effective options, command-line overrides applied
    pub options: InitOptions,
    /// Config file that was loaded, `None` when running on defaults
    pub config_path: Option<PathBuf>,
}

/// Resolve init options from an explicit config file, `./bindery.toml`, or
/// defaults, then apply a traversal override from the command line.
pub fn resolve_options(
    config: Option<&Path>,
    traversal: Option<Traversal>,
) -> anyhow::Result<ResolvedOptions> {
    let path = match config {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(BridgeConfig::FILE_NAME);
            default.exists().then_some(default)
        }
    };

    let mut options = match &path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            BridgeConfig::from_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?
                .init
        }
        None => InitOptions::default(),
    };

    if let Some(traversal) = traversal {
        options.traversal = traversal;
    }
    Ok(ResolvedOptions {
        options,
        config_path: path,
    })
}

/// Summary of one class bound in the namespace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    /// Namespace key
    pub name: String,
    /// Internal slots per instance
    pub internal_fields: usize,
    /// Prototype methods in attachment order
    pub methods: Vec<String>,
}

/// Demo module initialized into a fresh realm
pub struct Session {
    /// Registry the module was initialized from
    pub registry: ClassRegistry,
    /// Host object model
    pub realm: Realm,
    /// Namespace the classes were exported into
    pub namespace: Object,
    /// Loaded module
    pub module: Module<Object>,
}

impl Session {
    /// Register the demo classes and run one initialization pass
    pub fn load(options: InitOptions) -> anyhow::Result<Self> {
        let registry = demo::demo_registry();
        let mut realm = Realm::new();
        let namespace = realm.create_object();
        let mut module = Module::with_options(demo::MODULE_NAME, options);
        module.initialize(&registry, &mut realm, &namespace)?;

        Ok(Session {
            registry,
            realm,
            namespace,
            module,
        })
    }

    /// Constructor exported under `name`
    pub fn class(&self, name: &str) -> anyhow::Result<Object> {
        match self.namespace.get(name) {
            Some(HostValue::Object(ctor)) if ctor.is_constructor() => Ok(ctor),
            Some(_) => Err(anyhow!("{}.{} is not a constructor", self.module.name(), name)),
            None => Err(anyhow!("no class named {} in module {}", name, self.module.name())),
        }
    }

    /// Every bound class in namespace order
    pub fn classes(&self) -> Vec<ClassSummary> {
        self.namespace
            .keys()
            .iter()
            .filter_map(|key| {
                let ctor = self.namespace.get(key)?.as_object()?.constructor_info()?;
                Some(ClassSummary {
                    name: key.to_string(),
                    internal_fields: ctor.internal_field_count,
                    methods: ctor.prototype.keys().iter().map(|m| m.to_string()).collect(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_options_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[init]\ntraversal = \"oldest-first\"\nwarn-on-collision = false").unwrap();

        let resolved = resolve_options(Some(file.path()), None).unwrap();
        assert_eq!(resolved.options.traversal, Traversal::OldestFirst);
        assert!(!resolved.options.warn_on_collision);
        assert_eq!(resolved.config_path.as_deref(), Some(file.path()));

        let resolved = resolve_options(Some(file.path()), Some(Traversal::NewestFirst)).unwrap();
        assert_eq!(resolved.options.traversal, Traversal::NewestFirst);
        assert!(!resolved.options.warn_on_collision);
    }

    #[test]
    fn test_resolve_options_missing_file() {
        let err = resolve_options(Some(Path::new("/nonexistent/bindery.toml")), None).unwrap_err();
        assert!(err.to_string().contains("failed to load"));
    }

    #[test]
    fn test_session_class_lookup() {
        let session = Session::load(InitOptions::default()).unwrap();
        assert!(session.class("Point").is_ok());
        assert!(session.class("Missing").is_err());
    }
}
