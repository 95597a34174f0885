use crate::error::RecordError;
use crate::record::RecordType;
use crate::types::FastMap;
use serde::Deserialize;
use smol_str::SmolStr;

/// Configuration for [`Factory::with_config`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Whether defining a name that is already registered replaces the old type.
    ///
    /// When false, redefinition fails with `TypeAlreadyDefined`.
    ///
    /// Default: true (the replacement is logged at `warn`).
    pub allow_redefinition: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            allow_redefinition: true,
        }
    }
}

impl FactoryConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Creates record types and keeps a registry of the named ones.
#[derive(Debug, Default)]
pub struct Factory {
    config: FactoryConfig,
    registry: FastMap<SmolStr, RecordType>,
}

impl Factory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FactoryConfig) -> Self {
        Self {
            config,
            registry: FastMap::default(),
        }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Define a record type from a flat argument list.
    ///
    /// A capitalized first argument is taken as the type name: it is removed
    /// from the field list and the type is registered under it. Anything else
    /// yields an anonymous, unregistered type.
    pub fn create<I, S>(&mut self, args: I) -> Result<RecordType, RecordError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let mut args: Vec<SmolStr> = args.into_iter().map(Into::into).collect();
        let named = args
            .first()
            .and_then(|first| first.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase());

        if named {
            let name = args.remove(0);
            self.define(&name, args)
        } else {
            RecordType::new(args)
        }
    }

    /// Define an anonymous record type. Nothing is registered.
    pub fn anonymous<I, S>(fields: I) -> Result<RecordType, RecordError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        RecordType::new(fields)
    }

    /// Define a named record type and register it.
    pub fn define<I, S>(&mut self, name: &str, fields: I) -> Result<RecordType, RecordError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let record_type = RecordType::named(name, fields)?;

        if self.registry.contains_key(name) {
            if !self.config.allow_redefinition {
                return Err(RecordError::TypeAlreadyDefined(SmolStr::new(name)));
            }
            log::warn!("redefining record type {name}");
        }

        self.registry
            .insert(SmolStr::new(name), record_type.clone());
        log::debug!("registered record type {name} ({} registered)", self.registry.len());
        Ok(record_type)
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&RecordType> {
        self.registry.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// Drop a name from the registry. Existing handles and records stay valid.
    pub fn remove(&mut self, name: &str) -> Option<RecordType> {
        let removed = self.registry.remove(name);
        if removed.is_some() {
            log::debug!("unregistered record type {name}");
        }
        removed
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.registry.keys().map(SmolStr::as_str).collect();
        names.sort_unstable();
        names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
