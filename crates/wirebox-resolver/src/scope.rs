//! Injector scope
//!
//! A `Scope` owns a singleton cache and an override table, optionally
//! chained to a parent scope, and performs all resolution. `get` follows
//! a fixed precedence:
//!
//! ```text
//! get(token)
//!   1. own cache            -> return the cached singleton
//!   2. own override table   -> construct from the override, cache HERE
//!   3. ancestor cache       -> delegate, never duplicate the entry
//!   4. registry descriptor  -> construct fresh, cache HERE
//! ```
//!
//! Ancestor override tables are never consulted by a descendant's
//! resolution; an ancestor's override reaches descendants only through
//! the singleton it materializes (step 3). An override's singleton
//! lifetime is scoped to where the override is declared (step 2 caches in
//! the resolving scope, not the ancestor).
//!
//! Resolution is fully synchronous and single-threaded by contract: an
//! ordinary recursive call chain with no suspension points. The scope
//! tracks tokens currently in construction and fails with
//! `CyclicDependency` the moment one reappears.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, info, trace};
use wirebox_domain::locks::{lock_mutex, lock_rwlock_read, lock_rwlock_write};
use wirebox_domain::{DepList, Descriptor, Error, Instance, Multi, OverrideEntry, Result, Token};

use crate::registry::Registry;

/// Construction options for a scope
///
/// Carries the per-scope override table and the bootstrap list. Both are
/// optional; `ScopeOptions::new()` yields a plain lazy scope.
#[derive(Debug, Default)]
pub struct ScopeOptions {
    overrides: Vec<OverrideEntry>,
    bootstrap: Vec<Token>,
}

impl ScopeOptions {
    /// Empty options: no overrides, no bootstrap
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one override entry
    ///
    /// Entries are evaluated in declaration order; the first match for a
    /// token wins.
    pub fn with_override(mut self, entry: OverrideEntry) -> Self {
        self.overrides.push(entry);
        self
    }

    /// Append several override entries, preserving order
    pub fn with_overrides(mut self, entries: impl IntoIterator<Item = OverrideEntry>) -> Self {
        self.overrides.extend(entries);
        self
    }

    /// Append one token to the bootstrap list
    pub fn with_bootstrap(mut self, token: Token) -> Self {
        self.bootstrap.push(token);
        self
    }

    /// Append several bootstrap tokens, preserving order
    pub fn with_bootstrap_sequence(mut self, tokens: impl IntoIterator<Item = Token>) -> Self {
        self.bootstrap.extend(tokens);
        self
    }
}

/// Resolver instance with its own cache and override table
///
/// A scope exclusively owns its cache and override table; it never owns
/// its parent (a parent may outlive the scope or be shared by siblings).
/// Cache entries live exactly as long as the owning scope.
pub struct Scope {
    registry: Arc<Registry>,
    overrides: Vec<OverrideEntry>,
    cache: RwLock<HashMap<Token, Instance>>,
    constructing: Mutex<Vec<Token>>,
    parent: Option<Arc<Scope>>,
}

impl Scope {
    /// Construct a root scope over a registry
    ///
    /// If the options carry a bootstrap list, every listed token is
    /// resolved in order before the scope is returned; any failure aborts
    /// construction and no partial scope escapes.
    pub fn root(registry: Registry, options: ScopeOptions) -> Result<Arc<Self>> {
        Self::assemble(Arc::new(registry), options, None)
    }

    /// Construct a child scope sharing this scope's registry
    pub fn child(self: &Arc<Self>, options: ScopeOptions) -> Result<Arc<Self>> {
        Self::assemble(self.registry.clone(), options, Some(self.clone()))
    }

    fn assemble(
        registry: Arc<Registry>,
        options: ScopeOptions,
        parent: Option<Arc<Scope>>,
    ) -> Result<Arc<Self>> {
        let ScopeOptions {
            overrides,
            bootstrap,
        } = options;

        let scope = Self {
            registry,
            overrides,
            cache: RwLock::new(HashMap::new()),
            constructing: Mutex::new(Vec::new()),
            parent,
        };

        if !bootstrap.is_empty() {
            info!(tokens = bootstrap.len(), "bootstrapping scope");
        }
        for token in bootstrap {
            scope.get_raw(token)?;
            debug!(token = token.name(), "bootstrapped");
        }

        Ok(Arc::new(scope))
    }

    /// Scope-visible singleton for a token
    ///
    /// Repeated calls with no change to overrides return the same
    /// instance. Construction caches in this scope; delegation to an
    /// ancestor's materialized singleton never duplicates the entry
    /// locally.
    pub fn get_raw(&self, token: Token) -> Result<Instance> {
        if let Some(instance) = self.cached_here(token)? {
            trace!(token = token.name(), "cache hit");
            return Ok(instance);
        }

        if let Some(entry) = self.local_override(token) {
            debug!(token = token.name(), "constructing from scope override");
            let instance = self.construct(token, entry.replacement())?;
            self.cache_instance(token, instance.clone())?;
            return Ok(instance);
        }

        if let Some(parent) = &self.parent {
            if parent.has(token) {
                trace!(token = token.name(), "delegating to ancestor singleton");
                return parent.get_raw(token);
            }
        }

        let descriptor = self
            .registry
            .get(token)
            .cloned()
            .ok_or_else(|| Error::unresolved(token.name()))?;
        debug!(token = token.name(), "constructing from registry descriptor");
        let instance = self.construct(token, &descriptor)?;
        self.cache_instance(token, instance.clone())?;
        Ok(instance)
    }

    /// Typed singleton access for a concrete service type
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let token = Token::of::<T>();
        self.get_raw(token)?
            .downcast::<T>()
            .map_err(|_| Error::type_mismatch(token.name(), std::any::type_name::<T>()))
    }

    /// Typed singleton access for a capability (trait-object) token
    pub fn get_dyn<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let token = Token::of::<T>();
        let instance = self.get_raw(token)?;
        instance
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or_else(|| Error::type_mismatch(token.name(), std::any::type_name::<T>()))
    }

    /// Singleton access for a multi-provider aggregate token
    pub fn get_multi(&self, token: Token) -> Result<Arc<Multi>> {
        self.get_raw(token)?
            .downcast::<Multi>()
            .map_err(|_| Error::type_mismatch(token.name(), std::any::type_name::<Multi>()))
    }

    /// Construct a fresh instance, bypassing this scope's cache
    ///
    /// Only the requested root is guaranteed fresh; its dependencies are
    /// still resolved via `get` and remain shared singletons. The cache
    /// is neither read nor written for the root token.
    pub fn create_raw(&self, token: Token) -> Result<Instance> {
        let descriptor = self
            .local_override(token)
            .map(|entry| entry.replacement().clone())
            .or_else(|| self.registry.get(token).cloned())
            .ok_or_else(|| Error::unresolved(token.name()))?;

        debug!(token = token.name(), "constructing fresh instance");
        self.construct(token, &descriptor)
    }

    /// Typed fresh construction for a concrete service type
    pub fn create<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let token = Token::of::<T>();
        self.create_raw(token)?
            .downcast::<T>()
            .map_err(|_| Error::type_mismatch(token.name(), std::any::type_name::<T>()))
    }

    /// Typed fresh construction for a capability (trait-object) token
    pub fn create_dyn<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let token = Token::of::<T>();
        let instance = self.create_raw(token)?;
        instance
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or_else(|| Error::type_mismatch(token.name(), std::any::type_name::<T>()))
    }

    /// True if this scope or any ancestor holds a cached instance
    ///
    /// Never triggers construction.
    pub fn has(&self, token: Token) -> bool {
        matches!(self.cached_here(token), Ok(Some(_)))
            || self.parent.as_ref().is_some_and(|p| p.has(token))
    }

    fn cached_here(&self, token: Token) -> Result<Option<Instance>> {
        Ok(lock_rwlock_read(&self.cache, "Scope::cached_here")?
            .get(&token)
            .cloned())
    }

    fn cache_instance(&self, token: Token, instance: Instance) -> Result<()> {
        lock_rwlock_write(&self.cache, "Scope::cache_instance")?.insert(token, instance);
        Ok(())
    }

    fn local_override(&self, token: Token) -> Option<&OverrideEntry> {
        // First declared match wins; later duplicates are dead entries.
        self.overrides.iter().find(|entry| entry.provide() == token)
    }

    fn construct(&self, token: Token, descriptor: &Descriptor) -> Result<Instance> {
        self.enter_construction(token)?;
        let result = self.resolve_and_produce(token, descriptor);
        self.exit_construction(token);
        result
    }

    fn resolve_and_produce(&self, token: Token, descriptor: &Descriptor) -> Result<Instance> {
        let mut handles = DepList::new();
        for dep in descriptor.deps() {
            handles.push(*dep, self.get_raw(*dep)?);
        }

        descriptor.produce(&mut handles).map_err(|err| match err {
            // Collaborator configuration errors pass through unchanged.
            Error::Configuration { .. } => err,
            other => Error::construction(token.name(), other),
        })
    }

    fn enter_construction(&self, token: Token) -> Result<()> {
        let mut in_flight = lock_mutex(&self.constructing, "Scope::enter_construction")?;
        if in_flight.contains(&token) {
            let chain = in_flight
                .iter()
                .map(Token::name)
                .chain(std::iter::once(token.name()))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Error::cyclic(token.name(), chain));
        }
        in_flight.push(token);
        Ok(())
    }

    fn exit_construction(&self, token: Token) {
        if let Ok(mut in_flight) = lock_mutex(&self.constructing, "Scope::exit_construction") {
            if let Some(position) = in_flight.iter().rposition(|t| *t == token) {
                in_flight.remove(position);
            }
        }
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self.cache.read().map(|cache| cache.len()).unwrap_or(0);
        f.debug_struct("Scope")
            .field("cached", &cached)
            .field("overrides", &self.overrides.len())
            .field("has_parent", &self.parent.is_some())
            .finish_non_exhaustive()
    }
}
