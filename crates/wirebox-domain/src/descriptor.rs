//! Provider descriptors and dependency handles
//!
//! A `Descriptor` is the immutable registration record for one provider:
//! its identity token, its ordered dependency list, and the factory that
//! turns resolved dependencies into an instance. Factories never receive
//! variadic arguments; they receive a single ordered `DepList` of
//! type-erased handles and consume it front to back, in declared order.
//!
//! ```text
//! Provide impl ──┐
//! bind(coerce) ──┼──▶ Descriptor { token, deps, factory }
//! from_factory ──┘            │
//!                             ▼
//!              factory(&mut DepList) -> Result<Instance>
//! ```

use crate::error::{Error, Result};
use crate::token::Token;
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Type-erased shared handle to a constructed instance
///
/// Capability providers store `Arc<dyn Trait>` as the erased value so
/// consumers can recover the trait object without reflection.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Factory signature shared by all descriptors
///
/// Receives the resolved dependencies as one ordered sequence and returns
/// the erased instance.
pub type Factory = Arc<dyn Fn(&mut DepList) -> Result<Instance> + Send + Sync>;

/// Ordered sequence of resolved dependency handles
///
/// Handles come out strictly in the order the descriptor declared its
/// dependencies. Taking past the end or at a mismatched type is an error,
/// never a panic.
#[derive(Default)]
pub struct DepList {
    handles: VecDeque<(Token, Instance)>,
}

impl DepList {
    /// Create an empty dependency list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolved handle
    ///
    /// The resolver pushes handles in declared dependency order.
    pub fn push(&mut self, token: Token, instance: Instance) {
        self.handles.push_back((token, instance));
    }

    /// Number of handles not yet consumed
    pub fn remaining(&self) -> usize {
        self.handles.len()
    }

    /// Take the next handle without any type recovery
    pub fn take_raw(&mut self) -> Result<Instance> {
        self.next_handle().map(|(_, instance)| instance)
    }

    /// Take the next handle as a concrete service type
    pub fn take<T: Send + Sync + 'static>(&mut self) -> Result<Arc<T>> {
        let (token, instance) = self.next_handle()?;
        instance
            .downcast::<T>()
            .map_err(|_| Error::type_mismatch(token.name(), std::any::type_name::<T>()))
    }

    /// Take the next handle as a capability (trait-object) binding
    ///
    /// The handle must have been produced by a capability descriptor that
    /// stored `Arc<dyn Trait>` as its erased value.
    pub fn take_dyn<T: ?Sized + 'static>(&mut self) -> Result<Arc<T>> {
        let (token, instance) = self.next_handle()?;
        instance
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or_else(|| Error::type_mismatch(token.name(), std::any::type_name::<T>()))
    }

    /// Take the next handle as a multi-provider aggregate
    pub fn take_multi(&mut self) -> Result<Arc<Multi>> {
        self.take::<Multi>()
    }

    fn next_handle(&mut self) -> Result<(Token, Instance)> {
        self.handles.pop_front().ok_or_else(|| {
            Error::internal("factory consumed more dependencies than the descriptor declared")
        })
    }
}

impl fmt::Debug for DepList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handles.iter().map(|(token, _)| token))
            .finish()
    }
}

/// Static registration contract for a constructible service
///
/// Replaces runtime metadata attachment with an explicit, checkable
/// declaration: the dependency list and the construction step live on the
/// type itself and are read once at registration time.
///
/// # Example
///
/// ```
/// use wirebox_domain::{DepList, Provide, Result, Token};
/// use std::sync::Arc;
///
/// struct Config;
/// impl Provide for Config {
///     fn build(_deps: &mut DepList) -> Result<Self> {
///         Ok(Config)
///     }
/// }
///
/// struct Service {
///     config: Arc<Config>,
/// }
/// impl Provide for Service {
///     fn deps() -> Vec<Token> {
///         vec![Token::of::<Config>()]
///     }
///     fn build(deps: &mut DepList) -> Result<Self> {
///         Ok(Service { config: deps.take::<Config>()? })
///     }
/// }
/// ```
pub trait Provide: Sized + Send + Sync + 'static {
    /// Dependency tokens, in the order `build` consumes them
    fn deps() -> Vec<Token> {
        Vec::new()
    }

    /// Construct the service from its resolved dependencies
    fn build(deps: &mut DepList) -> Result<Self>;
}

/// Immutable registration record: identity + dependency declaration + factory
#[derive(Clone)]
pub struct Descriptor {
    token: Token,
    deps: Vec<Token>,
    factory: Factory,
}

impl Descriptor {
    /// Descriptor for a concrete `Provide` type
    pub fn of<T: Provide>() -> Self {
        Self {
            token: Token::of::<T>(),
            deps: T::deps(),
            factory: Arc::new(|deps| {
                let instance: Instance = Arc::new(T::build(deps)?);
                Ok(instance)
            }),
        }
    }

    /// Capability descriptor binding an implementation to a trait-object token
    ///
    /// Builds `T`, then stores the coerced `Arc<dyn Trait>` as the erased
    /// value, so consumers recover the capability with `take_dyn`/`get_dyn`.
    ///
    /// The `coerce` argument is the unsizing step the type system cannot
    /// infer on its own; an identity closure is enough:
    ///
    /// ```
    /// use wirebox_domain::{DepList, Descriptor, Provide, Result};
    ///
    /// trait Notifier: Send + Sync {}
    /// struct NoopNotifier;
    /// impl Notifier for NoopNotifier {}
    /// impl Provide for NoopNotifier {
    ///     fn build(_deps: &mut DepList) -> Result<Self> {
    ///         Ok(NoopNotifier)
    ///     }
    /// }
    ///
    /// let descriptor = Descriptor::bind::<dyn Notifier, NoopNotifier>(|n| n);
    /// ```
    pub fn bind<I, T>(coerce: fn(Arc<T>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        T: Provide,
    {
        Self {
            token: Token::of::<I>(),
            deps: T::deps(),
            factory: Arc::new(move |deps| {
                let capability = coerce(Arc::new(T::build(deps)?));
                let instance: Instance = Arc::new(capability);
                Ok(instance)
            }),
        }
    }

    /// Descriptor from a bare factory closure
    pub fn from_factory<F>(token: Token, deps: Vec<Token>, factory: F) -> Self
    where
        F: Fn(&mut DepList) -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            token,
            deps,
            factory: Arc::new(factory),
        }
    }

    /// Identity token this descriptor provides
    pub fn token(&self) -> Token {
        self.token
    }

    /// Declared dependencies, in resolution order
    pub fn deps(&self) -> &[Token] {
        &self.deps
    }

    /// Invoke the factory over an already-resolved dependency list
    pub fn produce(&self, deps: &mut DepList) -> Result<Instance> {
        (self.factory)(deps)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("token", &self.token)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

/// Per-scope substitution of a token's normal descriptor
///
/// Declared per-scope, evaluated in declaration order; the first entry
/// matching a token wins and later duplicates are dead entries.
#[derive(Clone, Debug)]
pub struct OverrideEntry {
    provide: Token,
    replacement: Descriptor,
}

impl OverrideEntry {
    /// Override `provide` with a full replacement descriptor
    pub fn new(provide: Token, replacement: Descriptor) -> Self {
        Self {
            provide,
            replacement,
        }
    }

    /// Override `provide` with a bare factory
    pub fn with_factory<F>(provide: Token, deps: Vec<Token>, factory: F) -> Self
    where
        F: Fn(&mut DepList) -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            provide,
            replacement: Descriptor::from_factory(provide, deps, factory),
        }
    }

    /// The token this entry replaces
    pub fn provide(&self) -> Token {
        self.provide
    }

    /// The replacement descriptor
    pub fn replacement(&self) -> &Descriptor {
        &self.replacement
    }
}

/// Ordered aggregate of multi-provider member instances
///
/// Member order matches the declaration order of the underlying provider
/// list. Consumers depend on the aggregate token exactly like any other
/// dependency and receive `Arc<Multi>`.
pub struct Multi {
    items: Vec<Instance>,
}

impl Multi {
    /// Wrap an ordered sequence of member instances
    pub fn new(items: Vec<Instance>) -> Self {
        Self { items }
    }

    /// Number of member instances
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the aggregate has no members
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Member instances, in declaration order
    pub fn items(&self) -> &[Instance] {
        &self.items
    }

    /// Iterate the member instances in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.items.iter()
    }

    /// Member at `index` as a concrete service type
    pub fn get<T: Send + Sync + 'static>(&self, index: usize) -> Result<Arc<T>> {
        let instance = self
            .items
            .get(index)
            .cloned()
            .ok_or_else(|| Error::internal(format!("multi-provider has no member {}", index)))?;
        instance
            .downcast::<T>()
            .map_err(|_| Error::type_mismatch("multi member", std::any::type_name::<T>()))
    }

    /// Member at `index` as a capability (trait-object) binding
    pub fn get_dyn<T: ?Sized + 'static>(&self, index: usize) -> Result<Arc<T>> {
        let instance = self
            .items
            .get(index)
            .ok_or_else(|| Error::internal(format!("multi-provider has no member {}", index)))?;
        instance
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or_else(|| Error::type_mismatch("multi member", std::any::type_name::<T>()))
    }
}

impl fmt::Debug for Multi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multi").field("len", &self.len()).finish()
    }
}
