//! # Wirebox
//!
//! A hierarchical dependency-injection (object-graph) resolver: register
//! providers with declared dependencies, then let scopes build and cache
//! object graphs on demand - with per-scope overrides, eager bootstrap,
//! and multi-provider aggregation.
//!
//! ## Features
//!
//! - **Scoped Singletons**: one cached instance per token per scope
//! - **Parent Chains**: child scopes share singletons an ancestor already
//!   materialized, never duplicating them
//! - **Overrides**: swap any token's provider per scope, first match wins
//! - **Multi-Providers**: aggregate a fixed provider list behind one token
//! - **Cycle Detection**: re-entrant construction fails fast instead of
//!   overflowing the stack
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use wirebox::{DepList, Provide, Registry, Result, Scope, ScopeOptions, Token};
//!
//! struct Config {
//!     greeting: &'static str,
//! }
//! impl Provide for Config {
//!     fn build(_deps: &mut DepList) -> Result<Self> {
//!         Ok(Config { greeting: "hello" })
//!     }
//! }
//!
//! struct Greeter {
//!     config: Arc<Config>,
//! }
//! impl Provide for Greeter {
//!     fn deps() -> Vec<Token> {
//!         vec![Token::of::<Config>()]
//!     }
//!     fn build(deps: &mut DepList) -> Result<Self> {
//!         Ok(Greeter {
//!             config: deps.take::<Config>()?,
//!         })
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let registry = Registry::builder()
//!         .provide::<Config>()
//!         .provide::<Greeter>()
//!         .build();
//!     let scope = Scope::root(registry, ScopeOptions::new())?;
//!
//!     let greeter = scope.get::<Greeter>()?;
//!     assert_eq!(greeter.config.greeting, "hello");
//!
//!     // Repeated gets return the same singleton.
//!     assert!(Arc::ptr_eq(&greeter, &scope.get::<Greeter>()?));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The workspace follows a layered arrangement:
//!
//! - `domain` - tokens, descriptors, dependency handles, error taxonomy
//! - `resolver` - provider registry, injector scopes, multi-provider
//!   aggregation, bootstrap sequencing

/// Domain layer - tokens, descriptors, and resolution errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wirebox_domain::*;
}

/// Resolution layer - registries, scopes, and aggregation
///
/// Re-exports from the resolver crate for convenience
pub mod resolver {
    pub use wirebox_resolver::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::{
    DepList, Descriptor, Error, Factory, Instance, Multi, OverrideEntry, Provide, Result, Token,
};
pub use wirebox_domain::ports::ChangeNotifier;

// Re-export the resolution surface at the crate root
pub use resolver::{
    NullChangeNotifier, PROVIDERS, ProviderEntry, Registry, RegistryBuilder, Scope, ScopeOptions,
    list_providers, multi, multi_descriptor,
};
