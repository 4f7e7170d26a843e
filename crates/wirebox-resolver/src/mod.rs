//! Resolution layer for Wirebox
//!
//! Turns registered provider descriptors into constructed object graphs:
//!
//! ```text
//! linkme PROVIDERS ─┐
//!                   ├─▶ Registry ──▶ Scope (cache, overrides, parent)
//! RegistryBuilder ──┘                   │
//!                                       ▼
//!                          get / create / has / bootstrap
//! ```
//!
//! A `Registry` maps tokens to immutable descriptors; a `Scope` resolves
//! tokens against that registry with per-scope singleton caching, override
//! precedence across the parent chain, eager bootstrap, and cycle
//! detection.

pub mod multi;
pub mod notifier;
pub mod registry;
pub mod scope;

pub use multi::{multi, multi_descriptor};
pub use notifier::NullChangeNotifier;
pub use registry::{PROVIDERS, ProviderEntry, Registry, RegistryBuilder, list_providers};
pub use scope::{Scope, ScopeOptions};
