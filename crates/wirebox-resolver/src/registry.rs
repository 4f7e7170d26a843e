//! Provider registry
//!
//! Static registration of provider descriptors, performed before any
//! scope is constructed. Two registration paths feed the same map:
//!
//! - `RegistryBuilder` for explicit composition-root registration
//! - the `PROVIDERS` linkme distributed slice for providers that
//!   auto-register at compile time
//!
//! Registration-time duplicates follow last-wins: a later descriptor for
//! the same token replaces the earlier one. This is distinct from the
//! override-table policy, where the first declared match wins.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};
use wirebox_domain::{DepList, Descriptor, Instance, Provide, Result, Token};

use crate::multi::multi_descriptor;

/// Registry entry for auto-registered providers
///
/// Providers submit entries via
/// `#[linkme::distributed_slice(PROVIDERS)]`; each entry carries metadata
/// and a function producing the provider's descriptor.
pub struct ProviderEntry {
    /// Unique provider name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Function producing the provider's descriptor
    pub descriptor: fn() -> Descriptor,
}

// Auto-collection via linkme distributed slices - providers submit entries at compile time
#[linkme::distributed_slice]
pub static PROVIDERS: [ProviderEntry] = [..];

/// List all auto-registered providers
///
/// Returns (name, description) tuples for every entry in the `PROVIDERS`
/// slice. Useful for diagnostics and composition-root logging.
pub fn list_providers() -> Vec<(&'static str, &'static str)> {
    PROVIDERS.iter().map(|e| (e.name, e.description)).collect()
}

/// Immutable token-to-descriptor mapping shared by a scope chain
#[derive(Clone, Default)]
pub struct Registry {
    providers: HashMap<Token, Descriptor>,
}

impl Registry {
    /// Start an empty registry builder
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry from the linkme `PROVIDERS` slice alone
    pub fn from_linked() -> Self {
        Self::builder().linked().build()
    }

    /// Descriptor registered for a token, if any
    pub fn get(&self, token: Token) -> Option<&Descriptor> {
        self.providers.get(&token)
    }

    /// True if a descriptor is registered for the token
    pub fn contains(&self, token: Token) -> bool {
        self.providers.contains_key(&token)
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("providers", &self.providers.len())
            .finish()
    }
}

/// Builder collecting descriptors into a `Registry`
#[derive(Default)]
pub struct RegistryBuilder {
    providers: HashMap<Token, Descriptor>,
}

impl RegistryBuilder {
    /// Register a concrete `Provide` type under its own token
    pub fn provide<T: Provide>(self) -> Self {
        self.descriptor(Descriptor::of::<T>())
    }

    /// Register a capability binding: `T` provides the `dyn Trait` token
    ///
    /// The `coerce` argument is the unsizing step; an identity closure is
    /// enough (`|t| t`).
    pub fn bind<I, T>(self, coerce: fn(Arc<T>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        T: Provide,
    {
        self.descriptor(Descriptor::bind::<I, T>(coerce))
    }

    /// Register a bare factory under an explicit token
    pub fn factory<F>(self, token: Token, deps: Vec<Token>, factory: F) -> Self
    where
        F: Fn(&mut DepList) -> Result<Instance> + Send + Sync + 'static,
    {
        self.descriptor(Descriptor::from_factory(token, deps, factory))
    }

    /// Register a multi-provider aggregate under `token`
    ///
    /// Resolving `token` yields a `Multi` collecting the member
    /// instances in declaration order.
    pub fn multi(self, token: Token, members: Vec<Token>) -> Self {
        self.descriptor(multi_descriptor(token, members))
    }

    /// Register a prebuilt descriptor under its own token
    pub fn descriptor(mut self, descriptor: Descriptor) -> Self {
        let token = descriptor.token();
        if self.providers.insert(token, descriptor).is_some() {
            debug!(token = token.name(), "replacing earlier registration");
        }
        self
    }

    /// Merge every entry from the linkme `PROVIDERS` slice
    pub fn linked(mut self) -> Self {
        for entry in PROVIDERS {
            let descriptor = (entry.descriptor)();
            debug!(
                provider = entry.name,
                token = descriptor.token().name(),
                "collected linked provider"
            );
            self = self.descriptor(descriptor);
        }
        self
    }

    /// Finish the registry
    pub fn build(self) -> Registry {
        info!(providers = self.providers.len(), "built provider registry");
        Registry {
            providers: self.providers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirebox_domain::Error;

    struct Alpha;
    impl Provide for Alpha {
        fn build(_deps: &mut DepList) -> Result<Self> {
            Ok(Alpha)
        }
    }

    #[test]
    fn test_builder_registers_under_the_provide_token() {
        let registry = Registry::builder().provide::<Alpha>().build();

        assert!(registry.contains(Token::of::<Alpha>()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_replaces_the_earlier_descriptor() {
        let replacement = Descriptor::from_factory(Token::of::<Alpha>(), Vec::new(), |_| {
            Err(Error::internal("replacement wins"))
        });

        let registry = Registry::builder()
            .provide::<Alpha>()
            .descriptor(replacement)
            .build();

        assert_eq!(registry.len(), 1);
        let descriptor = registry.get(Token::of::<Alpha>()).unwrap();
        let err = descriptor
            .produce(&mut DepList::new())
            .err()
            .expect("replacement factory must fail");
        assert!(err.to_string().contains("replacement wins"));
    }

    #[test]
    fn test_linked_collects_the_distributed_slice() {
        // The null change notifier registers itself in this crate.
        let registry = Registry::from_linked();

        assert!(registry.contains(Token::of::<dyn wirebox_domain::ports::ChangeNotifier>()));
    }

    #[test]
    fn test_list_providers_includes_the_null_notifier() {
        let names: Vec<&str> = list_providers().iter().map(|(name, _)| *name).collect();
        assert!(
            names.contains(&"null-notifier"),
            "registered providers: {:?}",
            names
        );
    }
}
