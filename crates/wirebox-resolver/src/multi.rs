//! Multi-provider aggregation
//!
//! Synthesizes a descriptor that resolves a fixed list of sibling
//! providers into one ordered sequence behind a single aggregate token.
//! Consumers depend on the aggregate token like any other dependency and
//! never learn the concrete member count - the plugin/middleware-chain
//! case.
//!
//! Members resolve through the owning scope's `get`, so they stay shared
//! singletons: depending on both the aggregate and an individual member
//! yields the same instance.

use std::sync::Arc;

use wirebox_domain::{Descriptor, Instance, Multi, OverrideEntry, Token};

/// Descriptor resolving `members` into an ordered `Multi` bound to `token`
///
/// Registry-level form: lets a composition root register the aggregate
/// directly instead of overriding it per scope.
pub fn multi_descriptor(token: Token, members: Vec<Token>) -> Descriptor {
    Descriptor::from_factory(token, members, |handles| {
        let mut items = Vec::with_capacity(handles.remaining());
        while handles.remaining() > 0 {
            items.push(handles.take_raw()?);
        }
        let aggregate: Instance = Arc::new(Multi::new(items));
        Ok(aggregate)
    })
}

/// Synthetic override binding `members` to the aggregate `token`
///
/// # Example
///
/// ```
/// use wirebox_domain::{DepList, Provide, Result, Token};
/// use wirebox_resolver::{multi, Registry, Scope, ScopeOptions};
///
/// struct First;
/// impl Provide for First {
///     fn build(_deps: &mut DepList) -> Result<Self> {
///         Ok(First)
///     }
/// }
///
/// struct Second;
/// impl Provide for Second {
///     fn build(_deps: &mut DepList) -> Result<Self> {
///         Ok(Second)
///     }
/// }
///
/// struct Plugins;
///
/// # fn main() -> Result<()> {
/// let registry = Registry::builder().provide::<First>().provide::<Second>().build();
/// let scope = Scope::root(
///     registry,
///     ScopeOptions::new().with_override(multi(
///         Token::of::<Plugins>(),
///         vec![Token::of::<First>(), Token::of::<Second>()],
///     )),
/// )?;
///
/// let plugins = scope.get_multi(Token::of::<Plugins>())?;
/// assert_eq!(plugins.len(), 2);
/// # Ok(())
/// # }
/// ```
pub fn multi(token: Token, members: Vec<Token>) -> OverrideEntry {
    OverrideEntry::new(token, multi_descriptor(token, members))
}
