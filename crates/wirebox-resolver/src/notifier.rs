//! Null change notifier
//!
//! Default implementation of the `ChangeNotifier` port that drops every
//! signal. Rendering collaborators override the `dyn ChangeNotifier`
//! token in their own scope with an implementation that actually
//! schedules a refresh; everything below the presentation layer keeps
//! working against the null default.

use wirebox_domain::ports::ChangeNotifier;
use wirebox_domain::{DepList, Descriptor, Provide, Result};

use crate::registry::{PROVIDERS, ProviderEntry};

/// Change notifier that ignores every signal
#[derive(Debug, Clone, Default)]
pub struct NullChangeNotifier;

impl NullChangeNotifier {
    /// Create a new null change notifier
    pub fn new() -> Self {
        Self
    }

    /// Capability descriptor binding this type to `dyn ChangeNotifier`
    pub fn descriptor() -> Descriptor {
        Descriptor::bind::<dyn ChangeNotifier, NullChangeNotifier>(|notifier| notifier)
    }
}

impl ChangeNotifier for NullChangeNotifier {
    fn notify(&self) {
        // Nothing listens.
    }
}

impl Provide for NullChangeNotifier {
    fn build(_deps: &mut DepList) -> Result<Self> {
        Ok(Self::new())
    }
}

#[linkme::distributed_slice(PROVIDERS)]
static NULL_NOTIFIER: ProviderEntry = ProviderEntry {
    name: "null-notifier",
    description: "Change notifier that drops every signal",
    descriptor: NullChangeNotifier::descriptor,
};
