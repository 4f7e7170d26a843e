//! Collaborator-facing ports
//!
//! Capability traits that presentation layers depend on through the same
//! override mechanism as any other dependency. The resolver itself never
//! calls these; it only constructs and hands out instances on request.

pub mod notifier;

pub use notifier::ChangeNotifier;
