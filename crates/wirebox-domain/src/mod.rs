//! Domain layer for Wirebox
//!
//! Core value objects and contracts for the object-graph resolver:
//! tokens, provider descriptors, dependency handles, per-scope override
//! entries, and the resolution error taxonomy.
//!
//! **ARCHITECTURE**: This crate contains ONLY identity, metadata, and
//! error types. Resolution logic (scopes, registries, caching) lives in
//! `wirebox-resolver`.

pub mod descriptor;
pub mod error;
pub mod locks;
pub mod ports;
pub mod token;

pub use descriptor::{DepList, Descriptor, Factory, Instance, Multi, OverrideEntry, Provide};
pub use error::{Error, Result};
pub use token::Token;
