//! Remapping of the logical user data namespace onto a delegate provider.

pub mod translator;
pub mod provider;

#[cfg(test)]
mod spy;

pub use translator::PathTranslator;
pub use provider::UserDataFileSystemProvider;
