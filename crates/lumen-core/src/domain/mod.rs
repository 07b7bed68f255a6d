//! Domain records shared by the guards.

mod identity;

pub use identity::PromptIdentity;
