// Abacus Command Modules
//
// Each sub-module is a thin Tauri command wrapper.
// Heavy logic lives in engine/ modules; these functions
// only deserialise, delegate, and serialise.

pub mod accounting;
pub mod chat;
pub mod config;
pub mod faq;
pub mod invoice;
