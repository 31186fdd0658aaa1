//! Command implementations for phonebook CLI

pub mod contacts;
pub mod serve;

pub use contacts::run_contacts;
pub use serve::run_serve;
