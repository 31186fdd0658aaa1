pub mod config;
pub mod contact;
pub mod error;

pub use config::{ClientConfig, DatabaseConfig, PhonebookConfig, ServerSection};
pub use contact::{Contact, NewContact};
pub use error::{PhonebookError, Result};
