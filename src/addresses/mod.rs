//! Address book: rule sets, records and HTTP handlers

pub mod handlers;
pub mod model;
pub mod rules;

pub use handlers::AddressState;
pub use model::{Address, AddressPatch, NewAddress};
pub use rules::{CreateAddress, UpdateAddress};
