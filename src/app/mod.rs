pub mod scope;
pub mod search;
pub mod settings;
