pub mod directory;
pub mod domain;
pub mod errors;
pub mod service;
