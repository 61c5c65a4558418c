pub mod company;
#[cfg(feature = "server")]
pub mod config;
pub mod employee;
pub mod user;
