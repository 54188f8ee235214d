pub mod error;

pub mod assertion;
pub mod client;
pub mod delivery;
pub mod profile;
pub mod run;

pub mod cmd;

#[cfg(test)]
pub(crate) mod dev;
