pub mod exchange;
pub mod serve;
