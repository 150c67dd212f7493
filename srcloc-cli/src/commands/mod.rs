//! Command implementations for the srcloc CLI

pub mod serve;
