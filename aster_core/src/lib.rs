pub mod aster;
pub mod config;
pub mod error;
pub mod helpers;
pub mod market;
pub mod snapshot;
pub mod wallet;
