#![forbid(unsafe_code)]

pub mod actions;
pub mod backup;
pub mod board_files;
pub mod migrate;

mod error;

pub use error::StoreError;
