#![forbid(unsafe_code)]

pub mod board;
pub mod column;
pub mod label;
pub mod sprint;
pub mod task;
