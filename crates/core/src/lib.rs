#![forbid(unsafe_code)]

pub mod clock;
pub mod migrations;
pub mod model;

/// Schema version written by the current save path. Bumped together with a new
/// entry in `migrations::MIGRATIONS`.
pub const BOARD_VERSION: &str = "0.2";

/// File extension (without the dot) carried by board files on disk.
pub const BOARD_EXTENSION: &str = "knbn";

/// Default file name used when a caller does not name a board file.
pub const DEFAULT_BOARD_FILE: &str = ".knbn";
