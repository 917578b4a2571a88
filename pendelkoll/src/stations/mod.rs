//! Station signature → display name lookup.
//!
//! The directory is static configuration: a built-in table for the
//! commuter corridor, optionally extended from the config file.

mod directory;

pub use directory::StationDirectory;
