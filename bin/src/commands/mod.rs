//! CLI command implementations.

pub(crate) mod import;
pub(crate) mod init;
pub(crate) mod last;
pub(crate) mod list;
pub(crate) mod ohlc;
pub(crate) mod show;
