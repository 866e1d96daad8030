//! Error types for console setup.
//!
//! Only construction-time operations fail. Everything the console does
//! per service tick is absorbed locally.

use thiserror::Error;

/// Console setup error.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("failed to bind telnet port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
