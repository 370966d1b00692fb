use std::io;

use thiserror::Error;

/// Fatal I/O and parse failures. Nothing here is retried or recovered:
/// every variant aborts the run, so a flaky device or a corrupted log is
/// reported instead of silently skewing the recorded timing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("open({path}) failed: {source}")]
    Open { path: String, source: io::Error },

    #[error("poll() failed: {0}")]
    Poll(#[source] io::Error),

    #[error("poll reported revents {revents:#06x} for {path}")]
    DeviceGone { path: String, revents: i16 },

    #[error("read({path}) failed: {source}")]
    Read { path: String, source: io::Error },

    #[error("read({path}) returned {got} bytes, expected {expected}")]
    ShortRead {
        path: String,
        got: usize,
        expected: usize,
    },

    #[error("write({path}) failed: {source}")]
    Write { path: String, source: io::Error },

    #[error("write({path}) wrote {got} bytes, expected {expected}")]
    ShortWrite {
        path: String,
        got: usize,
        expected: usize,
    },

    #[error("malformed log line ({reason}): {line:?}")]
    Parse { reason: &'static str, line: String },

    /// Stream I/O on the log itself (stdout while recording, stdin while
    /// replaying).
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
