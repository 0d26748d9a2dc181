//! Bounded waits for piped input.

use std::io::{self, ErrorKind, Read};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::{Error, Result};

/// Read once from `reader`, giving up after `timeout`.
///
/// At most `buf_size` bytes are returned; end of input yields an empty
/// buffer. The read runs on a helper thread which keeps waiting on
/// `reader` after a timeout.
pub fn read_with_timeout<R>(mut reader: R, buf_size: usize, timeout: Duration) -> Result<Vec<u8>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(1);

    thread::Builder::new()
        .name("satchel-stdin".into())
        .spawn(move || {
            let mut buf = vec![0u8; buf_size];
            let result = loop {
                match reader.read(&mut buf) {
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    other => break other,
                }
            };
            let _ = tx.send(result.map(|n| {
                buf.truncate(n);
                buf
            }));
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => Ok(result?),
        Err(RecvTimeoutError::Timeout) => Err(Error::Timeout(timeout)),
        Err(RecvTimeoutError::Disconnected) => Err(Error::ReaderGone),
    }
}

pub fn read_stdin_with_timeout(buf_size: usize, timeout: Duration) -> Result<Vec<u8>> {
    read_with_timeout(io::stdin(), buf_size, timeout)
}
