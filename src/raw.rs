//! Raw `struct input_event` I/O on device file handles.
//!
//! The kernel hands out (and accepts) whole fixed-size records; anything
//! shorter is a protocol violation, not a condition to retry.

use std::fs::File;
use std::io::{Read, Write};
use std::{mem, slice};

use crate::error::{Error, Result};

/// Size of one kernel event record on this architecture.
pub const EVENT_SIZE: usize = mem::size_of::<libc::input_event>();

/// Kernel timestamp of an event, in microseconds since the Unix epoch.
pub fn event_time_us(ev: &libc::input_event) -> i64 {
    ev.time.tv_sec as i64 * 1_000_000 + ev.time.tv_usec as i64
}

/// Build a `timeval` from microseconds since the Unix epoch.
pub fn timeval_from_us(us: i64) -> libc::timeval {
    libc::timeval {
        tv_sec: (us / 1_000_000) as libc::time_t,
        tv_usec: (us % 1_000_000) as libc::suseconds_t,
    }
}

/// Read exactly one event record from `file`.
pub fn read_event(file: &mut File, path: &str) -> Result<libc::input_event> {
    let mut ev: libc::input_event = unsafe { mem::zeroed() };
    // input_event is plain old data; viewing it as bytes is sound.
    let buf = unsafe {
        slice::from_raw_parts_mut(&mut ev as *mut libc::input_event as *mut u8, EVENT_SIZE)
    };
    let got = file.read(buf).map_err(|source| Error::Read {
        path: path.to_string(),
        source,
    })?;
    if got != EVENT_SIZE {
        return Err(Error::ShortRead {
            path: path.to_string(),
            got,
            expected: EVENT_SIZE,
        });
    }
    Ok(ev)
}

/// Write exactly one event record to `file`.
pub fn write_event(file: &mut File, path: &str, ev: &libc::input_event) -> Result<()> {
    let buf =
        unsafe { slice::from_raw_parts(ev as *const libc::input_event as *const u8, EVENT_SIZE) };
    let got = file.write(buf).map_err(|source| Error::Write {
        path: path.to_string(),
        source,
    })?;
    if got != EVENT_SIZE {
        return Err(Error::ShortWrite {
            path: path.to_string(),
            got,
            expected: EVENT_SIZE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use std::path::PathBuf;

    fn scratch(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("evrec-raw-{}-{}", std::process::id(), tag))
    }

    fn event(sec: i64, usec: i64, ty: u16, code: u16, value: i32) -> libc::input_event {
        libc::input_event {
            time: libc::timeval {
                tv_sec: sec as libc::time_t,
                tv_usec: usec as libc::suseconds_t,
            },
            type_: ty,
            code,
            value,
        }
    }

    #[test]
    fn test_event_time_us() {
        let ev = event(3, 250_000, 0, 0, 0);
        assert_eq!(event_time_us(&ev), 3_250_000);
    }

    #[test]
    fn test_timeval_from_us() {
        let tv = timeval_from_us(1_700_000_000_123_456);
        assert_eq!(tv.tv_sec, 1_700_000_000);
        assert_eq!(tv.tv_usec, 123_456);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let path = scratch("roundtrip");
        let mut f = File::create(&path).unwrap();
        let ev = event(7, 16_000, 0x01, 0x02, -1);
        write_event(&mut f, "scratch", &ev).unwrap();

        let mut f = OpenOptions::new().read(true).open(&path).unwrap();
        let back = read_event(&mut f, "scratch").unwrap();
        assert_eq!(back.time.tv_sec, 7);
        assert_eq!(back.time.tv_usec, 16_000);
        assert_eq!(back.type_, 0x01);
        assert_eq!(back.code, 0x02);
        assert_eq!(back.value, -1);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_short_read_is_fatal() {
        let path = scratch("short");
        std::fs::write(&path, [0u8; 5]).unwrap();

        let mut f = OpenOptions::new().read(true).open(&path).unwrap();
        let err = read_event(&mut f, "scratch").map(|_| ()).unwrap_err();
        match err {
            Error::ShortRead { got, expected, .. } => {
                assert_eq!(got, 5);
                assert_eq!(expected, EVENT_SIZE);
            }
            other => panic!("expected short read, got {other:?}"),
        }

        std::fs::remove_file(&path).unwrap();
    }
}
