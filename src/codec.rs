//! Text log line encode/decode.
//!
//! One event per line, newline-terminated:
//!
//! ```text
//! <device>: +<secs>.<usecs>, type 0x<hex4>, code 0x<hex4>, value 0x<hex8>, # <note>
//! ```
//!
//! The offset is relative to the previous line's event (or to the session
//! epoch for the first line). Relative offsets are what make a log
//! replayable from any wall-clock starting point, independent of when it
//! was captured.

use crate::error::{Error, Result};

/// One decoded log line: the raw event fields plus the owning device path
/// and the inter-event offset in microseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub device: String,
    pub offset_us: u64,
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

/// Render one log line. The offset column is right-aligned to keep logs
/// scannable; decode treats the padding as insignificant whitespace.
pub fn encode(rec: &LogRecord, note: &str) -> String {
    let offset = format!("+{}.{:06}", rec.offset_us / 1_000_000, rec.offset_us % 1_000_000);
    format!(
        "{}: {:>12}, type {:#06x}, code {:#06x}, value {:#010x}, # {}",
        rec.device, offset, rec.event_type, rec.code, rec.value as u32, note
    )
}

/// Parse one log line. Whitespace-tolerant; hex fields accept an optional
/// `0x` prefix; anything after the value's trailing comma is ignored.
///
/// A malformed line means the log itself is corrupt, so every failure here
/// is fatal to the run.
pub fn decode(line: &str) -> Result<LogRecord> {
    let fail = |reason: &'static str| Error::Parse {
        reason,
        line: line.to_string(),
    };

    let (device, rest) = line.split_once(':').ok_or_else(|| fail("missing device separator"))?;

    // time, type, code, value; the fifth chunk (annotation) is ignored
    let mut fields = rest.splitn(5, ',');

    let offset = fields.next().ok_or_else(|| fail("missing offset"))?.trim();
    let offset = offset
        .strip_prefix('+')
        .ok_or_else(|| fail("offset must start with '+'"))?;
    let (secs, usecs) = offset.split_once('.').ok_or_else(|| fail("offset missing '.'"))?;
    let secs: u64 = secs.parse().map_err(|_| fail("bad offset seconds"))?;
    let usecs: u64 = usecs.parse().map_err(|_| fail("bad offset microseconds"))?;
    if usecs >= 1_000_000 {
        return Err(fail("offset microseconds out of range"));
    }

    let event_type = keyed_hex(fields.next(), "type").ok_or_else(|| fail("bad type field"))?;
    let code = keyed_hex(fields.next(), "code").ok_or_else(|| fail("bad code field"))?;
    let value = keyed_hex(fields.next(), "value").ok_or_else(|| fail("bad value field"))?;

    Ok(LogRecord {
        device: device.to_string(),
        offset_us: secs * 1_000_000 + usecs,
        event_type: u16::try_from(event_type).map_err(|_| fail("type out of range"))?,
        code: u16::try_from(code).map_err(|_| fail("code out of range"))?,
        value: u32::try_from(value).map_err(|_| fail("value out of range"))? as i32,
    })
}

/// Parse a `<key> <hex>` field, e.g. " type 0x0001".
fn keyed_hex(field: Option<&str>, key: &str) -> Option<u64> {
    let s = field?.trim().strip_prefix(key)?.trim_start();
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).ok()
}
