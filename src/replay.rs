//! Replay scheduler: read log lines sequentially, rebuild each event's
//! absolute dispatch time from the epoch plus accumulated offsets, and
//! write the event to its target device at that time.

use std::io::BufRead;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::codec;
use crate::error::Result;
use crate::raw;
use crate::registry::{DeviceRegistry, Mode};

/// Absolute playback schedule built from relative log offsets.
///
/// Each target is the epoch plus the exact sum of offsets seen so far.
/// Targets never depend on when the previous wait actually returned, so
/// per-wait overruns do not compound into drift.
#[derive(Debug, Default)]
pub struct VirtualClock {
    target: Option<SystemTime>,
}

impl VirtualClock {
    /// Advance the schedule by `offset` and return the new target. The
    /// first call establishes the epoch as `now + offset`.
    pub fn advance(&mut self, now: SystemTime, offset: Duration) -> SystemTime {
        let target = match self.target {
            Some(prev) => prev + offset,
            None => now + offset,
        };
        self.target = Some(target);
        target
    }

    /// Remaining wait from `now` until the current target. Zero when the
    /// target is already past: late events dispatch immediately, with no
    /// catch-up correction.
    pub fn wait_from(&self, now: SystemTime) -> Duration {
        match self.target {
            Some(target) => target.duration_since(now).unwrap_or(Duration::ZERO),
            None => Duration::ZERO,
        }
    }
}

/// Replay engine: the virtual clock plus the lazily-grown target registry.
pub struct Player {
    registry: DeviceRegistry,
    clock: VirtualClock,
}

impl Player {
    pub fn new() -> Self {
        Self {
            registry: DeviceRegistry::new(Mode::Write),
            clock: VirtualClock::default(),
        }
    }

    /// Replay every line from `input`. Clean end-of-stream is the only
    /// non-error exit; line order is dispatch order.
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        for line in input.lines() {
            self.step(&line?)?;
        }
        Ok(())
    }

    fn step(&mut self, line: &str) -> Result<()> {
        let rec = codec::decode(line)?;
        let idx = self.registry.resolve(&rec.device)?;

        let now = SystemTime::now();
        let target = self.clock.advance(now, Duration::from_micros(rec.offset_us));
        let wait = self.clock.wait_from(now);
        if !wait.is_zero() {
            thread::sleep(wait);
        }

        let target_us = target
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as i64)
            .unwrap_or(0);
        let ev = libc::input_event {
            // the reconstructed absolute timestamp, not the captured one
            time: raw::timeval_from_us(target_us),
            type_: rec.event_type,
            code: rec.code,
            value: rec.value,
        };

        let entry = self.registry.entry_mut(idx);
        raw::write_event(&mut entry.file, &rec.device, &ev)
    }
}

pub fn run() -> Result<()> {
    Player::new().run(std::io::stdin().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn scratch(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("evrec-replay-{}-{}", std::process::id(), tag))
    }

    #[test]
    fn test_schedule_anchors_to_epoch_not_wake_times() {
        let mut clock = VirtualClock::default();
        let epoch = UNIX_EPOCH + Duration::from_secs(1_000);

        assert_eq!(clock.advance(epoch, Duration::ZERO), epoch);

        // every simulated wake overruns badly; targets must not care
        let late = epoch + Duration::from_millis(170);
        assert_eq!(
            clock.advance(late, Duration::from_millis(100)),
            epoch + Duration::from_millis(100)
        );

        let later = epoch + Duration::from_secs(9);
        assert_eq!(
            clock.advance(later, Duration::from_millis(400)),
            epoch + Duration::from_millis(500)
        );
    }

    #[test]
    fn test_wait_is_exact_remaining_difference() {
        let mut clock = VirtualClock::default();
        let epoch = UNIX_EPOCH + Duration::from_secs(1_000);
        clock.advance(epoch, Duration::from_millis(500));
        assert_eq!(
            clock.wait_from(epoch + Duration::from_millis(120)),
            Duration::from_millis(380)
        );
    }

    #[test]
    fn test_late_target_waits_zero() {
        let mut clock = VirtualClock::default();
        let epoch = UNIX_EPOCH + Duration::from_secs(1_000);
        clock.advance(epoch, Duration::from_millis(10));
        assert_eq!(
            clock.wait_from(epoch + Duration::from_secs(2)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_replay_writes_events_to_lazily_opened_target() {
        let path = scratch("target");
        std::fs::write(&path, []).unwrap();
        let path_str = path.to_str().unwrap().to_string();

        let log = format!(
            "{p}: +0.000000, type 0x0001, code 0x0002, value 0x00000001, # KEY\n\
             {p}: +0.000100, type 0x0000, code 0x0000, value 0x00000000, # SYN REPORT\n",
            p = path_str
        );
        let mut player = Player::new();
        player.run(Cursor::new(log)).unwrap();

        // both lines share one handle
        assert_eq!(player.registry.len(), 1);

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written.len(), 2 * raw::EVENT_SIZE);
        let first: libc::input_event =
            unsafe { std::ptr::read_unaligned(written.as_ptr() as *const libc::input_event) };
        let second: libc::input_event = unsafe {
            std::ptr::read_unaligned(written[raw::EVENT_SIZE..].as_ptr() as *const libc::input_event)
        };
        assert_eq!(first.type_, 0x01);
        assert_eq!(first.code, 0x02);
        assert_eq!(first.value, 1);
        assert_eq!(second.type_, 0x00);
        // reconstructed timestamps advance by the logged offset
        assert_eq!(
            raw::event_time_us(&second) - raw::event_time_us(&first),
            100
        );

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_line_aborts_after_prior_writes() {
        let path = scratch("abort");
        std::fs::write(&path, []).unwrap();
        let path_str = path.to_str().unwrap().to_string();

        let log = format!(
            "{p}: +0.000000, type 0x0001, code 0x0002, value 0x00000001,\n\
             this line has no device separator\n",
            p = path_str
        );
        let mut player = Player::new();
        let err = player.run(Cursor::new(log)).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));

        // the first line was already dispatched; no rollback
        let written = std::fs::read(&path).unwrap();
        assert_eq!(written.len(), raw::EVENT_SIZE);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_end_of_stream_is_clean_exit() {
        let mut player = Player::new();
        player.run(Cursor::new(String::new())).unwrap();
        assert!(player.registry.is_empty());
    }
}
