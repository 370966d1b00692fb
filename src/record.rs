//! Multiplexed capture: poll every source device, read ready events, emit
//! one log line per event with its offset from the previous event.

use std::io::Write;
use std::os::fd::AsRawFd;

use log::info;

use crate::codec::{self, LogRecord};
use crate::error::{Error, Result};
use crate::names;
use crate::raw;
use crate::registry::{DeviceRegistry, Mode};

/// Offsets between consecutive events, pooled across all devices.
///
/// The first observed event is its own baseline, so the first emitted
/// offset is exactly zero. Kernel timestamps are not ordered across
/// devices; a backward step between devices clamps to zero rather than
/// producing a negative offset.
#[derive(Debug, Default)]
pub struct OffsetTracker {
    last_us: Option<i64>,
}

impl OffsetTracker {
    /// Microseconds since the previous event's kernel timestamp.
    pub fn offset_from(&mut self, time_us: i64) -> u64 {
        let last = self.last_us.replace(time_us).unwrap_or(time_us);
        time_us.saturating_sub(last).max(0) as u64
    }
}

/// Capture engine: a fixed device set, one offset tracker, one output
/// stream. All state lives here; nothing is process-global.
pub struct Recorder<W: Write> {
    registry: DeviceRegistry,
    tracker: OffsetTracker,
    out: W,
}

impl<W: Write> Recorder<W> {
    /// Open every source device up front, in argument order. That order is
    /// also the service order when several devices wake at once.
    pub fn new(paths: &[String], out: W) -> Result<Self> {
        let mut registry = DeviceRegistry::new(Mode::Read);
        for path in paths {
            registry.resolve(path)?;
        }
        Ok(Self {
            registry,
            tracker: OffsetTracker::default(),
            out,
        })
    }

    /// Capture until a device fails. There is no clean shutdown: a capture
    /// run is expected to end by being killed.
    pub fn run(&mut self) -> Result<()> {
        info!("recording from {} device(s)", self.registry.len());
        loop {
            self.poll_once()?;
        }
    }

    /// One readiness cycle: wait indefinitely for any device, then service
    /// every ready device in registration order.
    fn poll_once(&mut self) -> Result<()> {
        let mut fds: Vec<libc::pollfd> = self
            .registry
            .entries()
            .iter()
            .map(|e| libc::pollfd {
                fd: e.file.as_raw_fd(),
                events: libc::POLLIN,
                revents: 0,
            })
            .collect();

        let rc = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, -1) };
        if rc < 0 {
            return Err(Error::Poll(std::io::Error::last_os_error()));
        }

        for (idx, pfd) in fds.iter().enumerate() {
            if pfd.revents & (libc::POLLERR | libc::POLLHUP | libc::POLLNVAL) != 0 {
                return Err(Error::DeviceGone {
                    path: self.registry.entries()[idx].path.clone(),
                    revents: pfd.revents,
                });
            }
            if pfd.revents & libc::POLLIN != 0 {
                self.emit_one(idx)?;
            }
        }
        Ok(())
    }

    /// Read one event record from the device at `idx` and emit its line.
    fn emit_one(&mut self, idx: usize) -> Result<()> {
        let entry = self.registry.entry_mut(idx);
        let path = entry.path.clone();
        let ev = raw::read_event(&mut entry.file, &path)?;

        let rec = LogRecord {
            device: path,
            offset_us: self.tracker.offset_from(raw::event_time_us(&ev)),
            event_type: ev.type_,
            code: ev.code,
            value: ev.value,
        };
        let note = names::describe(rec.event_type, rec.code);
        writeln!(self.out, "{}", codec::encode(&rec, &note))?;
        // live log: flush per line so a tail sees events as they happen
        self.out.flush()?;
        Ok(())
    }
}

pub fn run(paths: &[String]) -> Result<()> {
    Recorder::new(paths, std::io::stdout().lock())?.run()
}
