//! One-shot device metadata query (`evrec info`).
//!
//! Standalone: nothing here touches the capture/replay data path.

use anyhow::{Context, Result};
use evdev::Device;

/// Print name and physical location for each device path.
pub fn run(paths: &[String]) -> Result<()> {
    for path in paths {
        let dev = Device::open(path).with_context(|| format!("open({path}) failed"))?;
        if let Some(name) = dev.name() {
            println!("{path} - device name : {name}");
        }
        if let Some(phys) = dev.physical_path() {
            println!("{path} - physical location : {phys}");
        }
    }
    Ok(())
}
