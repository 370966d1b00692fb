use anyhow::{Result, anyhow};
use pico_args::Arguments;
use std::env;

use crate::{info, record, replay};

pub fn run() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // No args -> general help
    if env::args().len() == 1 {
        print_help();
        return Ok(());
    }

    // Flags-based help (-h/--help)
    if pargs.contains("-h") || pargs.contains("--help") {
        print_help();
        return Ok(());
    }

    // First free arg is the subcommand
    let subcmd: Option<String> = pargs.free_from_str().ok();

    match subcmd.as_deref() {
        Some("help") => {
            let topic: Option<String> = pargs.free_from_str().ok();
            if let Some(t) = topic {
                print_subcmd_help(&t);
            } else {
                print_help();
            }
            Ok(())
        }

        Some("record") => {
            let paths = free_paths(pargs);
            if paths.is_empty() {
                return Err(anyhow!("usage: evrec record <device>..."));
            }
            record::run(&paths)?;
            Ok(())
        }

        Some("play") => {
            replay::run()?;
            Ok(())
        }

        Some("info") => {
            let paths = free_paths(pargs);
            if paths.is_empty() {
                return Err(anyhow!("usage: evrec info <device>..."));
            }
            info::run(&paths)
        }

        Some(other) => {
            eprintln!("unknown subcommand: {other}\n");
            print_help();
            Ok(())
        }

        None => {
            print_help();
            Ok(())
        }
    }
}

fn free_paths(pargs: Arguments) -> Vec<String> {
    pargs
        .finish()
        .into_iter()
        .map(|s| s.to_string_lossy().into_owned())
        .collect()
}

fn print_help() {
    println!(
        r#"evrec — record and replay Linux input device events

USAGE:
  evrec record <device>...   Capture events; log lines stream to stdout
  evrec play                 Replay a log from stdin with original timing
  evrec info <device>...     Print device name and physical location
  evrec help [command]       Show general or command-specific help

A log line looks like:
  /dev/input/event0:    +0.016000, type 0x0001, code 0x0002, value 0x00000001, # KEY

TIPS:
  - Reading /dev/input/event* needs the 'input' group or root.
  - Recording runs until killed; replay exits at end of input.
  - The offsets are relative, so a log replays from any starting time.
"#
    );
}

fn print_subcmd_help(cmd: &str) {
    match cmd {
        "record" => println!(
            "usage: evrec record <device>...\nCaptures events from every listed device until killed.\nLog lines go to stdout, diagnostics to stderr."
        ),
        "play" => println!(
            "usage: evrec play < session.log\nReplays a captured log from stdin, opening target devices\nas their paths appear and reconstructing the original timing."
        ),
        "info" => println!(
            "usage: evrec info <device>...\nPrints each device's name and physical location."
        ),
        _ => {
            eprintln!("unknown command: {cmd}\n");
            print_help();
        }
    }
}
