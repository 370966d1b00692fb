#[cfg(not(target_os = "linux"))]
compile_error!("evrec reads /dev/input/event* devices and only works on Linux");

mod cli;
mod codec;
mod error;
mod info;
mod logging;
mod names;
mod raw;
mod record;
mod registry;
mod replay;

fn main() -> anyhow::Result<()> {
    logging::init();
    cli::run()
}
