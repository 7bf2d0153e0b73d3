// src/bin/cli.rs
use quicket_scrape::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init();

    let summary = cli::run()?;
    if summary.is_failure() {
        std::process::exit(1);
    }
    Ok(())
}
