// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{BrowserKind, RunConfig};
use crate::error::Result;
use crate::progress::Progress;
use crate::scrape::{self, RunSummary};

/// Scrape Quicket event listings into a CSV/TSV file.
///
/// With no arguments every setting comes from the built-in defaults.
/// The WebDriver endpoint can be changed with WEBDRIVER_URL.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "quicket_scrape", version)]
pub struct Args {
    /// Number of result pages to visit
    #[arg(short = 'n', long = "pages", value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: Option<u32>,

    /// Output file (.tsv for tab-separated)
    #[arg(short, long = "out")]
    pub out: Option<PathBuf>,

    /// firefox | chrome
    #[arg(short, long)]
    pub browser: Option<BrowserKind>,

    /// Run without a visible window (`--headless false` to show it)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub headless: Option<bool>,
}

impl Args {
    /// Defaults, then environment, then flags.
    pub fn to_config(&self) -> RunConfig {
        let mut cfg = RunConfig::for_browser(self.browser.unwrap_or_default()).with_env_overrides();
        if let Some(n) = self.pages { cfg.page_count = n; }
        if let Some(out) = &self.out { cfg.output = out.clone(); }
        if let Some(h) = self.headless { cfg.headless = h; }
        cfg
    }
}

/// Prints progress lines to stdout as they happen.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
}

pub fn run() -> Result<RunSummary> {
    let args = Args::parse();
    let config = args.to_config();
    scrape::run(&config, &mut ConsoleProgress)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("quicket_scrape").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn no_args_means_defaults() {
        let args = parse(&[]);
        assert_eq!(args, Args::default());
        let cfg = args.to_config();
        assert_eq!(cfg.page_count, 10);
        assert!(cfg.headless);
        assert_eq!(cfg.output, PathBuf::from("quicket_events.csv"));
    }

    #[test]
    fn overrides_apply() {
        let cfg = parse(&["-n", "3", "-o", "out/ev.tsv", "--browser", "chrome", "--headless", "false"]).to_config();
        assert_eq!(cfg.page_count, 3);
        assert_eq!(cfg.output, PathBuf::from("out/ev.tsv"));
        assert_eq!(cfg.browser, BrowserKind::Chrome);
        assert!(!cfg.headless);
    }

    #[test]
    fn bare_headless_flag_and_explicit_false() {
        assert!(parse(&["--headless"]).to_config().headless);
        assert!(!parse(&["--headless", "false"]).to_config().headless);
        assert!(Args::try_parse_from(["quicket_scrape", "--headed"]).is_err());
    }

    #[test]
    fn rejects_zero_pages_and_unknown_browser() {
        assert!(Args::try_parse_from(["quicket_scrape", "--pages", "0"]).is_err());
        assert!(Args::try_parse_from(["quicket_scrape", "-b", "safari"]).is_err());
    }
}
