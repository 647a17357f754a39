// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kaji",
    about = "Topic analysis and discussion with an LLM, in the terminal",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Topic to analyse on startup. In TUI mode it is submitted as the first
    /// message; in headless mode it is required (or piped via stdin).
    #[arg(value_name = "TOPIC")]
    pub topic: Option<String>,

    /// Run headless (no TUI): print the rendered analysis to stdout and exit
    #[arg(long, short = 'H')]
    pub headless: bool,

    /// Model for discussion turns, e.g. "gemini-2.5-flash"
    #[arg(long, short = 'M', env = "KAJI_MODEL")]
    pub model: Option<String>,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the effective configuration and exit
    ShowConfig,
}

impl Cli {
    /// Returns true if the run should be headless.
    /// Headless is triggered by --headless or when stdin is not a terminal
    /// (so `echo topic | kaji` pipes cleanly).
    pub fn is_headless(&self) -> bool {
        self.headless || !std::io::stdin().is_terminal()
    }
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "kaji", &mut std::io::stdout());
}

// We need this trait for stdin TTY detection
trait IsTerminal {
    fn is_terminal(&self) -> bool;
}

impl IsTerminal for std::io::Stdin {
    fn is_terminal(&self) -> bool {
        use std::os::unix::io::AsRawFd;
        unsafe { libc::isatty(self.as_raw_fd()) != 0 }
    }
}
