use std::fmt::Display;

/// Verbosity level for messages a user of the producer should always see.
pub const NOTICE: u8 = 1;
/// Verbosity level for per-response assembly details.
pub const DETAIL: u8 = 2;

#[derive(Debug, Copy, Clone)]
pub struct Config {
    verbosity: u8,
    quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            verbosity: NOTICE,
            quiet: false,
        }
    }
}

impl Config {
    pub fn new(
        verbosity: u8,
        quiet: bool,
    ) -> Self {
        Config {
            verbosity,
            quiet,
        }
    }

    pub fn verbosity(&self) -> u8 {
        match self.quiet {
            true => 0,
            false => self.verbosity
        }
    }

    pub fn shows_details(&self) -> bool {
        self.verbosity() >= DETAIL
    }

    pub fn log<S: Display>(
        &self,
        level: u8,
        message: S
    ) {
        if self.verbosity() >= level {
            eprint!("{}", message);
        }
    }

    pub fn logln<S: Display>(
        &self,
        level: u8,
        message: S
    ) {
        if self.verbosity() >= level {
            eprintln!("{}", message);
        }
    }
}
