//! ANSI coloring for verbose console output

use colored::{ColoredString, Colorize};
use minunit_config::ColorChoice;

/// Role of a piece of output text, mapped to a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Pass,
    Fail,
    Suite,
    Tests,
    Assertions,
    Failures,
    Heading,
}

/// Applies colors to verbose output, or leaves text plain when disabled
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Build a palette for a configured color choice.
    ///
    /// `Always` and `Never` force `colored` on or off regardless of the
    /// terminal; `Auto` leaves the decision to its terminal detection.
    pub fn from_choice(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Always => {
                colored::control::set_override(true);
                Self::new(true)
            }
            ColorChoice::Never => {
                colored::control::set_override(false);
                Self::new(false)
            }
            ColorChoice::Auto => Self::new(true),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, text: &str, tone: Tone) -> ColoredString {
        if !self.enabled {
            return text.clear();
        }
        match tone {
            Tone::Pass => text.green(),
            Tone::Fail => text.red(),
            Tone::Suite => text.yellow(),
            Tone::Tests => text.blue(),
            Tone::Assertions => text.magenta(),
            Tone::Failures => text.cyan(),
            Tone::Heading => text.bold(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}
