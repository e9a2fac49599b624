//! ANSI palette for the namespace dump.
//!
//! - Blue: entity and member names
//! - Green: native types
//! - Yellow: host types
//! - Dim: keywords and punctuation

/// ANSI color palette. Only standard 16-color codes, readable on light and dark themes.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub name: &'static str,
    pub native: &'static str,
    pub host: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        name: "\x1b[34m",
        native: "\x1b[32m",
        host: "\x1b[33m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        name: "",
        native: "",
        host: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
