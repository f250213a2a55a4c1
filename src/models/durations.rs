use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timer preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    /// Key used in the persisted durations object
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::ShortBreak => "short",
            Mode::LongBreak => "long",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "focus" | "work" => Some(Mode::Focus),
            "short" | "short-break" | "shortbreak" => Some(Mode::ShortBreak),
            "long" | "long-break" | "longbreak" => Some(Mode::LongBreak),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }
}

/// Preset lengths in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub focus: u32,
    pub short: u32,
    pub long: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            focus: 25,
            short: 5,
            long: 15,
        }
    }
}

impl Durations {
    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus,
            Mode::ShortBreak => self.short,
            Mode::LongBreak => self.long,
        }
    }

    pub fn seconds(&self, mode: Mode) -> u32 {
        self.minutes(mode).saturating_mul(60)
    }

    /// Build from a stored JSON document. Each field that is not a positive
    /// integer falls back to its default independently.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let field = |name: &str, default: u32| {
            value
                .get(name)
                .and_then(Value::as_u64)
                .filter(|&m| m > 0)
                .and_then(|m| u32::try_from(m).ok())
                .unwrap_or(default)
        };
        Self {
            focus: field("focus", defaults.focus),
            short: field("short", defaults.short),
            long: field("long", defaults.long),
        }
    }

    /// Build from raw settings-form input
    pub fn from_input(focus: &str, short: &str, long: &str) -> Self {
        let defaults = Self::default();
        Self {
            focus: parse_minutes(focus, defaults.focus),
            short: parse_minutes(short, defaults.short),
            long: parse_minutes(long, defaults.long),
        }
    }
}

/// Parse a minutes field the way a lenient form does: skip leading
/// whitespace, read an optional sign and the leading digits, ignore the rest.
/// Anything that does not produce a positive number yields `default`.
pub fn parse_minutes(input: &str, default: u32) -> u32 {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];

    if negative || digits.is_empty() {
        return default;
    }
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => default,
        Ok(minutes) => minutes,
    }
}
