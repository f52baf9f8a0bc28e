//! Terminal styling and color utilities.
//!
//! ANSI escape codes plus color detection. Every renderer takes a
//! [`ColorPalette`] so `--no-color` and `NO_COLOR` produce identical plain
//! output.

use ecoship_lib::EcoTier;

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold white for headings and tier names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary text.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for dates.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for strong eco ratings.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow for middling eco ratings and fallback notices.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red for weak eco ratings.
    pub const RED: &str = "\x1b[31m";
}

/// Resolved color codes, either ANSI sequences or empty strings.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            green: colors::GREEN,
            yellow: colors::YELLOW,
            red: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            cyan: "",
            green: "",
            yellow: "",
            red: "",
        }
    }

    /// Colored unless disabled by flag or by the environment.
    #[must_use]
    pub fn detect(no_color: bool) -> Self {
        if !no_color && supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Color for an eco rating band.
    #[must_use]
    pub fn eco(&self, tier: EcoTier) -> &'static str {
        match tier {
            EcoTier::Excellent | EcoTier::VeryGood => self.green,
            EcoTier::Good | EcoTier::Fair => self.yellow,
            EcoTier::Poor | EcoTier::VeryPoor => self.red,
        }
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects `NO_COLOR` (https://no-color.org/) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a dollar amount with thousand separators.
///
/// # Examples
///
/// ```
/// # use ecoship_cli::terminal::format_usd;
/// assert_eq!(format_usd(52.83), "$52.83");
/// assert_eq!(format_usd(1234.5), "$1,234.50");
/// assert_eq!(format_usd(1234567.0), "$1,234,567.00");
/// ```
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let (sign, cents) = if cents < 0 { ("-", -cents) } else { ("", cents) };
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, c) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}${grouped}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_usd_small_and_negative() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(15.0), "$15.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(-12.5), "-$12.50");
    }

    #[test]
    fn plain_palette_is_empty() {
        let p = ColorPalette::plain();
        assert!(p.reset.is_empty());
        assert!(p.eco(EcoTier::Excellent).is_empty());
    }

    #[test]
    fn colored_palette_bands_eco_ratings() {
        let p = ColorPalette::colored();
        assert_eq!(p.eco(EcoTier::VeryGood), colors::GREEN);
        assert_eq!(p.eco(EcoTier::Fair), colors::YELLOW);
        assert_eq!(p.eco(EcoTier::VeryPoor), colors::RED);
    }

    #[test]
    fn flag_forces_plain() {
        assert!(ColorPalette::detect(true).reset.is_empty());
    }

    mod supports_color_tests {
        use super::*;
        use std::env;
        use std::sync::Mutex;

        /// Environment variables are process-global, so tests modifying them must not run in parallel.
        static ENV_MUTEX: Mutex<()> = Mutex::new(());

        fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
        where
            F: FnOnce() -> R,
        {
            let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var_os(k))).collect();

            for (key, value) in vars {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }

            let result = f();

            for (key, value) in saved {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }

            result
        }

        #[test]
        fn no_color_disables() {
            with_env_vars(&[("NO_COLOR", Some("1")), ("TERM", None)], || {
                assert!(!supports_color());
            });
        }

        #[test]
        fn dumb_terminal_disables() {
            with_env_vars(&[("NO_COLOR", None), ("TERM", Some("dumb"))], || {
                assert!(!supports_color());
            });
        }

        #[test]
        fn default_is_colored() {
            with_env_vars(&[("NO_COLOR", None), ("TERM", Some("xterm-256color"))], || {
                assert!(supports_color());
            });
        }
    }
}
