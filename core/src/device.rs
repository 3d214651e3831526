//! User-agent classification.
//!
//! A heuristic cascade of substring rules. Each category (browser, platform)
//! has its own ordered rule table evaluated top to bottom and the first match
//! wins. Order matters: Edge agents also mention `Chrome`, Android agents
//! mention `Linux`, and iOS agents say `like Mac OS X`. The tables below are
//! the only place those ties are decided.
//!
//! # Example
//!
//! ```
//! use order_mock_core::device::classify;
//!
//! let info = classify("Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/126.0 Mobile Safari/537.36");
//! assert_eq!(info.device, "Mobile");
//! assert_eq!(info.device_type, "Android Phone");
//! assert_eq!(info.browser, "Chrome");
//! assert_eq!(info.os, "Android");
//! assert_eq!(info.describe(), "Android Phone - Chrome on Android");
//! ```

/// Fallback for unmatched browser and OS.
pub const UNKNOWN: &str = "Unknown";

/// Fallback form factor and device type.
pub const DESKTOP: &str = "Desktop";

/// What a user-agent string says about the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Form factor: `Desktop`, `Mobile` or `Tablet`
    pub device: &'static str,
    /// Device type: `Desktop`, `Android Phone`, `iPhone` or `iPad`
    pub device_type: &'static str,
    /// Browser family
    pub browser: &'static str,
    /// Operating system
    pub os: &'static str,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            device: DESKTOP,
            device_type: DESKTOP,
            browser: UNKNOWN,
            os: UNKNOWN,
        }
    }
}

impl DeviceInfo {
    /// Composite fingerprint: `{device_type} - {browser} on {os}`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} - {} on {}", self.device_type, self.browser, self.os)
    }
}

/// Browser rules, first match wins.
const BROWSER_RULES: &[(&str, &str)] = &[
    ("Chrome", "Chrome"),
    ("Safari", "Safari"),
    ("Firefox", "Firefox"),
    ("Edge", "Edge"),
];

/// A platform rule: any of `needles` selects the platform.
struct PlatformRule {
    needles: &'static [&'static str],
    os: &'static str,
    form: FormFactor,
}

enum FormFactor {
    Desktop,
    Fixed {
        device: &'static str,
        device_type: &'static str,
    },
    /// iPad agents are tablets, everything else on the platform is a phone.
    Apple,
}

/// Platform rules, first match wins. Mobile platforms come first so that
/// their desktop-looking substrings (`Linux`, `Mac OS`) never shadow them.
const PLATFORM_RULES: &[PlatformRule] = &[
    PlatformRule {
        needles: &["Android"],
        os: "Android",
        form: FormFactor::Fixed {
            device: "Mobile",
            device_type: "Android Phone",
        },
    },
    PlatformRule {
        needles: &["iOS", "iPhone", "iPad"],
        os: "iOS",
        form: FormFactor::Apple,
    },
    PlatformRule {
        needles: &["Windows"],
        os: "Windows",
        form: FormFactor::Desktop,
    },
    PlatformRule {
        needles: &["Mac OS"],
        os: "macOS",
        form: FormFactor::Desktop,
    },
    PlatformRule {
        needles: &["Linux"],
        os: "Linux",
        form: FormFactor::Desktop,
    },
];

/// Classify a raw `User-Agent` header value.
///
/// Never fails: anything unrecognised, including the empty string, yields
/// [`DeviceInfo::default`] for the unmatched categories.
#[must_use]
pub fn classify(user_agent: &str) -> DeviceInfo {
    let mut info = DeviceInfo::default();

    if let Some((_, browser)) = BROWSER_RULES
        .iter()
        .find(|(needle, _)| user_agent.contains(needle))
    {
        info.browser = *browser;
    }

    if let Some(rule) = PLATFORM_RULES
        .iter()
        .find(|rule| rule.needles.iter().any(|needle| user_agent.contains(needle)))
    {
        info.os = rule.os;
        match rule.form {
            FormFactor::Desktop => {}
            FormFactor::Fixed { device, device_type } => {
                info.device = device;
                info.device_type = device_type;
            }
            FormFactor::Apple if user_agent.contains("iPad") => {
                info.device = "Tablet";
                info.device_type = "iPad";
            }
            FormFactor::Apple => {
                info.device = "Mobile";
                info.device_type = "iPhone";
            }
        }
    }

    info
}
