//! Permission knowledge base.
//!
//! A static table mapping every known Chrome extension permission (API
//! capabilities and host-match patterns) to its risk level, capability
//! category, and plain-English explanation, plus the weight and grade
//! threshold tables the scorer runs on. Built once, never mutated.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Risk severity of a single permission.
///
/// Declared in ascending order so the derived `Ord` ranks `Critical`
/// highest; descending sorts use `b.cmp(&a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Contribution of one permission at this level to the total risk score.
    pub fn weight(self) -> u32 {
        match self {
            Self::Critical => 25,
            Self::High => 15,
            Self::Medium => 8,
            Self::Low => 3,
            Self::Minimal => 1,
        }
    }

    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "minimal" => Some(Self::Minimal),
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Capability domain a permission belongs to. Every permission has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Data Access")]
    DataAccess,
    #[serde(rename = "Browser Control")]
    BrowserControl,
    #[serde(rename = "Network Access")]
    NetworkAccess,
    #[serde(rename = "System Access")]
    SystemAccess,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::DataAccess,
        Category::BrowserControl,
        Category::NetworkAccess,
        Category::SystemAccess,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataAccess => write!(f, "Data Access"),
            Self::BrowserControl => write!(f, "Browser Control"),
            Self::NetworkAccess => write!(f, "Network Access"),
            Self::SystemAccess => write!(f, "System Access"),
        }
    }
}

/// Knowledge base record for one permission identifier.
#[derive(Debug, Clone, Copy)]
pub struct PermissionEntry {
    pub risk: RiskLevel,
    pub category: Category,
    /// Short label, e.g. "Access to all websites".
    pub description: &'static str,
    /// Plain-English explanation of what the permission lets an extension do.
    pub explanation: &'static str,
}

const fn entry(
    risk: RiskLevel,
    category: Category,
    description: &'static str,
    explanation: &'static str,
) -> PermissionEntry {
    PermissionEntry {
        risk,
        category,
        description,
        explanation,
    }
}

use Category::*;
use RiskLevel::*;

/// The full permission table. Risk/category assignments are domain-expert
/// calibration constants; do not re-derive them.
pub static PERMISSIONS: &[(&str, PermissionEntry)] = &[
    // Critical
    (
        "<all_urls>",
        entry(
            Critical,
            DataAccess,
            "Access to all websites",
            "This extension can read and modify every website you visit, including banking sites, email, and social media.",
        ),
    ),
    (
        "http://*/*",
        entry(
            Critical,
            DataAccess,
            "Access to all HTTP websites",
            "Can read and change content on every unencrypted website you visit.",
        ),
    ),
    (
        "https://*/*",
        entry(
            Critical,
            DataAccess,
            "Access to all HTTPS websites",
            "Can read and change content on every secure website you visit, including banking and email.",
        ),
    ),
    (
        "*://*/*",
        entry(
            Critical,
            DataAccess,
            "Access to all websites",
            "Can read and modify every single website you visit — total web access.",
        ),
    ),
    (
        "debugger",
        entry(
            Critical,
            SystemAccess,
            "Chrome debugger access",
            "Can use Chrome's debugger to inspect and modify any page, intercept network traffic, and read passwords.",
        ),
    ),
    (
        "nativeMessaging",
        entry(
            Critical,
            SystemAccess,
            "Native application communication",
            "Can communicate with programs installed on your computer, potentially running code outside the browser.",
        ),
    ),
    (
        "proxy",
        entry(
            Critical,
            NetworkAccess,
            "Proxy settings control",
            "Can route all your internet traffic through any server it chooses — could intercept everything you do online.",
        ),
    ),
    (
        "vpnProvider",
        entry(
            Critical,
            NetworkAccess,
            "VPN configuration",
            "Can create a VPN connection and route all your network traffic through it.",
        ),
    ),
    (
        "webRequestBlocking",
        entry(
            Critical,
            NetworkAccess,
            "Block and modify web requests",
            "Can intercept, block, or modify any network request your browser makes before it's sent.",
        ),
    ),
    (
        "clipboardRead",
        entry(
            Critical,
            DataAccess,
            "Read clipboard",
            "Can read whatever you've copied — passwords, credit card numbers, private messages.",
        ),
    ),
    (
        "content_security_policy",
        entry(
            Critical,
            BrowserControl,
            "Override content security policy",
            "Can weaken website security protections, potentially allowing injection attacks.",
        ),
    ),
    // High
    (
        "webRequest",
        entry(
            High,
            NetworkAccess,
            "Monitor web requests",
            "Can observe all network requests your browser makes, seeing which sites you visit and data you send.",
        ),
    ),
    (
        "cookies",
        entry(
            High,
            DataAccess,
            "Read and modify cookies",
            "Can access your login sessions on any website — could potentially impersonate you.",
        ),
    ),
    (
        "history",
        entry(
            High,
            DataAccess,
            "Access browsing history",
            "Can read your complete browsing history — every site you've ever visited.",
        ),
    ),
    (
        "bookmarks",
        entry(
            High,
            DataAccess,
            "Access bookmarks",
            "Can read, create, and delete all your bookmarks.",
        ),
    ),
    (
        "tabs",
        entry(
            High,
            BrowserControl,
            "Access browser tabs",
            "Can see every tab you have open, including URLs and page titles.",
        ),
    ),
    (
        "webNavigation",
        entry(
            High,
            BrowserControl,
            "Monitor navigation events",
            "Can track every page navigation in real time — knows exactly where you go.",
        ),
    ),
    (
        "management",
        entry(
            High,
            BrowserControl,
            "Manage other extensions",
            "Can enable, disable, or uninstall your other extensions.",
        ),
    ),
    (
        "privacy",
        entry(
            High,
            BrowserControl,
            "Control privacy settings",
            "Can change your browser's privacy settings, potentially weakening protections.",
        ),
    ),
    (
        "downloads",
        entry(
            High,
            SystemAccess,
            "Manage downloads",
            "Can initiate downloads and access your download history.",
        ),
    ),
    (
        "downloads.open",
        entry(
            High,
            SystemAccess,
            "Open downloaded files",
            "Can automatically open downloaded files — potential malware vector.",
        ),
    ),
    (
        "geolocation",
        entry(
            High,
            DataAccess,
            "Access your location",
            "Can determine your physical location.",
        ),
    ),
    (
        "clipboardWrite",
        entry(
            High,
            DataAccess,
            "Write to clipboard",
            "Can modify your clipboard contents — could replace copied crypto addresses or account numbers.",
        ),
    ),
    (
        "contentSettings",
        entry(
            High,
            BrowserControl,
            "Change content settings",
            "Can modify settings for cookies, JavaScript, plugins, and other content on websites.",
        ),
    ),
    (
        "declarativeNetRequest",
        entry(
            High,
            NetworkAccess,
            "Modify network requests (declarative)",
            "Can block or redirect network requests using predefined rules.",
        ),
    ),
    (
        "declarativeNetRequestWithHostAccess",
        entry(
            High,
            NetworkAccess,
            "Modify network requests with host access",
            "Can modify network requests and access host-specific data.",
        ),
    ),
    (
        "pageCapture",
        entry(
            High,
            DataAccess,
            "Capture page content",
            "Can save complete copies of any webpage you visit, including sensitive content.",
        ),
    ),
    (
        "tabCapture",
        entry(
            High,
            DataAccess,
            "Capture tab media",
            "Can record audio and video from your browser tabs.",
        ),
    ),
    (
        "desktopCapture",
        entry(
            High,
            DataAccess,
            "Capture screen content",
            "Can take screenshots or record your entire screen.",
        ),
    ),
    (
        "sessions",
        entry(
            High,
            DataAccess,
            "Access recently closed tabs/sessions",
            "Can query and restore recently closed tabs and browsing sessions.",
        ),
    ),
    (
        "topSites",
        entry(
            High,
            DataAccess,
            "Access most visited sites",
            "Can see your most frequently visited websites.",
        ),
    ),
    // Medium
    (
        "activeTab",
        entry(
            Medium,
            BrowserControl,
            "Access active tab on click",
            "Can access the current tab only when you click the extension — more limited than full tab access.",
        ),
    ),
    (
        "alarms",
        entry(
            Medium,
            BrowserControl,
            "Schedule tasks",
            "Can schedule code to run at specific times or intervals.",
        ),
    ),
    (
        "background",
        entry(
            Medium,
            BrowserControl,
            "Run in background",
            "Can run continuously in the background even when you're not using it.",
        ),
    ),
    (
        "browsingData",
        entry(
            Medium,
            BrowserControl,
            "Clear browsing data",
            "Can delete your browsing history, cookies, cache, and other data.",
        ),
    ),
    (
        "certificateProvider",
        entry(
            Medium,
            NetworkAccess,
            "Provide certificates",
            "Can provide TLS certificates for authentication.",
        ),
    ),
    (
        "enterprise.deviceAttributes",
        entry(
            Medium,
            SystemAccess,
            "Read device attributes",
            "Can read attributes of your device in an enterprise environment.",
        ),
    ),
    (
        "fileBrowserHandler",
        entry(
            Medium,
            SystemAccess,
            "Handle file browser events",
            "Can extend Chrome OS file browser functionality.",
        ),
    ),
    (
        "fileSystemProvider",
        entry(
            Medium,
            SystemAccess,
            "Provide file systems",
            "Can create virtual file systems accessible by Chrome OS.",
        ),
    ),
    (
        "identity",
        entry(
            Medium,
            DataAccess,
            "Access user identity",
            "Can get your Google account email and basic profile info.",
        ),
    ),
    (
        "identity.email",
        entry(
            Medium,
            DataAccess,
            "Access user email",
            "Can see your Google account email address.",
        ),
    ),
    (
        "notifications",
        entry(
            Medium,
            BrowserControl,
            "Show notifications",
            "Can display desktop notifications — could be used for phishing or spam.",
        ),
    ),
    (
        "platformKeys",
        entry(
            Medium,
            SystemAccess,
            "Access platform keys",
            "Can access cryptographic keys managed by the platform.",
        ),
    ),
    (
        "scripting",
        entry(
            Medium,
            BrowserControl,
            "Execute scripts in pages",
            "Can inject and run JavaScript code in web pages.",
        ),
    ),
    (
        "search",
        entry(
            Medium,
            BrowserControl,
            "Trigger searches",
            "Can initiate searches using your default search engine.",
        ),
    ),
    (
        "signedInDevices",
        entry(
            Medium,
            DataAccess,
            "Access signed-in devices",
            "Can see a list of devices signed into your Google account.",
        ),
    ),
    (
        "storage",
        entry(
            Medium,
            DataAccess,
            "Store data locally",
            "Can store data on your computer. Generally safe but used for tracking sometimes.",
        ),
    ),
    (
        "system.cpu",
        entry(
            Medium,
            SystemAccess,
            "Read CPU info",
            "Can read information about your CPU — used for fingerprinting.",
        ),
    ),
    (
        "system.memory",
        entry(
            Medium,
            SystemAccess,
            "Read memory info",
            "Can read your system's memory information.",
        ),
    ),
    (
        "system.storage",
        entry(
            Medium,
            SystemAccess,
            "Read storage info",
            "Can read information about your storage devices.",
        ),
    ),
    (
        "ttsEngine",
        entry(
            Medium,
            BrowserControl,
            "Text-to-speech engine",
            "Can implement a text-to-speech engine.",
        ),
    ),
    (
        "unlimitedStorage",
        entry(
            Medium,
            SystemAccess,
            "Unlimited local storage",
            "Can store unlimited data on your computer.",
        ),
    ),
    (
        "webAuthenticationProxy",
        entry(
            Medium,
            NetworkAccess,
            "Web authentication proxy",
            "Can intercept web authentication requests.",
        ),
    ),
    // Low
    (
        "contextMenus",
        entry(
            Low,
            BrowserControl,
            "Add context menu items",
            "Can add options to your right-click menu. Generally harmless.",
        ),
    ),
    (
        "commands",
        entry(
            Low,
            BrowserControl,
            "Keyboard shortcuts",
            "Can register keyboard shortcuts. Low risk.",
        ),
    ),
    (
        "dns",
        entry(
            Low,
            NetworkAccess,
            "DNS resolution",
            "Can resolve domain names. Limited risk.",
        ),
    ),
    (
        "fontSettings",
        entry(
            Low,
            BrowserControl,
            "Manage font settings",
            "Can change browser font settings.",
        ),
    ),
    (
        "gcm",
        entry(
            Low,
            NetworkAccess,
            "Google Cloud Messaging",
            "Can use Google's push messaging service.",
        ),
    ),
    (
        "idle",
        entry(
            Low,
            BrowserControl,
            "Detect idle state",
            "Can detect when you're away from the computer.",
        ),
    ),
    (
        "loginState",
        entry(
            Low,
            DataAccess,
            "Read login state",
            "Can check if the browser session is logged in.",
        ),
    ),
    (
        "offscreen",
        entry(
            Low,
            BrowserControl,
            "Create offscreen documents",
            "Can create offscreen documents for background processing.",
        ),
    ),
    (
        "permissions",
        entry(
            Low,
            BrowserControl,
            "Manage own permissions",
            "Can request additional permissions at runtime.",
        ),
    ),
    (
        "power",
        entry(
            Low,
            SystemAccess,
            "Manage power settings",
            "Can prevent the system from sleeping.",
        ),
    ),
    (
        "runtime",
        entry(
            Low,
            BrowserControl,
            "Extension runtime access",
            "Basic extension lifecycle management.",
        ),
    ),
    (
        "sidePanel",
        entry(
            Low,
            BrowserControl,
            "Side panel access",
            "Can display content in Chrome's side panel.",
        ),
    ),
    (
        "system.display",
        entry(
            Low,
            SystemAccess,
            "Read display info",
            "Can read information about connected displays.",
        ),
    ),
    (
        "tabGroups",
        entry(
            Low,
            BrowserControl,
            "Manage tab groups",
            "Can create and manage tab groups.",
        ),
    ),
    (
        "tts",
        entry(
            Low,
            BrowserControl,
            "Text-to-speech",
            "Can convert text to speech. Low risk.",
        ),
    ),
    // Minimal
    (
        "action",
        entry(
            Minimal,
            BrowserControl,
            "Extension toolbar action",
            "Controls the extension's toolbar button. Completely safe.",
        ),
    ),
    (
        "chrome_settings_overrides",
        entry(
            Minimal,
            BrowserControl,
            "Override Chrome settings",
            "Can change your homepage or search engine.",
        ),
    ),
    (
        "declarativeContent",
        entry(
            Minimal,
            BrowserControl,
            "Show action conditionally",
            "Can show the extension icon based on page content. Safe.",
        ),
    ),
    (
        "i18n",
        entry(
            Minimal,
            BrowserControl,
            "Internationalization",
            "Multi-language support. Completely harmless.",
        ),
    ),
    (
        "omnibox",
        entry(
            Minimal,
            BrowserControl,
            "Address bar keyword",
            "Adds a keyword trigger in the address bar. Safe.",
        ),
    ),
    (
        "theme",
        entry(
            Minimal,
            BrowserControl,
            "Browser theme",
            "Can change browser appearance. Harmless.",
        ),
    ),
];

static INDEX: Lazy<HashMap<&'static str, &'static PermissionEntry>> = Lazy::new(|| {
    PERMISSIONS
        .iter()
        .map(|(name, entry)| (*name, entry))
        .collect()
});

/// Resolve a permission identifier against the knowledge base.
pub fn lookup(identifier: &str) -> Option<&'static PermissionEntry> {
    INDEX.get(identifier).copied()
}

/// Safety grade derived from the total weighted risk score.
///
/// `Unknown` is the `?` sentinel used when an audit could not complete;
/// `grade()` never returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
    #[serde(rename = "?")]
    Unknown,
}

impl Grade {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "F" => Some(Self::F),
            _ => None,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::E => write!(f, "E"),
            Self::F => write!(f, "F"),
            Self::Unknown => write!(f, "?"),
        }
    }
}

/// Score ceilings, ascending; the first ceiling at or above the total
/// score decides the grade.
pub static GRADE_THRESHOLDS: &[(u32, Grade)] = &[
    (0, Grade::A),
    (10, Grade::B),
    (25, Grade::C),
    (50, Grade::D),
    (80, Grade::E),
    (u32::MAX, Grade::F),
];

/// Map a total risk score to its letter grade. Total: the last ceiling
/// is `u32::MAX`, so every score matches.
pub fn grade(score: u32) -> Grade {
    for &(ceiling, grade) in GRADE_THRESHOLDS {
        if score <= ceiling {
            return grade;
        }
    }
    Grade::F
}

/// One-line prose description of a grade.
pub fn grade_description(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "Excellent — Minimal permissions, very low risk",
        Grade::B => "Good — Few permissions, low risk",
        Grade::C => "Moderate — Some concerning permissions, review recommended",
        Grade::D => "Concerning — Multiple high-risk permissions, use with caution",
        Grade::E => "Dangerous — Extensive access to your data and browser",
        Grade::F => "Critical Risk — Maximum access, extreme caution advised",
        Grade::Unknown => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_keys_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for (name, _) in PERMISSIONS {
            assert!(seen.insert(*name), "duplicate key: {}", name);
        }
    }

    #[test]
    fn golden_critical_entries() {
        for name in ["<all_urls>", "debugger", "nativeMessaging", "proxy", "clipboardRead"] {
            let entry = lookup(name).unwrap();
            assert_eq!(entry.risk, RiskLevel::Critical, "{}", name);
        }
        assert_eq!(lookup("debugger").unwrap().category, Category::SystemAccess);
        assert_eq!(
            lookup("<all_urls>").unwrap().description,
            "Access to all websites"
        );
    }

    #[test]
    fn golden_tier_samples() {
        assert_eq!(lookup("tabs").unwrap().risk, RiskLevel::High);
        assert_eq!(lookup("webRequest").unwrap().risk, RiskLevel::High);
        assert_eq!(lookup("cookies").unwrap().risk, RiskLevel::High);
        assert_eq!(lookup("history").unwrap().risk, RiskLevel::High);
        assert_eq!(lookup("activeTab").unwrap().risk, RiskLevel::Medium);
        assert_eq!(lookup("storage").unwrap().risk, RiskLevel::Medium);
        assert_eq!(lookup("scripting").unwrap().risk, RiskLevel::Medium);
        assert_eq!(lookup("contextMenus").unwrap().risk, RiskLevel::Low);
        assert_eq!(lookup("commands").unwrap().risk, RiskLevel::Low);
        assert_eq!(lookup("action").unwrap().risk, RiskLevel::Minimal);
        assert_eq!(lookup("theme").unwrap().risk, RiskLevel::Minimal);
        assert_eq!(lookup("i18n").unwrap().risk, RiskLevel::Minimal);
    }

    #[test]
    fn unknown_identifier_misses() {
        assert!(lookup("definitelyNotAPermission").is_none());
    }

    #[test]
    fn weights() {
        assert_eq!(RiskLevel::Critical.weight(), 25);
        assert_eq!(RiskLevel::High.weight(), 15);
        assert_eq!(RiskLevel::Medium.weight(), 8);
        assert_eq!(RiskLevel::Low.weight(), 3);
        assert_eq!(RiskLevel::Minimal.weight(), 1);
    }

    #[test]
    fn severity_ordering() {
        assert!(RiskLevel::Critical > RiskLevel::High);
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
        assert!(RiskLevel::Low > RiskLevel::Minimal);
    }

    #[test]
    fn grade_boundaries_inclusive_upper() {
        assert_eq!(grade(0), Grade::A);
        assert_eq!(grade(1), Grade::B);
        assert_eq!(grade(10), Grade::B);
        assert_eq!(grade(11), Grade::C);
        assert_eq!(grade(25), Grade::C);
        assert_eq!(grade(26), Grade::D);
        assert_eq!(grade(50), Grade::D);
        assert_eq!(grade(80), Grade::E);
        assert_eq!(grade(81), Grade::F);
        assert_eq!(grade(u32::MAX), Grade::F);
    }

    #[test]
    fn grade_monotonic() {
        let mut prev = grade(0);
        for score in 0..200 {
            let g = grade(score);
            assert!(g >= prev, "grade regressed at score {}", score);
            prev = g;
        }
    }

    #[test]
    fn grade_descriptions() {
        assert!(grade_description(Grade::A).starts_with("Excellent"));
        assert!(grade_description(Grade::F).starts_with("Critical Risk"));
        assert_eq!(grade_description(Grade::Unknown), "Unknown");
    }

    #[test]
    fn grade_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Grade::A).unwrap(), "\"A\"");
        assert_eq!(serde_json::to_string(&Grade::Unknown).unwrap(), "\"?\"");
    }
}
