// File-extension groups and the patterns that select them

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CSS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(ExtensionGroup::Css.pattern()).unwrap());
static SCSS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(ExtensionGroup::Scss.pattern()).unwrap());
static IMAGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(ExtensionGroup::Image.pattern()).unwrap());
static FONT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(ExtensionGroup::Font.pattern()).unwrap());
static XML_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(ExtensionGroup::Xml.pattern()).unwrap());
static CSV_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(ExtensionGroup::Csv.pattern()).unwrap());
static SCRIPT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(ExtensionGroup::Script.pattern()).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionGroup {
    Css,
    Scss,
    Image,
    Font,
    Xml,
    Csv,
    Script,
}

impl ExtensionGroup {
    /// Rule registration order
    pub const ALL: [ExtensionGroup; 7] = [
        ExtensionGroup::Css,
        ExtensionGroup::Scss,
        ExtensionGroup::Image,
        ExtensionGroup::Font,
        ExtensionGroup::Xml,
        ExtensionGroup::Csv,
        ExtensionGroup::Script,
    ];

    pub fn pattern(self) -> &'static str {
        match self {
            ExtensionGroup::Css => r"\.css$",
            ExtensionGroup::Scss => r"\.s[ac]ss$",
            ExtensionGroup::Image => r"\.(png|jpg|svg|gif)$",
            ExtensionGroup::Font => r"\.(ttf|woff|woff2|eot)$",
            ExtensionGroup::Xml => r"\.xml$",
            ExtensionGroup::Csv => r"\.csv$",
            ExtensionGroup::Script => r"\.js$",
        }
    }

    pub fn matcher(self) -> &'static Regex {
        match self {
            ExtensionGroup::Css => &*CSS_PATTERN,
            ExtensionGroup::Scss => &*SCSS_PATTERN,
            ExtensionGroup::Image => &*IMAGE_PATTERN,
            ExtensionGroup::Font => &*FONT_PATTERN,
            ExtensionGroup::Xml => &*XML_PATTERN,
            ExtensionGroup::Csv => &*CSV_PATTERN,
            ExtensionGroup::Script => &*SCRIPT_PATTERN,
        }
    }

    /// First group whose pattern matches the path
    pub fn classify(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.matcher().is_match(path))
    }
}

/// Pattern excluding any path that passes through the vendor directory
pub fn vendor_exclude_pattern(vendor_dir: &str) -> String {
    regex::escape(vendor_dir)
}
