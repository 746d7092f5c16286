//! Tip categorization - groups response lines under their category headings

use std::fmt;

/// The fixed set of tip categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryName {
    QuickWins,
    SustainableLiving,
    Transportation,
    Community,
    EnvironmentalProtection,
}

impl CategoryName {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryName::QuickWins => "Quick Wins",
            CategoryName::SustainableLiving => "Sustainable Living",
            CategoryName::Transportation => "Transportation & Mobility",
            CategoryName::Community => "Community & Social Impact",
            CategoryName::EnvironmentalProtection => "Environmental Protection",
        }
    }

    /// Look up a category by its display label (exact match)
    pub fn from_label(label: &str) -> Option<Self> {
        CATEGORIES
            .iter()
            .map(|(name, _)| *name)
            .find(|name| name.label() == label)
    }

    pub fn icon(&self) -> &'static str {
        CATEGORIES
            .iter()
            .find(|(name, _)| name == self)
            .map(|(_, icon)| *icon)
            .unwrap_or(DEFAULT_ICON)
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const CATEGORY_COUNT: usize = 5;

/// Categories in render order, with their icons.
pub const CATEGORIES: [(CategoryName, &str); CATEGORY_COUNT] = [
    (CategoryName::QuickWins, "\u{26a1}"),
    (CategoryName::SustainableLiving, "\u{1f331}"),
    (CategoryName::Transportation, "\u{1f6b2}"),
    (CategoryName::Community, "\u{1f91d}"),
    (CategoryName::EnvironmentalProtection, "\u{1f30d}"),
];

pub const DEFAULT_ICON: &str = "\u{1f4a1}";

/// Icon for a category label, falling back to [`DEFAULT_ICON`]
pub fn icon_for(label: &str) -> &'static str {
    CategoryName::from_label(label)
        .map(|name| name.icon())
        .unwrap_or(DEFAULT_ICON)
}

/// One non-empty category, ready to render
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TipCard {
    pub name: CategoryName,
    pub lines: Vec<String>,
}

impl TipCard {
    pub fn icon(&self) -> &'static str {
        self.name.icon()
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.icon(), self.name.label())
    }

    /// Lines joined as separate markdown paragraphs
    pub fn body(&self) -> String {
        self.lines.join("\n\n")
    }

    pub fn count(&self) -> usize {
        self.lines.len()
    }
}

/// Extract the category name from a heading line such as
/// `## 2. Sustainable Living (start here)`.
///
/// Returns `None` when the line is not a numbered heading. The returned
/// name may still be an unknown category, or empty for a bare ordinal.
pub fn parse_heading(line: &str) -> Option<&str> {
    let rest = line.trim_start();
    let hashes = rest.len() - rest.trim_start_matches('#').len();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = rest[hashes..].trim_start();

    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = &rest[digits..];
    let rest = rest
        .strip_prefix('.')
        .or_else(|| rest.strip_prefix(')'))?;

    let mut name = rest.trim();
    if name.ends_with(')') {
        if let Some(open) = name.rfind('(') {
            name = name[..open].trim_end();
        }
    }

    Some(name)
}

/// Group lines into cards.
///
/// A recognized heading resets its category, so a repeated heading keeps
/// only the lines after its last occurrence. Lines outside a recognized
/// category are dropped. Empty categories produce no card.
pub fn categorize<S: AsRef<str>>(lines: &[S]) -> Vec<TipCard> {
    let mut buckets: [Vec<String>; CATEGORY_COUNT] = Default::default();
    let mut current: Option<usize> = None;

    for line in lines {
        let line = line.as_ref();
        if let Some(name) = parse_heading(line) {
            current = CATEGORIES
                .iter()
                .position(|(category, _)| category.label() == name);
            if let Some(index) = current {
                buckets[index].clear();
            }
            continue;
        }

        if let Some(index) = current {
            buckets[index].push(line.to_string());
        }
    }

    CATEGORIES
        .iter()
        .zip(buckets)
        .filter(|(_, lines)| !lines.is_empty())
        .map(|((name, _), lines)| TipCard { name: *name, lines })
        .collect()
}
