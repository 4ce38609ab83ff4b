//! Event categories and their colour tokens
//!
//! Every pin on the map carries a [`Category`]. The [`CategoryColorMap`]
//! resolves a category to the [`ColorToken`] used by both the marker glyph
//! and the overlay list entry, so the two always agree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::MapError;

/// Category of an event pin
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Music,
    #[serde(rename = "Food & Drink")]
    FoodAndDrink,
    Technology,
}

impl Category {
    /// Get all categories for iteration
    pub fn all() -> &'static [Category] {
        &[Category::Music, Category::FoodAndDrink, Category::Technology]
    }

    /// Name shown in popups and the overlay list
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Music => "Music",
            Category::FoodAndDrink => "Food & Drink",
            Category::Technology => "Technology",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MapError::UnknownCategory(wanted.to_string()))
    }
}

/// A design-system colour token such as `red-500`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorToken {
    /// Token name without utility prefix (`red-500`)
    pub name: String,
    /// Resolved colour used when the token is painted outside the stylesheet
    pub hex: String,
}

/// Known palette entries. Tokens outside this table cannot be painted.
const PALETTE: [(&str, &str); 10] = [
    ("red-500", "#ef4444"),
    ("orange-500", "#f97316"),
    ("amber-500", "#f59e0b"),
    ("yellow-500", "#eab308"),
    ("green-500", "#22c55e"),
    ("teal-500", "#14b8a6"),
    ("blue-500", "#3b82f6"),
    ("indigo-500", "#6366f1"),
    ("purple-500", "#a855f7"),
    ("pink-500", "#ec4899"),
];

impl ColorToken {
    /// Look up a palette token by name
    ///
    /// Accepts the bare name (`red-500`) or a utility class (`bg-red-500`,
    /// `text-red-500`).
    pub fn named(name: &str) -> Result<Self, MapError> {
        let bare = name
            .trim()
            .trim_start_matches("bg-")
            .trim_start_matches("text-");

        PALETTE
            .iter()
            .find(|(token, _)| *token == bare)
            .map(|(token, hex)| Self {
                name: (*token).to_string(),
                hex: (*hex).to_string(),
            })
            .ok_or_else(|| MapError::UnknownColor(name.to_string()))
    }

    /// Background utility class (`bg-red-500`)
    pub fn background_class(&self) -> String {
        format!("bg-{}", self.name)
    }

    /// Text utility class (`text-red-500`)
    pub fn text_class(&self) -> String {
        format!("text-{}", self.name)
    }
}

/// Mapping from category to colour token
///
/// The map may be partial. Lookups for a category without an entry fail
/// with [`MapError::MissingCategoryColor`] instead of producing an
/// unstyled marker. Serialized as an object keyed by category name, and a
/// category absent from that object stays unmapped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CategoryColorMap {
    colors: BTreeMap<Category, ColorToken>,
}

/// Built-in colour per category
const DEFAULT_TOKENS: [(Category, &str, &str); 3] = [
    (Category::Music, "red-500", "#ef4444"),
    (Category::FoodAndDrink, "orange-500", "#f97316"),
    (Category::Technology, "blue-500", "#3b82f6"),
];

impl Default for CategoryColorMap {
    fn default() -> Self {
        let colors = DEFAULT_TOKENS
            .iter()
            .map(|(category, name, hex)| {
                let token = ColorToken {
                    name: (*name).to_string(),
                    hex: (*hex).to_string(),
                };
                (*category, token)
            })
            .collect();
        Self { colors }
    }
}

impl CategoryColorMap {
    /// A map with no entries
    pub fn empty() -> Self {
        Self {
            colors: BTreeMap::new(),
        }
    }

    /// Builder method: map a category to a palette token
    ///
    /// Fails on a token outside the palette instead of leaving the
    /// category unmapped.
    pub fn with(mut self, category: Category, token: &str) -> Result<Self, MapError> {
        self.insert(category, token)?;
        Ok(self)
    }

    /// Builder method: drop a category's entry
    pub fn without(mut self, category: Category) -> Self {
        self.colors.remove(&category);
        self
    }

    /// Map a category to a token, rejecting unknown tokens
    pub fn insert(&mut self, category: Category, token: &str) -> Result<(), MapError> {
        let token = ColorToken::named(token)?;
        self.colors.insert(category, token);
        Ok(())
    }

    /// Remove a category's entry
    pub fn remove(&mut self, category: Category) -> Option<ColorToken> {
        self.colors.remove(&category)
    }

    /// Resolve the colour for a category
    pub fn color_for(&self, category: Category) -> Result<&ColorToken, MapError> {
        self.colors
            .get(&category)
            .ok_or(MapError::MissingCategoryColor(category))
    }

    /// Check that every given category has an entry
    pub fn verify_coverage<I>(&self, categories: I) -> Result<(), MapError>
    where
        I: IntoIterator<Item = Category>,
    {
        for category in categories {
            self.color_for(category)?;
        }
        Ok(())
    }

    /// Number of mapped categories
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no category is mapped
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate over mapped categories in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&Category, &ColorToken)> {
        self.colors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_covers_every_category() {
        let colors = CategoryColorMap::default();
        assert_eq!(colors.len(), Category::all().len());
        assert!(colors.verify_coverage(Category::all().iter().copied()).is_ok());
    }

    #[test]
    fn test_default_tokens() {
        let colors = CategoryColorMap::default();
        assert_eq!(colors.color_for(Category::Music).unwrap().background_class(), "bg-red-500");
        assert_eq!(
            colors.color_for(Category::FoodAndDrink).unwrap().text_class(),
            "text-orange-500"
        );
        assert_eq!(colors.color_for(Category::Technology).unwrap().hex, "#3b82f6");
    }

    #[test]
    fn test_missing_category_is_an_error() {
        let colors = CategoryColorMap::default().without(Category::Technology);
        let err = colors.color_for(Category::Technology).unwrap_err();
        assert!(matches!(err, MapError::MissingCategoryColor(Category::Technology)));
        assert_eq!(err.to_string(), "No colour mapped for category 'Technology'");
    }

    #[test]
    fn test_default_tokens_are_in_palette() {
        for (category, name, hex) in DEFAULT_TOKENS {
            let token = ColorToken::named(name).unwrap();
            assert_eq!(token.hex, hex, "{} default drifted from the palette", category);
        }
    }

    #[test]
    fn test_with_rejects_unknown_token() {
        let err = CategoryColorMap::empty()
            .with(Category::Music, "red-50")
            .unwrap_err();
        assert!(matches!(err, MapError::UnknownColor(name) if name == "red-50"));

        let colors = CategoryColorMap::empty()
            .with(Category::Music, "bg-teal-500")
            .unwrap();
        assert_eq!(colors.color_for(Category::Music).unwrap().name, "teal-500");
    }

    #[test]
    fn test_color_map_serde_keeps_overrides() {
        let mut colors = CategoryColorMap::default().without(Category::Technology);
        colors.insert(Category::Music, "purple-500").unwrap();

        let json = serde_json::to_value(&colors).unwrap();
        assert_eq!(json["Music"]["name"], "purple-500");
        assert_eq!(json["Food & Drink"]["name"], "orange-500");
        assert!(json.get("Technology").is_none());

        let back: CategoryColorMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, colors);
        assert!(back.color_for(Category::Technology).is_err());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Food & Drink".parse::<Category>().unwrap(), Category::FoodAndDrink);
        assert_eq!(" music ".parse::<Category>().unwrap(), Category::Music);
        assert!(matches!(
            "Sports".parse::<Category>(),
            Err(MapError::UnknownCategory(name)) if name == "Sports"
        ));
    }

    #[test]
    fn test_category_serde_uses_display_names() {
        let json = serde_json::to_string(&Category::FoodAndDrink).unwrap();
        assert_eq!(json, "\"Food & Drink\"");
    }

    #[test]
    fn test_color_token_accepts_utility_classes() {
        assert_eq!(ColorToken::named("bg-red-500").unwrap().name, "red-500");
        assert_eq!(ColorToken::named("text-blue-500").unwrap().hex, "#3b82f6");
        assert!(ColorToken::named("chartreuse-900").is_err());
    }

    #[test]
    fn test_insert_rejects_unknown_token() {
        let mut colors = CategoryColorMap::empty();
        assert!(colors.insert(Category::Music, "nope-100").is_err());
        assert!(colors.is_empty());
        colors.insert(Category::Music, "pink-500").unwrap();
        assert_eq!(colors.color_for(Category::Music).unwrap().name, "pink-500");
    }
}
