//! Static catalog of status types.
//!
//! The catalog is fixed at compile time and split into a work group and a
//! non-work group. Lookups never fail: unknown ids resolve to [`UNKNOWN`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a status counts towards work time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Work,
    NonWork,
}

impl Category {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::NonWork => "non_work",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "non_work" | "nonwork" | "non-work" => Ok(Self::NonWork),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Error type for unknown category strings.
#[derive(Debug, Clone)]
pub struct UnknownCategory(String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

/// One entry of the status catalog.
///
/// `color` and `icon` are presentation metadata and are passed through as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusType {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub category: Category,
}

impl StatusType {
    const fn work(
        id: &'static str,
        name: &'static str,
        color: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            color,
            icon,
            category: Category::Work,
        }
    }

    const fn non_work(
        id: &'static str,
        name: &'static str,
        color: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            color,
            icon,
            category: Category::NonWork,
        }
    }

    #[must_use]
    pub const fn is_work(&self) -> bool {
        matches!(self.category, Category::Work)
    }
}

/// Fallback returned for ids that are not in the catalog.
pub const UNKNOWN: StatusType = StatusType::non_work("unknown", "Neznámý", "#9CA3AF", "❓");

/// Type id proposed for newly added entries.
pub const DEFAULT_TYPE_ID: &str = "prace";

static CATALOG: [StatusType; 14] = [
    StatusType::work("prace", "Práce (Příchod)", "#10B981", "👷"),
    StatusType::work("prechod", "Přechod (Mezi pracovišti)", "#3B82F6", "🚶"),
    StatusType::work("pracCesta", "Pracovní cesta", "#6366F1", "🚗"),
    StatusType::work("priprava", "Příprava na práci", "#14B8A6", "⚙️"),
    StatusType::work("kultivace", "Kultivování pole", "#22C55E", "🌾"),
    StatusType::work("udrzba", "Údržba techniky", "#0EA5E9", "🔧"),
    StatusType::work("jizdaAreal", "Jízda v areálu", "#8B5CF6", "🚜"),
    StatusType::work("prejezd", "Přejezd", "#F59E0B", "➡️"),
    StatusType::work("pripravaPudy", "Příprava půdy", "#84CC16", "🌱"),
    StatusType::non_work("dovolena", "Dovolená", "#EC4899", "🏖️"),
    StatusType::non_work("lekar", "Lékař", "#EF4444", "🏥"),
    StatusType::non_work("nemoc", "Nemoc", "#F97316", "🤒"),
    StatusType::non_work("ocr", "OČR", "#A855F7", "👶"),
    StatusType::non_work("prestavka", "Přestávka", "#6B7280", "☕"),
];

/// All catalog entries, work group first.
pub fn all_types() -> &'static [StatusType] {
    &CATALOG
}

/// Catalog entries of one category, in catalog order.
pub fn types_in(category: Category) -> impl Iterator<Item = &'static StatusType> {
    CATALOG.iter().filter(move |t| t.category == category)
}

/// Looks up a status type by id, falling back to [`UNKNOWN`].
pub fn resolve_type(type_id: &str) -> &'static StatusType {
    CATALOG.iter().find(|t| t.id == type_id).unwrap_or(&UNKNOWN)
}

/// Whether the id names a work-category type.
pub fn is_work(type_id: &str) -> bool {
    resolve_type(type_id).is_work()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_partitioned_in_order() {
        let work: Vec<_> = types_in(Category::Work).map(|t| t.id).collect();
        let non_work: Vec<_> = types_in(Category::NonWork).map(|t| t.id).collect();

        assert_eq!(work.len(), 9);
        assert_eq!(work.first(), Some(&"prace"));
        assert_eq!(work.last(), Some(&"pripravaPudy"));
        assert_eq!(
            non_work,
            vec!["dovolena", "lekar", "nemoc", "ocr", "prestavka"]
        );
        assert_eq!(all_types().len(), work.len() + non_work.len());
    }

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = all_types().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all_types().len());
    }

    #[test]
    fn resolves_known_type() {
        let t = resolve_type("prestavka");
        assert_eq!(t.name, "Přestávka");
        assert_eq!(t.category, Category::NonWork);
    }

    #[test]
    fn unknown_id_falls_back() {
        let t = resolve_type("does-not-exist");
        assert_eq!(*t, UNKNOWN);
        assert_eq!(t.name, "Neznámý");
        assert!(!is_work("does-not-exist"));
    }

    #[test]
    fn work_membership() {
        assert!(is_work("udrzba"));
        assert!(!is_work("lekar"));
        assert!(is_work(DEFAULT_TYPE_ID));
    }

    #[test]
    fn category_roundtrip() {
        for category in [Category::Work, Category::NonWork] {
            let parsed: Category = category.to_string().parse().expect("should parse");
            assert_eq!(parsed, category);
        }
        assert!("leisure".parse::<Category>().is_err());
    }
}
