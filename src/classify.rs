use std::{collections::BTreeSet, fmt};

use serde::Serialize;

/// Kinds of place the search understands. Each one has exactly one entry in
/// [`CATEGORY_TABLE`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Cafe,
    Restaurant,
    Bar,
    Pub,
    Library,
    Park,
    Museum,
    Pharmacy,
    Hospital,
    School,
    University,
    Cinema,
    Theatre,
    Gym,
    Supermarket,
    Veterinary,
}

pub struct CategoryDef {
    pub category: PlaceCategory,
    /// Lower-case substrings, english and spanish
    pub keywords: &'static [&'static str],
    pub tag_key: &'static str,
    pub tag_value: &'static str,
}

pub const CATEGORY_TABLE: &[CategoryDef] = &[
    CategoryDef {
        category: PlaceCategory::Cafe,
        keywords: &["café", "cafe", "cafetería", "cafeteria", "coffee"],
        tag_key: "amenity",
        tag_value: "cafe",
    },
    CategoryDef {
        category: PlaceCategory::Restaurant,
        keywords: &["restaurante", "restaurant", "comida"],
        tag_key: "amenity",
        tag_value: "restaurant",
    },
    CategoryDef {
        category: PlaceCategory::Bar,
        keywords: &["bares", "cervecería", "cerveceria", "cocktail", "cóctel"],
        tag_key: "amenity",
        tag_value: "bar",
    },
    CategoryDef {
        category: PlaceCategory::Pub,
        keywords: &["pubs", "taberna", "tavern"],
        tag_key: "amenity",
        tag_value: "pub",
    },
    CategoryDef {
        category: PlaceCategory::Library,
        keywords: &["biblioteca", "library", "libro"],
        tag_key: "amenity",
        tag_value: "library",
    },
    CategoryDef {
        category: PlaceCategory::Park,
        keywords: &["parque", "park", "verde"],
        tag_key: "leisure",
        tag_value: "park",
    },
    CategoryDef {
        category: PlaceCategory::Museum,
        keywords: &["museo", "museum"],
        tag_key: "tourism",
        tag_value: "museum",
    },
    CategoryDef {
        category: PlaceCategory::Pharmacy,
        keywords: &["farmacia", "pharmacy", "chemist"],
        tag_key: "amenity",
        tag_value: "pharmacy",
    },
    CategoryDef {
        category: PlaceCategory::Hospital,
        keywords: &["hospital"],
        tag_key: "amenity",
        tag_value: "hospital",
    },
    CategoryDef {
        category: PlaceCategory::School,
        keywords: &["colegio", "school", "escuela"],
        tag_key: "amenity",
        tag_value: "school",
    },
    CategoryDef {
        category: PlaceCategory::University,
        keywords: &["universidad", "university"],
        tag_key: "amenity",
        tag_value: "university",
    },
    CategoryDef {
        category: PlaceCategory::Cinema,
        keywords: &["cine", "cinema", "película", "movie"],
        tag_key: "amenity",
        tag_value: "cinema",
    },
    CategoryDef {
        category: PlaceCategory::Theatre,
        keywords: &["teatro", "theatre", "theater"],
        tag_key: "amenity",
        tag_value: "theatre",
    },
    CategoryDef {
        category: PlaceCategory::Gym,
        keywords: &["gimnasio", "gym", "fitness"],
        tag_key: "leisure",
        tag_value: "fitness_centre",
    },
    CategoryDef {
        category: PlaceCategory::Supermarket,
        keywords: &["supermercado", "supermarket", "tienda", "grocery"],
        tag_key: "shop",
        tag_value: "supermarket",
    },
    CategoryDef {
        category: PlaceCategory::Veterinary,
        keywords: &["veterinari", "veterinary"],
        tag_key: "amenity",
        tag_value: "veterinary",
    },
];

impl PlaceCategory {
    pub fn def(self) -> &'static CategoryDef {
        CATEGORY_TABLE
            .iter()
            .find(|def| def.category == self)
            .unwrap_or_else(|| unreachable!("{self:?} has no entry in CATEGORY_TABLE"))
    }

    /// Canonical tag as `key=value`
    pub fn tag(self) -> (&'static str, &'static str) {
        let def = self.def();
        (def.tag_key, def.tag_value)
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (key, value) = self.tag();
        write!(f, "{key}={value}")
    }
}

/// Outcome of reading a free-text query. `Matched` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Matched(BTreeSet<PlaceCategory>),
    Unmatched,
}

impl Classification {
    pub fn categories(&self) -> BTreeSet<PlaceCategory> {
        match self {
            Classification::Matched(categories) => categories.clone(),
            Classification::Unmatched => BTreeSet::new(),
        }
    }
}

/// A category matches when any of its keywords appears anywhere in the
/// lower-cased query.
pub fn classify(query: &str) -> Classification {
    let query = query.to_lowercase();
    let matched: BTreeSet<PlaceCategory> = CATEGORY_TABLE
        .iter()
        .filter(|def| def.keywords.iter().any(|keyword| query.contains(keyword)))
        .map(|def| def.category)
        .collect();
    if matched.is_empty() {
        Classification::Unmatched
    } else {
        Classification::Matched(matched)
    }
}
