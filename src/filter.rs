use std::{collections::BTreeSet, fmt::Write as _, time::Duration};

use crate::{classify::PlaceCategory, types::place::Coordinate};

/// Tag keys searched when neither a category nor a name is available
pub const PERMISSIVE_KEYS: [&str; 3] = ["amenity", "leisure", "tourism"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    /// `[key=value]`
    Tag {
        key: &'static str,
        value: &'static str,
    },
    /// Case-insensitive substring of the `name` tag
    NameContains(String),
    /// `[key]`, any value
    HasKey(&'static str),
}

/// Disjunction of clauses. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    clauses: Vec<FilterClause>,
}

impl SearchFilter {
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// Render as an Overpass QL union: one node, way and relation statement per
    /// clause, each limited to `radius_meters` around `center`.
    pub fn to_overpass_ql(
        &self,
        center: Coordinate,
        radius_meters: u32,
        timeout: Duration,
    ) -> String {
        let around = format!(
            "(around:{},{},{})",
            radius_meters, center.latitude, center.longitude
        );
        let mut query = format!("[out:json][timeout:{}];\n(\n", timeout.as_secs().max(1));
        for clause in &self.clauses {
            let selector = clause.to_selector();
            for kind in ["node", "way", "relation"] {
                let _ = writeln!(query, "  {kind}{selector}{around};");
            }
        }
        query.push_str(");\nout center;\n");
        query
    }
}

impl FilterClause {
    fn to_selector(&self) -> String {
        match self {
            FilterClause::Tag { key, value } => {
                format!("[{}={}]", quote(key), quote(value))
            }
            FilterClause::NameContains(text) => {
                format!("[\"name\"~{},i]", quote(&escape_regex(text)))
            }
            FilterClause::HasKey(key) => format!("[{}]", quote(key)),
        }
    }
}

/// Build the filter for a search. Categories win; otherwise a non-blank
/// fallback becomes a name search; otherwise anything with an amenity, leisure
/// or tourism tag matches.
pub fn to_filter(
    categories: &BTreeSet<PlaceCategory>,
    fallback_text: Option<&str>,
) -> SearchFilter {
    let clauses = if !categories.is_empty() {
        categories
            .iter()
            .map(|category| {
                let (key, value) = category.tag();
                FilterClause::Tag { key, value }
            })
            .collect()
    } else {
        match fallback_text.filter(|text| !text.trim().is_empty()) {
            Some(text) => vec![FilterClause::NameContains(text.to_string())],
            None => PERMISSIVE_KEYS.into_iter().map(FilterClause::HasKey).collect(),
        }
    };
    SearchFilter { clauses }
}

/// Overpass string literal
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Overpass compares `~` values as POSIX extended regexes
fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if "\\^$.|?*+()[]{}".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
