use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::membership::{MembershipMask, MembershipTable};
use crate::error::{UpsetError, UpsetResult};

/// Label of the combination that belongs to no category.
pub const EMPTY_INTERSECTION_LABEL: &str = "(none)";

/// Ranking applied to derived intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionOrder {
    /// Descending cardinality; ties keep first-occurrence order.
    #[default]
    Cardinality,
    /// Ascending degree, then descending cardinality.
    Degree,
    /// First-occurrence order of the input table.
    Input,
}

/// Ordering of category rows in the matrix and totals panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryOrder {
    #[default]
    Input,
    /// Descending category total; ties keep input order.
    Cardinality,
}

/// Inclusive bounds an intersection must satisfy to be plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntersectionFilter {
    pub min_cardinality: Option<u64>,
    pub max_cardinality: Option<u64>,
    pub min_degree: Option<usize>,
    pub max_degree: Option<usize>,
}

impl IntersectionFilter {
    #[must_use]
    pub fn is_unbounded(self) -> bool {
        self == Self::default()
    }

    pub fn validate(self) -> UpsetResult<Self> {
        if let (Some(min), Some(max)) = (self.min_cardinality, self.max_cardinality) {
            if min > max {
                return Err(UpsetError::InvalidConfig(format!(
                    "min_cardinality ({min}) must be <= max_cardinality ({max})"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_degree, self.max_degree) {
            if min > max {
                return Err(UpsetError::InvalidConfig(format!(
                    "min_degree ({min}) must be <= max_degree ({max})"
                )));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn accepts(self, intersection: &Intersection) -> bool {
        let cardinality = intersection.cardinality;
        let degree = intersection.degree();
        self.min_cardinality.is_none_or(|min| cardinality >= min)
            && self.max_cardinality.is_none_or(|max| cardinality <= max)
            && self.min_degree.is_none_or(|min| degree >= min)
            && self.max_degree.is_none_or(|max| degree <= max)
    }
}

/// One unique category combination and its cardinality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intersection {
    /// Flags in [`IntersectionTable::categories`] order.
    pub membership: MembershipMask,
    pub cardinality: u64,
    /// Active category names, sorted alphabetically.
    pub categories: Vec<String>,
}

impl Intersection {
    #[must_use]
    pub fn degree(&self) -> usize {
        self.categories.len()
    }

    /// Newline-joined active categories, used for bar labels and hover text.
    ///
    /// The all-false combination is labelled [`EMPTY_INTERSECTION_LABEL`] so its
    /// bar stays named on a categorical axis.
    #[must_use]
    pub fn label(&self) -> String {
        if self.categories.is_empty() {
            return EMPTY_INTERSECTION_LABEL.to_owned();
        }
        self.categories.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionTable {
    pub categories: Vec<String>,
    pub intersections: Vec<Intersection>,
    /// Per-category totals over the whole input, keyed in `categories` order.
    pub totals: IndexMap<String, u64>,
    pub truncated: bool,
}

impl IntersectionTable {
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() || self.intersections.is_empty()
    }

    /// Keeps the first `max_intersections` entries, dropping the rest.
    ///
    /// Returns whether anything was dropped.
    pub fn truncate(&mut self, max_intersections: usize) -> bool {
        if self.intersections.len() <= max_intersections {
            return false;
        }
        let dropped = self.intersections.len() - max_intersections;
        self.intersections.truncate(max_intersections);
        self.truncated = true;
        debug!(max_intersections, dropped, "truncated intersections");
        true
    }
}

/// Aggregates identical membership rows, applies `filter`, and ranks the result.
pub fn derive_intersections(
    table: &MembershipTable,
    order: IntersectionOrder,
    category_order: CategoryOrder,
    filter: IntersectionFilter,
) -> UpsetResult<IntersectionTable> {
    table.validate()?;

    let mut input_totals = vec![0_u64; table.category_count()];
    let mut cardinalities: IndexMap<MembershipMask, u64> = IndexMap::new();
    for row in &table.rows {
        for (total, flag) in input_totals.iter_mut().zip(&row.membership) {
            if *flag {
                *total = total.saturating_add(row.count);
            }
        }
        let entry = cardinalities.entry(row.membership.clone()).or_insert(0);
        *entry = entry.saturating_add(row.count);
    }

    let mut permutation: Vec<usize> = (0..table.category_count()).collect();
    if category_order == CategoryOrder::Cardinality {
        permutation.sort_by(|a, b| input_totals[*b].cmp(&input_totals[*a]));
    }

    let categories: Vec<String> = permutation
        .iter()
        .map(|index| table.categories[*index].clone())
        .collect();
    let totals: IndexMap<String, u64> = permutation
        .iter()
        .map(|index| (table.categories[*index].clone(), input_totals[*index]))
        .collect();

    let distinct = cardinalities.len();
    let mut intersections: Vec<Intersection> = cardinalities
        .into_iter()
        .map(|(mask, cardinality)| Intersection {
            membership: permutation.iter().map(|index| mask[*index]).collect(),
            cardinality,
            categories: table.active_categories(&mask),
        })
        .filter(|intersection| filter.accepts(intersection))
        .collect();

    match order {
        IntersectionOrder::Cardinality => {
            intersections.sort_by(|a, b| b.cardinality.cmp(&a.cardinality));
        }
        IntersectionOrder::Degree => {
            intersections.sort_by(|a, b| {
                a.degree()
                    .cmp(&b.degree())
                    .then_with(|| b.cardinality.cmp(&a.cardinality))
            });
        }
        IntersectionOrder::Input => {}
    }

    trace!(
        rows = table.len(),
        distinct,
        retained = intersections.len(),
        "derived intersections"
    );

    Ok(IntersectionTable {
        categories,
        intersections,
        totals,
        truncated: false,
    })
}
