use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::intersections::IntersectionTable;

/// Integer cell position in the membership matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: usize,
    pub y: usize,
}

impl GridPoint {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Dot-matrix layout of an intersection table.
///
/// Columns are intersections in rank order (x = 0 is the highest ranked).
/// Rows are categories, reversed so the first category sits on the top row:
/// category `c` lands on `y = category_count - 1 - c`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MembershipMatrix {
    pub intersection_count: usize,
    pub category_count: usize,
    /// Every cell, column-major.
    pub grid: Vec<GridPoint>,
    /// Cells where the intersection includes the category.
    pub members: Vec<GridPoint>,
    /// Hover text for each entry of `members`.
    pub member_hover: Vec<String>,
    /// Tick labels for rows `0..category_count`.
    pub row_labels: Vec<String>,
}

impl MembershipMatrix {
    #[must_use]
    pub fn from_intersections(table: &IntersectionTable) -> Self {
        let category_count = table.category_count();
        let intersection_count = table.intersection_count();

        let mut grid = Vec::with_capacity(category_count * intersection_count);
        let mut members = Vec::new();
        let mut member_hover = Vec::new();

        for (x, intersection) in table.intersections.iter().enumerate() {
            let label = intersection.label();
            for (y, flag) in intersection.membership.iter().rev().enumerate() {
                let point = GridPoint::new(x, y);
                grid.push(point);
                if *flag {
                    members.push(point);
                    member_hover.push(label.clone());
                }
            }
        }

        let row_labels = table.categories.iter().rev().cloned().collect();

        trace!(
            intersection_count,
            category_count,
            members = members.len(),
            "built membership matrix"
        );

        Self {
            intersection_count,
            category_count,
            grid,
            members,
            member_hover,
            row_labels,
        }
    }

    /// Axis range covering `0..count` with half a cell of padding on each side.
    #[must_use]
    pub fn padded_range(count: usize) -> (f64, f64) {
        (-0.5, count as f64 - 0.5)
    }
}
