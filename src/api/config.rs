use serde::{Deserialize, Serialize};

use crate::chart::{Color, SubplotGrid};
use crate::core::{CategoryOrder, IntersectionFilter, IntersectionOrder};
use crate::error::{UpsetError, UpsetResult};

pub const DEFAULT_MAX_CATEGORIES: usize = 40;
pub const DEFAULT_MAX_INTERSECTIONS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpsetPalette {
    pub intersection_bars: Color,
    pub total_bars: Color,
    pub grid_markers: Color,
    pub membership_markers: Color,
}

impl Default for UpsetPalette {
    fn default() -> Self {
        Self {
            intersection_bars: Color::INDIGO,
            total_bars: Color::INDIGO,
            grid_markers: Color::LIGHT_GREY,
            membership_markers: Color::BLUE,
        }
    }
}

impl UpsetPalette {
    pub fn validate(self) -> UpsetResult<Self> {
        self.intersection_bars.validate()?;
        self.total_bars.validate()?;
        self.grid_markers.validate()?;
        self.membership_markers.validate()?;
        Ok(self)
    }
}

/// Knobs for [`build_upset_chart_with_config`](super::build_upset_chart_with_config).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpsetConfig {
    /// Above this many categories only a placeholder is produced.
    pub max_categories: usize,
    /// Intersections kept after ranking; the rest are dropped.
    pub max_intersections: usize,
    pub intersection_order: IntersectionOrder,
    pub category_order: CategoryOrder,
    pub filter: IntersectionFilter,
    pub palette: UpsetPalette,
    pub grid: SubplotGrid,
    pub annotation_font_size: f64,
    pub tick_font_size: f64,
}

impl Default for UpsetConfig {
    fn default() -> Self {
        Self {
            max_categories: DEFAULT_MAX_CATEGORIES,
            max_intersections: DEFAULT_MAX_INTERSECTIONS,
            intersection_order: IntersectionOrder::default(),
            category_order: CategoryOrder::default(),
            filter: IntersectionFilter::default(),
            palette: UpsetPalette::default(),
            grid: SubplotGrid::default(),
            annotation_font_size: 16.0,
            tick_font_size: 10.0,
        }
    }
}

impl UpsetConfig {
    #[must_use]
    pub fn with_max_categories(mut self, max_categories: usize) -> Self {
        self.max_categories = max_categories;
        self
    }

    #[must_use]
    pub fn with_max_intersections(mut self, max_intersections: usize) -> Self {
        self.max_intersections = max_intersections;
        self
    }

    #[must_use]
    pub fn with_intersection_order(mut self, order: IntersectionOrder) -> Self {
        self.intersection_order = order;
        self
    }

    #[must_use]
    pub fn with_category_order(mut self, order: CategoryOrder) -> Self {
        self.category_order = order;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: IntersectionFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: UpsetPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn from_json_str(input: &str) -> UpsetResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| UpsetError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()
    }

    pub fn validate(self) -> UpsetResult<Self> {
        if self.max_categories == 0 {
            return Err(UpsetError::InvalidConfig(
                "max_categories must be > 0".to_owned(),
            ));
        }
        if self.max_intersections == 0 {
            return Err(UpsetError::InvalidConfig(
                "max_intersections must be > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("annotation_font_size", self.annotation_font_size),
            ("tick_font_size", self.tick_font_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(UpsetError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        validate_grid(self.grid)?;
        self.filter.validate()?;
        self.palette.validate()?;
        Ok(self)
    }
}

fn validate_grid(grid: SubplotGrid) -> UpsetResult<SubplotGrid> {
    for value in grid.column_widths.into_iter().chain(grid.row_heights) {
        if !value.is_finite() || value <= 0.0 {
            return Err(UpsetError::InvalidConfig(
                "subplot column widths and row heights must be finite and > 0".to_owned(),
            ));
        }
    }
    for spacing in [grid.horizontal_spacing, grid.vertical_spacing] {
        if !spacing.is_finite() || !(0.0..0.5).contains(&spacing) {
            return Err(UpsetError::InvalidConfig(
                "subplot spacing must be finite and in [0, 0.5)".to_owned(),
            ));
        }
    }
    Ok(grid)
}
