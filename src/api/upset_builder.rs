use tracing::{debug, warn};

use crate::chart::{
    Axis, BarOrientation, BarTrace, ChartBody, ChartDescription, Hover, Panel, PanelSlot,
    PlaceholderReason, ScatterTrace, Trace,
};
use crate::core::{IntersectionTable, MembershipMatrix, MembershipTable, derive_intersections};
use crate::error::UpsetResult;

use super::UpsetConfig;

/// Hover placeholders understood by every exporter.
pub const HOVER_VALUE: &str = "{value}";
pub const HOVER_LABEL: &str = "{label}";

/// Builds an UpSet chart with the default [`UpsetConfig`].
pub fn build_upset_chart(data: &MembershipTable, title: &str) -> UpsetResult<ChartDescription> {
    build_upset_chart_with_config(data, title, &UpsetConfig::default())
}

/// Parses a JSON membership table and builds its chart.
pub fn build_upset_chart_from_json(input: &str, title: &str) -> UpsetResult<ChartDescription> {
    let data = MembershipTable::from_json_str(input)?;
    build_upset_chart(&data, title)
}

/// Builds an UpSet chart for `data`.
///
/// Malformed tables are rejected with [`UpsetError::Format`](crate::UpsetError::Format).
/// Data that cannot be drawn as intersections (empty, a single record, nothing
/// left after filtering, too many categories) yields a placeholder chart
/// carrying an explanatory annotation instead of an error.
pub fn build_upset_chart_with_config(
    data: &MembershipTable,
    title: &str,
    config: &UpsetConfig,
) -> UpsetResult<ChartDescription> {
    let config = config.validate()?;
    data.validate()?;

    if data.is_empty() {
        debug!(title, "empty membership table");
        return Ok(no_data(&config));
    }

    if data.len() == 1 {
        debug!(title, "single-record membership table");
        return Ok(ChartDescription::placeholder(
            PlaceholderReason::SingleRecord,
            format!(
                "Only a single value for {title} with current selection.\n\
                 Can't plot intersections for a single category (see above)"
            ),
            config.annotation_font_size,
        ));
    }

    let mut table = derive_intersections(
        data,
        config.intersection_order,
        config.category_order,
        config.filter,
    )?;

    if table.is_empty() {
        debug!(title, "no intersections left to plot");
        return Ok(no_data(&config));
    }

    let category_count = table.category_count();
    if category_count > config.max_categories {
        debug!(
            title,
            category_count,
            max_categories = config.max_categories,
            "too many categories for an upset plot"
        );
        return Ok(ChartDescription::placeholder(
            PlaceholderReason::TooManyCategories { category_count },
            format!(
                "{category_count} total {title} categories with current selection.\n\
                 Please subset input data further to display set intersections."
            ),
            config.annotation_font_size,
        ));
    }

    let distinct = table.intersection_count();
    if table.truncate(config.max_intersections) {
        warn!(
            title,
            distinct,
            retained = config.max_intersections,
            "upset plot truncated to most common intersections"
        );
    }

    Ok(assemble_upset_chart(&table, title, &config))
}

/// Figure height for a chart showing `category_count` categories.
#[must_use]
pub fn figure_height(category_count: usize) -> u32 {
    match category_count {
        0..10 => 400,
        10..20 => 500,
        20..30 => 600,
        _ => 800,
    }
}

#[must_use]
pub fn plot_title(title: &str, truncated: bool, max_intersections: usize) -> String {
    if truncated {
        format!(
            "{title} UpSet Plot\n(Truncated to {max_intersections} Most Common Intersections)"
        )
    } else {
        format!("{title} UpSet Plot\n(All Intersections)")
    }
}

fn no_data(config: &UpsetConfig) -> ChartDescription {
    ChartDescription::placeholder(
        PlaceholderReason::NoData,
        "No data to plot",
        config.annotation_font_size,
    )
}

fn assemble_upset_chart(
    table: &IntersectionTable,
    title: &str,
    config: &UpsetConfig,
) -> ChartDescription {
    let matrix = MembershipMatrix::from_intersections(table);
    let column_range = MembershipMatrix::padded_range(matrix.intersection_count);
    let row_range = MembershipMatrix::padded_range(matrix.category_count);

    let cardinality_bars = Trace::Bar(BarTrace {
        name: format!("{title} set"),
        orientation: BarOrientation::Vertical,
        labels: table.intersections.iter().map(|i| i.label()).collect(),
        values: table.intersections.iter().map(|i| i.cardinality).collect(),
        hover_template: format!("Count w/ Set: {HOVER_VALUE}\nSet: [{HOVER_LABEL}]"),
        color: config.palette.intersection_bars,
    });

    let total_bars = Trace::Bar(BarTrace {
        name: format!("{title} unique count"),
        orientation: BarOrientation::Horizontal,
        labels: table.totals.keys().rev().cloned().collect(),
        values: table.totals.values().rev().copied().collect(),
        hover_template: format!("Category: {HOVER_LABEL}\nCount: {HOVER_VALUE}"),
        color: config.palette.total_bars,
    });

    let backdrop = Trace::Scatter(ScatterTrace {
        name: None,
        x: matrix.grid.iter().map(|p| p.x as f64).collect(),
        y: matrix.grid.iter().map(|p| p.y as f64).collect(),
        marker_color: config.palette.grid_markers,
        hover: Hover::Skip,
    });

    let memberships = Trace::Scatter(ScatterTrace {
        name: Some(format!("{title} in set")),
        x: matrix.members.iter().map(|p| p.x as f64).collect(),
        y: matrix.members.iter().map(|p| p.y as f64).collect(),
        marker_color: config.palette.membership_markers,
        hover: Hover::Text {
            text: matrix.member_hover.clone(),
        },
    });

    let row_ticks: Vec<f64> = (0..matrix.category_count).map(|row| row as f64).collect();

    let panels = vec![
        Panel::new(
            PanelSlot::TopLeft,
            Axis::locked(),
            Axis::default().with_title("Set Count"),
        )
        .with_trace(cardinality_bars),
        Panel::new(PanelSlot::TopRight, Axis::hidden(), Axis::hidden()),
        Panel::new(
            PanelSlot::BottomLeft,
            Axis::locked().with_range(column_range),
            Axis::locked()
                .with_range(row_range)
                .with_ticks(row_ticks, matrix.row_labels.clone(), config.tick_font_size)
                .with_title(title),
        )
        .with_trace(backdrop)
        .with_trace(memberships),
        Panel::new(
            PanelSlot::BottomRight,
            Axis::default().with_title(format!("Unique Count of\n{title}")),
            Axis::locked().with_range(row_range),
        )
        .with_trace(total_bars),
    ];

    ChartDescription {
        title: Some(plot_title(title, table.truncated, config.max_intersections)),
        height: Some(figure_height(matrix.category_count)),
        body: ChartBody::Upset {
            grid: config.grid,
            panels,
            truncated: table.truncated,
        },
    }
}
