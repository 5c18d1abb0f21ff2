use serde::{Deserialize, Serialize};

use crate::chart::Color;
use crate::error::{UpsetError, UpsetResult};

/// Addressable cell of the fixed 2×2 UpSet layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelSlot {
    /// Intersection cardinality bars.
    TopLeft,
    /// Spacer above the totals panel.
    TopRight,
    /// Membership dot-matrix.
    BottomLeft,
    /// Category totals bars.
    BottomRight,
}

impl PanelSlot {
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    #[must_use]
    pub const fn row(self) -> usize {
        match self {
            Self::TopLeft | Self::TopRight => 0,
            Self::BottomLeft | Self::BottomRight => 1,
        }
    }

    #[must_use]
    pub const fn column(self) -> usize {
        match self {
            Self::TopLeft | Self::BottomLeft => 0,
            Self::TopRight | Self::BottomRight => 1,
        }
    }

    /// 1-based subplot number in row-major order.
    #[must_use]
    pub const fn subplot_index(self) -> usize {
        self.row() * 2 + self.column() + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarOrientation {
    Vertical,
    Horizontal,
}

/// Bars over a categorical axis.
///
/// For vertical bars `labels` run along x and `values` along y; horizontal
/// bars swap the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    pub name: String,
    pub orientation: BarOrientation,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub hover_template: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Hover {
    Skip,
    Text { text: Vec<String> },
}

/// Marker-only scatter in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub name: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub marker_color: Color,
    pub hover: Hover,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    Bar(BarTrace),
    Scatter(ScatterTrace),
}

impl Trace {
    fn validate(&self) -> UpsetResult<()> {
        match self {
            Self::Bar(bar) => {
                if bar.labels.len() != bar.values.len() {
                    return Err(UpsetError::Serialization(format!(
                        "bar trace `{}` has {} labels for {} values",
                        bar.name,
                        bar.labels.len(),
                        bar.values.len()
                    )));
                }
                bar.color.validate()
            }
            Self::Scatter(scatter) => {
                if scatter.x.len() != scatter.y.len() {
                    return Err(UpsetError::Serialization(
                        "scatter trace x/y lengths differ".to_owned(),
                    ));
                }
                if let Hover::Text { text } = &scatter.hover {
                    if text.len() != scatter.x.len() {
                        return Err(UpsetError::Serialization(
                            "scatter hover text must have one entry per point".to_owned(),
                        ));
                    }
                }
                scatter.marker_color.validate()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub visible: bool,
    pub show_tick_labels: bool,
    pub fixed_range: bool,
    pub range: Option<[f64; 2]>,
    pub tick_values: Option<Vec<f64>>,
    pub tick_text: Option<Vec<String>>,
    pub title: Option<String>,
    pub tick_font_size: Option<f64>,
    pub auto_margin: bool,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            visible: true,
            show_tick_labels: true,
            fixed_range: false,
            range: None,
            tick_values: None,
            tick_text: None,
            title: None,
            tick_font_size: None,
            auto_margin: false,
        }
    }
}

impl Axis {
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }

    /// Visible axis without tick labels that cannot be zoomed.
    #[must_use]
    pub fn locked() -> Self {
        Self {
            show_tick_labels: false,
            fixed_range: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range = Some([range.0, range.1]);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, values: Vec<f64>, text: Vec<String>, font_size: f64) -> Self {
        self.show_tick_labels = true;
        self.tick_values = Some(values);
        self.tick_text = Some(text);
        self.tick_font_size = Some(font_size);
        self.auto_margin = true;
        self
    }
}

/// Free text positioned in paper coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub show_arrow: bool,
}

impl Annotation {
    #[must_use]
    pub fn centered(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            x: 0.5,
            y: 0.5,
            font_size,
            show_arrow: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub slot: PanelSlot,
    pub traces: Vec<Trace>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl Panel {
    #[must_use]
    pub fn new(slot: PanelSlot, x_axis: Axis, y_axis: Axis) -> Self {
        Self {
            slot,
            traces: Vec::new(),
            x_axis,
            y_axis,
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }
}

/// Relative sizes of the 2×2 subplot grid.
///
/// `row_heights[0]` is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubplotGrid {
    pub column_widths: [f64; 2],
    pub row_heights: [f64; 2],
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
}

impl Default for SubplotGrid {
    fn default() -> Self {
        Self {
            column_widths: [2.0, 0.2],
            row_heights: [0.4, 2.0],
            horizontal_spacing: 0.005,
            vertical_spacing: 0.01,
        }
    }
}

impl SubplotGrid {
    /// Paper-space `(x_domain, y_domain)` of `slot`.
    #[must_use]
    pub fn domain(self, slot: PanelSlot) -> ([f64; 2], [f64; 2]) {
        let x = split_unit(self.column_widths, self.horizontal_spacing, slot.column());
        // Row 0 is drawn at the top, so y domains count down from 1.
        let [start, end] = split_unit(self.row_heights, self.vertical_spacing, slot.row());
        (x, [1.0 - end, 1.0 - start])
    }
}

fn split_unit(weights: [f64; 2], spacing: f64, index: usize) -> [f64; 2] {
    let available = 1.0 - spacing;
    let total = weights[0] + weights[1];
    let first = weights[0] / total * available;
    if index == 0 {
        [0.0, first]
    } else {
        [first + spacing, 1.0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaceholderReason {
    NoData,
    SingleRecord,
    TooManyCategories { category_count: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "body", rename_all = "snake_case")]
pub enum ChartBody {
    /// Explanatory text instead of a chart.
    Placeholder {
        reason: PlaceholderReason,
        annotation: Annotation,
        x_axis: Axis,
        y_axis: Axis,
    },
    Upset {
        grid: SubplotGrid,
        panels: Vec<Panel>,
        truncated: bool,
    },
}

/// Renderer-agnostic description of one chart.
///
/// Text fields use `\n` for line breaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescription {
    pub title: Option<String>,
    pub height: Option<u32>,
    pub body: ChartBody,
}

impl ChartDescription {
    #[must_use]
    pub fn placeholder(reason: PlaceholderReason, text: impl Into<String>, font_size: f64) -> Self {
        Self {
            title: None,
            height: None,
            body: ChartBody::Placeholder {
                reason,
                annotation: Annotation::centered(text, font_size),
                x_axis: Axis::hidden(),
                y_axis: Axis::hidden(),
            },
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self.body, ChartBody::Placeholder { .. })
    }

    #[must_use]
    pub fn placeholder_reason(&self) -> Option<PlaceholderReason> {
        match &self.body {
            ChartBody::Placeholder { reason, .. } => Some(*reason),
            ChartBody::Upset { .. } => None,
        }
    }

    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self.body, ChartBody::Upset { truncated: true, .. })
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        match &self.body {
            ChartBody::Placeholder { annotation, .. } => std::slice::from_ref(annotation),
            ChartBody::Upset { .. } => &[],
        }
    }

    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        match &self.body {
            ChartBody::Placeholder { .. } => &[],
            ChartBody::Upset { panels, .. } => panels,
        }
    }

    #[must_use]
    pub fn panel(&self, slot: PanelSlot) -> Option<&Panel> {
        self.panels().iter().find(|panel| panel.slot == slot)
    }

    /// Every axis of the chart, x before y, in panel order.
    #[must_use]
    pub fn axes(&self) -> Vec<&Axis> {
        match &self.body {
            ChartBody::Placeholder { x_axis, y_axis, .. } => vec![x_axis, y_axis],
            ChartBody::Upset { panels, .. } => panels
                .iter()
                .flat_map(|panel| [&panel.x_axis, &panel.y_axis])
                .collect(),
        }
    }

    /// Checks trace shapes and colors before handing the description to a renderer.
    pub fn validate(&self) -> UpsetResult<()> {
        for panel in self.panels() {
            for trace in &panel.traces {
                trace.validate()?;
            }
        }
        Ok(())
    }
}
