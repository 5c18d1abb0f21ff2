//! Declarative chart description produced by the builder.

mod color;
mod description;

pub use color::Color;
pub use description::{
    Annotation, Axis, BarOrientation, BarTrace, ChartBody, ChartDescription, Hover, Panel,
    PanelSlot, PlaceholderReason, ScatterTrace, SubplotGrid, Trace,
};
