mod config;
mod html_export;
mod json_contract;
mod upset_builder;

pub use config::{DEFAULT_MAX_CATEGORIES, DEFAULT_MAX_INTERSECTIONS, UpsetConfig, UpsetPalette};
pub use html_export::PLOTLY_CDN_URL;
pub use json_contract::{CHART_DESCRIPTION_JSON_SCHEMA_V1, ChartDescriptionJsonContractV1};
pub use upset_builder::{
    HOVER_LABEL, HOVER_VALUE, build_upset_chart, build_upset_chart_from_json,
    build_upset_chart_with_config, figure_height, plot_title,
};
