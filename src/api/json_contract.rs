use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::chart::{
    Annotation, Axis, BarOrientation, ChartBody, ChartDescription, Hover, PanelSlot, Trace,
};
use crate::error::{UpsetError, UpsetResult};

use super::upset_builder::{HOVER_LABEL, HOVER_VALUE};

pub const CHART_DESCRIPTION_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptionJsonContractV1 {
    pub schema_version: u32,
    pub chart: ChartDescription,
}

impl ChartDescription {
    pub fn to_json_contract_v1_pretty(&self) -> UpsetResult<String> {
        let payload = ChartDescriptionJsonContractV1 {
            schema_version: CHART_DESCRIPTION_JSON_SCHEMA_V1,
            chart: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            UpsetError::Serialization(format!("failed to serialize chart contract v1: {e}"))
        })
    }

    /// Accepts either a bare description or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> UpsetResult<Self> {
        if let Ok(chart) = serde_json::from_str::<ChartDescription>(input) {
            return Ok(chart);
        }
        let payload: ChartDescriptionJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            UpsetError::Serialization(format!("failed to parse chart json payload: {e}"))
        })?;
        if payload.schema_version != CHART_DESCRIPTION_JSON_SCHEMA_V1 {
            return Err(UpsetError::Serialization(format!(
                "unsupported chart schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.chart)
    }

    /// Plotly figure (`{"data": [...], "layout": {...}}`) for this description.
    pub fn to_plotly_figure(&self) -> UpsetResult<Value> {
        self.validate()?;

        let mut layout = Map::new();
        if let Some(title) = &self.title {
            layout.insert("title".to_owned(), json!({ "text": markup(title) }));
        }
        if let Some(height) = self.height {
            layout.insert("height".to_owned(), json!(height));
        }

        let mut data = Vec::new();
        match &self.body {
            ChartBody::Placeholder {
                annotation,
                x_axis,
                y_axis,
                ..
            } => {
                layout.insert("xaxis".to_owned(), plotly_axis(x_axis, None));
                layout.insert("yaxis".to_owned(), plotly_axis(y_axis, None));
                layout.insert(
                    "annotations".to_owned(),
                    Value::Array(vec![plotly_annotation(annotation)]),
                );
            }
            ChartBody::Upset { grid, panels, .. } => {
                for panel in panels {
                    let (x_ref, y_ref) = axis_refs(panel.slot);
                    let (x_domain, y_domain) = grid.domain(panel.slot);
                    layout.insert(
                        layout_key(&x_ref),
                        plotly_axis(&panel.x_axis, Some((x_domain, &y_ref))),
                    );
                    layout.insert(
                        layout_key(&y_ref),
                        plotly_axis(&panel.y_axis, Some((y_domain, &x_ref))),
                    );
                    for trace in &panel.traces {
                        data.push(plotly_trace(trace, &x_ref, &y_ref));
                    }
                }
            }
        }

        Ok(json!({ "data": data, "layout": Value::Object(layout) }))
    }

    pub fn to_plotly_json_pretty(&self) -> UpsetResult<String> {
        serde_json::to_string_pretty(&self.to_plotly_figure()?).map_err(|e| {
            UpsetError::Serialization(format!("failed to serialize plotly figure: {e}"))
        })
    }
}

/// Plotly renders `<br>` as a line break.
fn markup(text: &str) -> String {
    text.replace('\n', "<br>")
}

fn axis_refs(slot: PanelSlot) -> (String, String) {
    match slot.subplot_index() {
        1 => ("x".to_owned(), "y".to_owned()),
        index => (format!("x{index}"), format!("y{index}")),
    }
}

/// `x3` -> `xaxis3`, `y` -> `yaxis`.
fn layout_key(axis_ref: &str) -> String {
    let (letter, index) = axis_ref.split_at(1);
    format!("{letter}axis{index}")
}

fn plotly_axis(axis: &Axis, placement: Option<([f64; 2], &str)>) -> Value {
    let mut out = Map::new();
    out.insert("visible".to_owned(), json!(axis.visible));
    out.insert("showticklabels".to_owned(), json!(axis.show_tick_labels));
    out.insert("fixedrange".to_owned(), json!(axis.fixed_range));
    if let Some((domain, anchor)) = placement {
        out.insert("domain".to_owned(), json!(domain));
        out.insert("anchor".to_owned(), json!(anchor));
    }
    if let Some(range) = axis.range {
        out.insert("range".to_owned(), json!(range));
    }
    if let (Some(values), Some(text)) = (&axis.tick_values, &axis.tick_text) {
        out.insert("tickmode".to_owned(), json!("array"));
        out.insert("tickvals".to_owned(), json!(values));
        out.insert(
            "ticktext".to_owned(),
            json!(text.iter().map(|t| markup(t)).collect::<Vec<_>>()),
        );
    }
    if let Some(size) = axis.tick_font_size {
        out.insert("tickfont".to_owned(), json!({ "size": size }));
    }
    if let Some(title) = &axis.title {
        out.insert("title".to_owned(), json!({ "text": markup(title) }));
    }
    if axis.auto_margin {
        out.insert("automargin".to_owned(), json!(true));
    }
    Value::Object(out)
}

fn plotly_annotation(annotation: &Annotation) -> Value {
    json!({
        "text": markup(&annotation.text),
        "xref": "paper",
        "yref": "paper",
        "x": annotation.x,
        "y": annotation.y,
        "showarrow": annotation.show_arrow,
        "font": { "size": annotation.font_size },
    })
}

fn plotly_trace(trace: &Trace, x_ref: &str, y_ref: &str) -> Value {
    match trace {
        Trace::Bar(bar) => {
            let labels: Vec<String> = bar.labels.iter().map(|l| markup(l)).collect();
            let (x, y, orientation, value_ref, label_ref) = match bar.orientation {
                BarOrientation::Vertical => (json!(labels), json!(bar.values), "v", "%{y}", "%{x}"),
                BarOrientation::Horizontal => {
                    (json!(bar.values), json!(labels), "h", "%{x}", "%{y}")
                }
            };
            let template = markup(&bar.hover_template)
                .replace(HOVER_VALUE, value_ref)
                .replace(HOVER_LABEL, label_ref);
            json!({
                "type": "bar",
                "name": bar.name,
                "x": x,
                "y": y,
                "orientation": orientation,
                "showlegend": false,
                "hovertemplate": format!("{template}<extra></extra>"),
                "marker": { "color": bar.color.to_css() },
                "xaxis": x_ref,
                "yaxis": y_ref,
            })
        }
        Trace::Scatter(scatter) => {
            let mut out = json!({
                "type": "scatter",
                "mode": "markers",
                "x": scatter.x,
                "y": scatter.y,
                "showlegend": false,
                "marker": { "color": scatter.marker_color.to_css() },
                "xaxis": x_ref,
                "yaxis": y_ref,
            });
            if let Value::Object(map) = &mut out {
                if let Some(name) = &scatter.name {
                    map.insert("name".to_owned(), json!(name));
                }
                match &scatter.hover {
                    Hover::Skip => {
                        map.insert("hoverinfo".to_owned(), json!("skip"));
                    }
                    Hover::Text { text } => {
                        map.insert(
                            "hovertext".to_owned(),
                            json!(text.iter().map(|t| markup(t)).collect::<Vec<_>>()),
                        );
                        map.insert(
                            "hovertemplate".to_owned(),
                            json!("%{hovertext}<extra></extra>"),
                        );
                    }
                }
            }
            out
        }
    }
}
