use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::chart::ChartDescription;
use crate::error::{UpsetError, UpsetResult};

pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

impl ChartDescription {
    /// Standalone HTML page that draws this chart with plotly.js.
    pub fn to_html_document(&self) -> UpsetResult<String> {
        let figure = serde_json::to_string(&self.to_plotly_figure()?).map_err(|e| {
            UpsetError::Serialization(format!("failed to serialize plotly figure: {e}"))
        })?;
        // Keep `</script>` inside labels from closing the inline script.
        let figure = figure.replace("</", "<\\/");
        let page_title = self
            .title
            .as_deref()
            .and_then(|title| title.lines().next())
            .unwrap_or("UpSet Plot");

        let mut html = String::with_capacity(figure.len() + 1024);
        let fmt_err = |e: std::fmt::Error| UpsetError::Serialization(e.to_string());
        writeln!(html, "<!DOCTYPE html>").map_err(fmt_err)?;
        writeln!(html, "<html lang=\"en\">").map_err(fmt_err)?;
        writeln!(html, "<head>").map_err(fmt_err)?;
        writeln!(html, "<meta charset=\"utf-8\"/>").map_err(fmt_err)?;
        writeln!(html, "<title>{}</title>", escape_html(page_title)).map_err(fmt_err)?;
        writeln!(html, "<script src=\"{PLOTLY_CDN_URL}\"></script>").map_err(fmt_err)?;
        writeln!(html, "</head>").map_err(fmt_err)?;
        writeln!(html, "<body>").map_err(fmt_err)?;
        writeln!(html, "<div id=\"upset-plot\"></div>").map_err(fmt_err)?;
        writeln!(html, "<script>").map_err(fmt_err)?;
        writeln!(html, "const figure = {figure};").map_err(fmt_err)?;
        writeln!(
            html,
            "Plotly.newPlot(\"upset-plot\", figure.data, figure.layout, {{responsive: true}});"
        )
        .map_err(fmt_err)?;
        writeln!(html, "</script>").map_err(fmt_err)?;
        writeln!(html, "</body>").map_err(fmt_err)?;
        writeln!(html, "</html>").map_err(fmt_err)?;
        Ok(html)
    }

    pub fn write_html(&self, path: impl AsRef<Path>) -> UpsetResult<()> {
        let path = path.as_ref();
        let html = self.to_html_document()?;
        fs::write(path, html).map_err(|source| UpsetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "wrote upset plot html");
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
