//! HTML rendering for the dashboard pages.
//!
//! The landing page embeds the chart definitions as JSON and draws them with plotly.js; the
//! results page lists every category and highlights the predicted ones.

use api_shared::{ClassifyRes, GraphsRes};
use html_escape::{encode_safe, encode_text};

const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Serialise `value` for embedding inside a `<script>` element.
///
/// `</` is escaped so that message text can never close the script early.
fn script_json<T: serde::Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn layout(title: &str, query: &str, body: &str, scripts: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="{BOOTSTRAP_CSS}">
  <script src="{PLOTLY_SRC}"></script>
</head>
<body>
  <nav class="navbar navbar-dark bg-dark">
    <div class="container">
      <a class="navbar-brand" href="/">Disaster Response Project</a>
    </div>
  </nav>
  <div class="container py-5 text-center">
    <h1>Disaster Response Project</h1>
    <p class="lead">Analyzing message data for disaster response</p>
    <form action="/go" method="get" class="row justify-content-center g-2">
      <div class="col-lg-8">
        <input type="text" class="form-control form-control-lg" name="query"
               value="{query}" placeholder="Enter a message to classify">
      </div>
      <div class="col-auto">
        <button type="submit" class="btn btn-lg btn-success">Classify Message</button>
      </div>
    </form>
  </div>
  <div class="container">
{body}
  </div>
{scripts}
</body>
</html>
"#,
        title = encode_text(title),
        query = encode_safe(query),
    )
}

/// Landing page with one plot container per chart.
pub fn render_index(graphs: &GraphsRes) -> serde_json::Result<String> {
    let mut body = String::from("    <h2 class=\"text-center\">Overview of Training Dataset</h2>\n");
    for id in &graphs.ids {
        body.push_str(&format!(
            "    <div id=\"{}\"></div>\n",
            encode_safe(id)
        ));
    }

    let scripts = format!(
        r#"  <script>
    const graphs = {graphs};
    const ids = {ids};
    for (let i = 0; i < graphs.length; i++) {{
      Plotly.newPlot(ids[i], graphs[i].data, graphs[i].layout);
    }}
  </script>"#,
        graphs = script_json(&graphs.graphs)?,
        ids = script_json(&graphs.ids)?,
    );

    Ok(layout("Disaster Response Project", "", &body, &scripts))
}

/// Results page echoing the query and listing every category with its prediction.
pub fn render_go(result: &ClassifyRes) -> String {
    let mut body = format!(
        "    <h2 class=\"text-center\">Result</h2>\n    <p class=\"text-center\">Message: <em>{}</em></p>\n    <ul class=\"list-group\">\n",
        encode_text(&result.query)
    );
    for label in &result.labels {
        let class = if label.label == 1 {
            "list-group-item list-group-item-success text-center"
        } else {
            "list-group-item list-group-item-dark text-center"
        };
        body.push_str(&format!(
            "      <li class=\"{class}\" data-label=\"{}\">{}</li>\n",
            label.label,
            encode_text(&label.category.replace('_', " "))
        ));
    }
    body.push_str("    </ul>\n");

    layout("Disaster Response Project", &result.query, &body, "")
}
