//! Skill graph renderers: JSON and a self-contained vis-network page

use crate::cli::ArtifactFormat;
use crate::error::{CareerForgeError, Result};
use crate::graph::{SkillClass, SkillGraph};
use askama::Template;
use colored::Colorize;
use serde_json::json;

pub fn render_json(graph: &SkillGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Tree view for the terminal
pub fn render_console(graph: &SkillGraph, use_colors: bool) -> String {
    let mut out = format!("{}\n", graph.hub().label);
    let spokes: Vec<_> = graph.nodes.iter().filter(|n| n.class != SkillClass::Hub).collect();

    for (i, node) in spokes.iter().enumerate() {
        let branch = if i + 1 == spokes.len() { "└──" } else { "├──" };
        let tag = node.class.edge_label().unwrap_or_default();
        let line = format!("{} {} {}", branch, tag, node.label);
        let line = match (use_colors, node.class) {
            (true, SkillClass::Have) => line.truecolor(0x10, 0xb9, 0x81).to_string(),
            (true, SkillClass::Need) => line.truecolor(0xf5, 0x9e, 0x0b).to_string(),
            _ => line,
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Skill Graph</title>
    <script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
    <style>
        body { background: #0f172a; color: #e2e8f0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }
        #graph { width: {{ width }}px; height: {{ height }}px; margin: 0 auto; border: 1px solid #334155; border-radius: 8px; }
    </style>
</head>
<body>
    <h1>🕸️ Skill Graph</h1>
    <p>{{ have_count }} skills you have, {{ need_count }} to learn</p>
    <div id="graph"></div>
    <script>
        const nodes = new vis.DataSet({{ nodes_json|safe }});
        const edges = new vis.DataSet({{ edges_json|safe }});
        new vis.Network(document.getElementById("graph"), { nodes, edges }, {{ options_json|safe }});
    </script>
</body>
</html>
"#
)]
struct GraphTemplate {
    width: u32,
    height: u32,
    have_count: usize,
    need_count: usize,
    nodes_json: String,
    edges_json: String,
    options_json: String,
}

/// JSON safe to inline inside a `<script>` element
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub fn render_html(graph: &SkillGraph) -> Result<String> {
    let config = &graph.config;
    let options = json!({
        "nodes": { "shape": "dot" },
        "edges": { "arrows": { "to": { "enabled": config.directed } } },
        "interaction": { "hover": config.node_highlight_behavior },
        "physics": config.physics,
    });

    GraphTemplate {
        width: config.width,
        height: config.height,
        have_count: graph.skills(SkillClass::Have).count(),
        need_count: graph.skills(SkillClass::Need).count(),
        nodes_json: script_json(&graph.nodes)?,
        edges_json: script_json(&graph.edges)?,
        options_json: script_json(&options)?,
    }
    .render()
    .map_err(|e| CareerForgeError::OutputFormatting(e.to_string()))
}

pub fn render(format: ArtifactFormat, graph: &SkillGraph, use_colors: bool) -> Result<String> {
    match format {
        ArtifactFormat::Console => Ok(render_console(graph, use_colors)),
        ArtifactFormat::Html => render_html(graph),
        ArtifactFormat::Json => render_json(graph),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_skill_graph, WidgetConfig};

    fn graph() -> SkillGraph {
        build_skill_graph(
            &["Rust".to_string()],
            &["</script>".to_string(), "Kafka".to_string()],
            WidgetConfig::default(),
        )
    }

    #[test]
    fn test_console_tree() {
        let out = render_console(&graph(), false);
        assert_eq!(out, "YOU\n├── HAVE Rust\n├── NEED </script>\n└── NEED Kafka\n");
    }

    #[test]
    fn test_html_embeds_graph() {
        let html = render_html(&graph()).unwrap();

        assert!(html.contains("vis-network"));
        assert!(html.contains("1 skills you have, 2 to learn"));
        assert!(html.contains("\"barnesHut\""));
        assert!(html.contains("width: 1000px"));
        assert!(html.contains("<\\/script>"));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_json_render() {
        let value: serde_json::Value = serde_json::from_str(&render_json(&graph()).unwrap()).unwrap();
        assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
        assert_eq!(value["edges"].as_array().unwrap().len(), 3);
    }
}
