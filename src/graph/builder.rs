//! Star-topology skill graph with display attributes for a vis-network style widget

use crate::matching::SkillSet;
use serde::Serialize;

pub const HUB_ID: &str = "YOU";

const HAVE_COLOR: &str = "#10b981";
const NEED_COLOR: &str = "#f59e0b";
const HIGHLIGHT_COLOR: &str = "#a78bfa";

/// Membership class of a skill node; all visual attributes derive from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillClass {
    Hub,
    Have,
    Need,
}

impl SkillClass {
    fn node_style(self) -> NodeStyle {
        match self {
            SkillClass::Hub => NodeStyle { size: 50, color: "#6366f1", border_width: 3, border_color: "#818cf8", font_size: 18 },
            SkillClass::Have => NodeStyle { size: 28, color: HAVE_COLOR, border_width: 2, border_color: "#34d399", font_size: 13 },
            SkillClass::Need => NodeStyle { size: 26, color: NEED_COLOR, border_width: 2, border_color: "#fbbf24", font_size: 13 },
        }
    }

    /// Edge label, `None` for the hub
    pub fn edge_label(self) -> Option<&'static str> {
        match self {
            SkillClass::Hub => None,
            SkillClass::Have => Some("HAVE"),
            SkillClass::Need => Some("NEED"),
        }
    }

    fn id_prefix(self) -> &'static str {
        match self {
            SkillClass::Hub => "hub",
            SkillClass::Have => "present",
            SkillClass::Need => "missing",
        }
    }

    fn tooltip(self, skill: &str) -> Option<String> {
        match self {
            SkillClass::Hub => None,
            SkillClass::Have => Some(format!("✅ You have: {}", skill)),
            SkillClass::Need => Some(format!("⚠️ Learn: {}", skill)),
        }
    }
}

struct NodeStyle {
    size: u32,
    color: &'static str,
    border_width: u32,
    border_color: &'static str,
    font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<FontBold>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontBold {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub label: String,
    pub size: u32,
    pub color: String,
    pub border_width: u32,
    pub border_color: String,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip)]
    pub class: SkillClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Smooth {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    #[serde(rename = "from")]
    pub source: String,
    #[serde(rename = "to")]
    pub target: String,
    pub label: String,
    pub color: String,
    pub width: f32,
    pub font: Font,
    pub smooth: Smooth,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub width: u32,
    pub height: u32,
    pub directed: bool,
    pub node_highlight_behavior: bool,
    pub highlight_color: String,
    pub collapsible: bool,
    pub node: NodeOptions,
    pub link: LinkOptions,
    pub physics: Physics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOptions {
    pub label_property: String,
    pub render_label: bool,
    pub highlight_stroke_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOptions {
    pub highlight_color: String,
    pub render_label: bool,
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Physics {
    pub enabled: bool,
    pub barnes_hut: BarnesHut,
    pub max_velocity: f32,
    pub solver: String,
    pub timestep: f32,
    pub stabilization: Stabilization,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarnesHut {
    pub theta: f32,
    pub gravitational_constant: f32,
    pub central_gravity: f32,
    pub spring_length: f32,
    pub spring_constant: f32,
    pub damping: f32,
    pub avoid_overlap: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stabilization {
    pub iterations: u32,
    pub fit: bool,
    pub update_interval: u32,
}

impl WidgetConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            directed: true,
            node_highlight_behavior: true,
            highlight_color: HIGHLIGHT_COLOR.to_string(),
            collapsible: false,
            node: NodeOptions {
                label_property: "label".to_string(),
                render_label: true,
                highlight_stroke_color: HIGHLIGHT_COLOR.to_string(),
            },
            link: LinkOptions {
                highlight_color: HIGHLIGHT_COLOR.to_string(),
                render_label: true,
                font_size: 11,
            },
            physics: Physics {
                enabled: true,
                barnes_hut: BarnesHut {
                    theta: 0.5,
                    gravitational_constant: -35000.0,
                    central_gravity: 0.3,
                    spring_length: 250.0,
                    spring_constant: 0.04,
                    damping: 0.09,
                    avoid_overlap: 0.2,
                },
                max_velocity: 50.0,
                solver: "barnesHut".to_string(),
                timestep: 0.35,
                stabilization: Stabilization {
                    iterations: 200,
                    fit: true,
                    update_interval: 25,
                },
            },
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::with_size(1000, 600)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub config: WidgetConfig,
}

impl SkillGraph {
    pub fn hub(&self) -> &Node {
        // build_skill_graph always pushes the hub first
        &self.nodes[0]
    }

    pub fn skills(&self, class: SkillClass) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.class == class)
    }
}

fn white_font(size: u32) -> Font {
    Font {
        size,
        color: "#ffffff".to_string(),
        bold: Some(FontBold { color: "#ffffff".to_string() }),
    }
}

fn node(id: String, label: &str, class: SkillClass) -> Node {
    let style = class.node_style();
    Node {
        id,
        label: label.to_string(),
        size: style.size,
        color: style.color.to_string(),
        border_width: style.border_width,
        border_color: style.border_color.to_string(),
        font: white_font(style.font_size),
        title: class.tooltip(label),
        class,
    }
}

fn spoke(target: &str, class: SkillClass) -> Edge {
    let color = class.node_style().color.to_string();
    Edge {
        source: HUB_ID.to_string(),
        target: target.to_string(),
        label: class.edge_label().unwrap_or_default().to_string(),
        color: color.clone(),
        width: 2.5,
        font: Font { size: 11, color, bold: None },
        smooth: Smooth { kind: "continuous".to_string() },
    }
}

/// Build the star graph: hub "YOU", then present skills, then missing skills.
///
/// Node ids combine class, position and text (`present_0_Python`) so the same
/// skill in both lists, or twice in one list, never collides.
pub fn build_skill_graph<S: AsRef<str>>(present: &[S], missing: &[S], config: WidgetConfig) -> SkillGraph {
    let mut nodes = Vec::with_capacity(1 + present.len() + missing.len());
    let mut edges = Vec::with_capacity(present.len() + missing.len());

    nodes.push(node(HUB_ID.to_string(), HUB_ID, SkillClass::Hub));

    for (class, skills) in [(SkillClass::Have, present), (SkillClass::Need, missing)] {
        for (i, skill) in skills.iter().enumerate() {
            let skill = skill.as_ref();
            let id = format!("{}_{}_{}", class.id_prefix(), i, skill);
            edges.push(spoke(&id, class));
            nodes.push(node(id, skill, class));
        }
    }

    SkillGraph { nodes, edges, config }
}

impl SkillSet {
    pub fn to_graph(&self, config: WidgetConfig) -> SkillGraph {
        build_skill_graph(&self.present, &self.missing, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_node_and_edge_counts() {
        let present = strings(&["Python", "SQL", "Docker"]);
        let missing = strings(&["Kubernetes", "Go"]);
        let graph = build_skill_graph(&present, &missing, WidgetConfig::default());

        assert_eq!(graph.nodes.len(), 1 + 3 + 2);
        assert_eq!(graph.edges.len(), 3 + 2);
        assert!(graph.edges.iter().all(|e| e.source == HUB_ID));
        assert!(graph.edges.iter().all(|e| e.target != HUB_ID));
    }

    #[test]
    fn test_labels_follow_membership() {
        let present = strings(&["Python", "SQL"]);
        let missing = strings(&["Python"]);
        let graph = build_skill_graph(&present, &missing, WidgetConfig::default());

        let have: Vec<_> = graph.edges.iter().filter(|e| e.label == "HAVE").map(|e| e.target.as_str()).collect();
        let need: Vec<_> = graph.edges.iter().filter(|e| e.label == "NEED").map(|e| e.target.as_str()).collect();

        assert_eq!(have, vec!["present_0_Python", "present_1_SQL"]);
        assert_eq!(need, vec!["missing_0_Python"]);
        assert!(graph.skills(SkillClass::Have).all(|n| n.color == HAVE_COLOR));
        assert!(graph.skills(SkillClass::Need).all(|n| n.color == NEED_COLOR));
    }

    #[test]
    fn test_empty_inputs_give_hub_only() {
        let graph = build_skill_graph::<String>(&[], &[], WidgetConfig::default());

        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.hub().id, "YOU");
        assert_eq!(graph.hub().size, 50);
    }

    #[test]
    fn test_duplicate_skills_get_distinct_ids() {
        let present = strings(&["Rust", "Rust"]);
        let missing = strings(&["Rust"]);
        let graph = build_skill_graph(&present, &missing, WidgetConfig::default());

        let ids: HashSet<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), graph.nodes.len());
    }

    #[test]
    fn test_display_attributes() {
        let graph = SkillSet::new(strings(&["SQL"]), strings(&["Go"])).to_graph(WidgetConfig::with_size(800, 500));

        let sql = &graph.nodes[1];
        assert_eq!(sql.size, 28);
        assert_eq!(sql.title.as_deref(), Some("✅ You have: SQL"));
        let go = &graph.nodes[2];
        assert_eq!(go.size, 26);
        assert_eq!(go.border_color, "#fbbf24");
        assert_eq!(go.title.as_deref(), Some("⚠️ Learn: Go"));

        assert_eq!(graph.edges[1].color, NEED_COLOR);
        assert_eq!(graph.edges[1].width, 2.5);
        assert_eq!(graph.config.width, 800);
    }

    #[test]
    fn test_json_shape() {
        let graph = build_skill_graph(&strings(&["SQL"]), &[], WidgetConfig::default());
        let json = serde_json::to_value(&graph).unwrap();

        assert_eq!(json["nodes"][0]["borderWidth"], 3);
        assert_eq!(json["edges"][0]["from"], "YOU");
        assert_eq!(json["edges"][0]["to"], "present_0_SQL");
        assert_eq!(json["edges"][0]["smooth"]["type"], "continuous");
        assert_eq!(json["config"]["physics"]["barnesHut"]["gravitationalConstant"], -35000.0);
        assert_eq!(json["config"]["physics"]["stabilization"]["updateInterval"], 25);
        assert!(json["nodes"][0].get("title").is_none());
        assert!(json["nodes"][0].get("class").is_none());
    }
}
