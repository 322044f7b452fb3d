//! Skill graph: the candidate at the hub, one spoke per skill

pub mod builder;

pub use builder::{build_skill_graph, Edge, Node, SkillClass, SkillGraph, WidgetConfig, HUB_ID};
