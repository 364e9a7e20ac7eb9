//! Graph-level checks over the quest prerequisite graph.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::issues::ValidationReport;
use super::schema::content_id;

/// Quest id to the ids it requires, in declaration order.
pub struct PrerequisiteGraph {
    order: Vec<String>,
    edges: HashMap<String, Vec<String>>,
}

impl PrerequisiteGraph {
    pub fn from_quests(quests: &[Value]) -> Self {
        let mut order = Vec::new();
        let mut edges = HashMap::new();

        for quest in quests {
            let Some(quest) = quest.as_object() else {
                continue;
            };
            let Some(id) = content_id(quest.get("id")) else {
                continue;
            };
            let requires = quest
                .get("prerequisites")
                .and_then(|p| p.get("requiresQuestsCompleted"))
                .and_then(Value::as_array)
                .map(|requires| {
                    requires
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            // A redeclared id keeps its first position but takes the later edges.
            if edges.insert(id.to_string(), requires).is_none() {
                order.push(id.to_string());
            }
        }

        Self { order, edges }
    }

    fn neighbours(&self, node: &str) -> &[String] {
        self.edges.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every back edge found by a depth-first walk, as `[n, ..., n]`.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut on_stack: HashSet<&str> = HashSet::new();
        let mut path: Vec<&str> = Vec::new();
        // (node, index of the next neighbour to explore)
        let mut work: Vec<(&str, usize)> = Vec::new();

        for start in &self.order {
            let start = start.as_str();
            if visited.contains(start) {
                continue;
            }
            visited.insert(start);
            on_stack.insert(start);
            path.push(start);
            work.push((start, 0));

            while let Some(frame) = work.last_mut() {
                let (node, next) = *frame;
                let Some(neighbour) = self.neighbours(node).get(next) else {
                    work.pop();
                    path.pop();
                    on_stack.remove(node);
                    continue;
                };
                frame.1 += 1;
                let neighbour = neighbour.as_str();

                if on_stack.contains(neighbour) {
                    let begin = path.iter().position(|n| *n == neighbour).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        path[begin..].iter().map(|n| n.to_string()).collect();
                    cycle.push(neighbour.to_string());
                    cycles.push(cycle);
                } else if !visited.contains(neighbour) {
                    visited.insert(neighbour);
                    on_stack.insert(neighbour);
                    path.push(neighbour);
                    work.push((neighbour, 0));
                }
            }
        }

        cycles
    }
}

pub fn validate_quest_graph(quests_pack: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(quests) = quests_pack.get("quests").and_then(Value::as_array) else {
        return report;
    };
    for cycle in PrerequisiteGraph::from_quests(quests).find_cycles() {
        report.add(
            "$quests",
            format!("circular dependency detected: {}", cycle.join(" -> ")),
        );
    }
    report
}
