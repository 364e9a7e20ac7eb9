mod cross_refs;
mod issues;
mod schema;

use std::collections::HashSet;

use serde_json::Value;

pub use cross_refs::{PrerequisiteGraph, validate_quest_graph};
pub use issues::{Severity, ValidationIssue, ValidationReport};
pub use schema::{
    validate_item, validate_item_pack, validate_quest, validate_quest_pack, validate_recipe_pack,
    validate_step, validate_store_pack,
};

use crate::core_api::PackKind;

/// Well-formed ids per pack. Derived state: always rebuilt from the documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdIndex {
    pub quests: HashSet<String>,
    pub items: HashSet<String>,
    pub recipes: HashSet<String>,
}

impl IdIndex {
    pub fn build(quests: &Value, items: &Value, recipes: &Value) -> Self {
        Self {
            quests: collect_ids(quests, PackKind::Quests),
            items: collect_ids(items, PackKind::Items),
            recipes: collect_ids(recipes, PackKind::Recipes),
        }
    }
}

fn collect_ids(pack: &Value, kind: PackKind) -> HashSet<String> {
    pack.get(kind.entries_key())
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| schema::content_id(entry.get("id")))
        .map(str::to_string)
        .collect()
}

/// Runs every pack validator plus the prerequisite cycle check.
///
/// Issue order: items, recipes, quests, store, cycles.
pub fn validate_packs(
    quests: &Value,
    items: &Value,
    recipes: &Value,
    store: Option<&Value>,
) -> ValidationReport {
    let ids = IdIndex::build(quests, items, recipes);

    let mut report = validate_item_pack(items);
    report.merge(validate_recipe_pack(recipes));
    report.merge(validate_quest_pack(quests, &ids.items, &ids.recipes));
    if let Some(store) = store {
        report.merge(validate_store_pack(store, &ids.items));
    }
    report.merge(validate_quest_graph(quests));
    report
}
