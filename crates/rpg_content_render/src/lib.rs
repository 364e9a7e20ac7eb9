use std::fmt::Write as _;

use rpg_content_core::core_api::{ItemSummary, PackCounts, QuestSummary, StoreSummary};
use rpg_content_core::validation::{Severity, ValidationReport};
use serde_json::{Map as JsonMap, Value as JsonValue};

const QUEST_ID_WIDTH: usize = 35;
const QUEST_DIFFICULTY_WIDTH: usize = 9;
const ITEM_ID_WIDTH: usize = 30;
const ITEM_VALUE_WIDTH: usize = 5;
const ITEM_CATEGORY_WIDTH: usize = 11;
const STORE_ID_WIDTH: usize = 25;
const STORE_PRICE_WIDTH: usize = 6;
const STORE_STOCK_WIDTH: usize = 4;

pub const NO_QUESTS: &str = "No quests found.";
pub const NO_ITEMS: &str = "No items found.";
pub const NO_STORE_ITEMS: &str = "No store items found. Use 'store add' to add items.";

// -----------------------------------------------------------------------------
// Text
// -----------------------------------------------------------------------------

pub fn render_quest_list(quests: &[QuestSummary]) -> String {
    if quests.is_empty() {
        return format!("{NO_QUESTS}\n");
    }
    let mut out = String::new();
    for quest in quests {
        writeln!(
            &mut out,
            "{:<id_w$} | {:<diff_w$} | steps={:>2} | enabled={} | {}",
            quest.id,
            quest.difficulty,
            quest.step_count,
            if quest.enabled { "True" } else { "False" },
            quest.title,
            id_w = QUEST_ID_WIDTH,
            diff_w = QUEST_DIFFICULTY_WIDTH,
        )
        .expect("writing to String cannot fail");
    }
    out
}

pub fn render_item_list(items: &[ItemSummary]) -> String {
    if items.is_empty() {
        return format!("{NO_ITEMS}\n");
    }
    let mut out = String::new();
    for item in items {
        writeln!(
            &mut out,
            "{:<id_w$} | value={:>val_w$} | category={:<cat_w$} | {}",
            item.id,
            plain(&item.value),
            item.category.as_deref().unwrap_or("-"),
            item.name,
            id_w = ITEM_ID_WIDTH,
            val_w = ITEM_VALUE_WIDTH,
            cat_w = ITEM_CATEGORY_WIDTH,
        )
        .expect("writing to String cannot fail");
    }
    out
}

pub fn render_store_list(entries: &[StoreSummary]) -> String {
    if entries.is_empty() {
        return format!("{NO_STORE_ITEMS}\n");
    }
    let mut out = String::new();
    for entry in entries {
        let stock = if entry.stock < 0 {
            "∞".to_string()
        } else {
            entry.stock.to_string()
        };
        writeln!(
            &mut out,
            "{:<id_w$} | buy={:>price_w$} | sell={:>price_w$} | stock={:>stock_w$} | {} | {}",
            entry.item_id,
            plain(&entry.buy_price),
            plain(&entry.sell_price),
            stock,
            if entry.available { "✓" } else { "✗" },
            entry.name,
            id_w = STORE_ID_WIDTH,
            price_w = STORE_PRICE_WIDTH,
            stock_w = STORE_STOCK_WIDTH,
        )
        .expect("writing to String cannot fail");
    }
    out
}

/// Pretty JSON with a trailing newline, as used by the `show` commands.
pub fn render_document(document: &JsonValue) -> String {
    let mut out = serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string());
    out.push('\n');
    out
}

/// Every issue of `report`, one ` - ` line each.
pub fn render_validation_report(report: &ValidationReport) -> String {
    let mut out = report.summary(None);
    out.push('\n');
    out
}

pub fn render_pack_counts(counts: &PackCounts) -> String {
    let mut out = format!(
        "OK: {} quests, {} items, {} recipes",
        counts.quests, counts.items, counts.recipes
    );
    if let Some(store_items) = counts.store_items {
        write!(&mut out, ", {store_items} store items").expect("writing to String cannot fail");
    }
    out.push('\n');
    out
}

fn plain(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// -----------------------------------------------------------------------------
// JSON
// -----------------------------------------------------------------------------

pub fn render_quest_list_json(quests: &[QuestSummary]) -> JsonValue {
    JsonValue::Array(
        quests
            .iter()
            .map(|quest| {
                let mut map = JsonMap::new();
                map.insert("id".to_string(), JsonValue::from(quest.id.as_str()));
                map.insert("title".to_string(), JsonValue::from(quest.title.as_str()));
                map.insert(
                    "difficulty".to_string(),
                    JsonValue::from(quest.difficulty.as_str()),
                );
                map.insert("steps".to_string(), JsonValue::from(quest.step_count));
                map.insert("enabled".to_string(), JsonValue::Bool(quest.enabled));
                JsonValue::Object(map)
            })
            .collect(),
    )
}

pub fn render_item_list_json(items: &[ItemSummary]) -> JsonValue {
    JsonValue::Array(
        items
            .iter()
            .map(|item| {
                let mut map = JsonMap::new();
                map.insert("id".to_string(), JsonValue::from(item.id.as_str()));
                map.insert("name".to_string(), JsonValue::from(item.name.as_str()));
                map.insert("value".to_string(), item.value.clone());
                map.insert(
                    "category".to_string(),
                    item.category
                        .as_deref()
                        .map_or(JsonValue::Null, JsonValue::from),
                );
                JsonValue::Object(map)
            })
            .collect(),
    )
}

pub fn render_store_list_json(entries: &[StoreSummary]) -> JsonValue {
    JsonValue::Array(
        entries
            .iter()
            .map(|entry| {
                let mut map = JsonMap::new();
                map.insert("itemId".to_string(), JsonValue::from(entry.item_id.as_str()));
                map.insert("name".to_string(), JsonValue::from(entry.name.as_str()));
                map.insert("buyPrice".to_string(), entry.buy_price.clone());
                map.insert("sellPrice".to_string(), entry.sell_price.clone());
                map.insert("stock".to_string(), JsonValue::from(entry.stock));
                map.insert("available".to_string(), JsonValue::Bool(entry.available));
                JsonValue::Object(map)
            })
            .collect(),
    )
}

pub fn render_validation_json(report: &ValidationReport, counts: &PackCounts) -> JsonValue {
    let mut map = JsonMap::new();
    map.insert("valid".to_string(), JsonValue::Bool(report.is_valid()));

    let mut counts_map = JsonMap::new();
    counts_map.insert("quests".to_string(), JsonValue::from(counts.quests));
    counts_map.insert("items".to_string(), JsonValue::from(counts.items));
    counts_map.insert("recipes".to_string(), JsonValue::from(counts.recipes));
    if let Some(store_items) = counts.store_items {
        counts_map.insert("storeItems".to_string(), JsonValue::from(store_items));
    }
    map.insert("counts".to_string(), JsonValue::Object(counts_map));

    let issues = report
        .issues()
        .iter()
        .map(|issue| {
            let mut issue_map = JsonMap::new();
            issue_map.insert("path".to_string(), JsonValue::from(issue.path.as_str()));
            issue_map.insert("message".to_string(), JsonValue::from(issue.message.as_str()));
            issue_map.insert(
                "severity".to_string(),
                JsonValue::from(match issue.severity {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                }),
            );
            JsonValue::Object(issue_map)
        })
        .collect();
    map.insert("issues".to_string(), JsonValue::Array(issues));
    JsonValue::Object(map)
}
