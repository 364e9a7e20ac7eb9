//! Structural checks for every entity kind.
//!
//! Validators never fail: every malformed shape becomes an issue tagged with
//! the JSON path of the offending value, and traversal continues.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::issues::ValidationReport;
use crate::core_api::PackKind;
use crate::model::{Difficulty, GatherAction, MarketCategory, Profession, RepeatKind, StepKind};
use crate::rules::{self, ID_PATTERN, SCHEMA_VERSION, TIER_MAX, TIER_MIN};

type Object = Map<String, Value>;

// -----------------------------------------------------------------------------
// Value helpers
// -----------------------------------------------------------------------------

/// Integer view of a value. Booleans and floats such as `2.0` never qualify.
pub(crate) fn strict_int(value: &Value) -> Option<i128> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(i128::from)
            .or_else(|| number.as_u64().map(i128::from)),
        _ => None,
    }
}

fn is_int_in(value: Option<&Value>, min: i64, max: Option<i64>) -> bool {
    let Some(n) = value.and_then(strict_int) else {
        return false;
    };
    n >= i128::from(min) && max.is_none_or(|max| n <= i128::from(max))
}

fn is_non_empty_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

/// The id string when `value` is a well-formed content id.
pub(crate) fn content_id(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| rules::is_valid_content_id(s))
}

/// Present and not null.
fn given<'a>(object: &'a Object, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

/// Renders a discriminator for an issue message; strings appear unquoted.
fn tag_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

/// Shared root checks; returns the entry array when it exists.
fn pack_entries<'a>(
    pack: &'a Value,
    kind: PackKind,
    report: &mut ValidationReport,
) -> Option<&'a Vec<Value>> {
    let label = kind.label();
    let Some(root) = pack.as_object() else {
        report.add(label, "root must be an object");
        return None;
    };

    let version_ok = root
        .get("schemaVersion")
        .and_then(strict_int)
        .is_some_and(|v| v == i128::from(SCHEMA_VERSION));
    if !version_ok {
        report.add(format!("{label}.schemaVersion"), "expected 1");
    }

    let key = kind.entries_key();
    match root.get(key) {
        Some(Value::Array(entries)) => Some(entries),
        _ => {
            report.add(format!("{label}.{key}"), "expected an array");
            None
        }
    }
}

// -----------------------------------------------------------------------------
// Items
// -----------------------------------------------------------------------------

pub fn validate_item(item: &Value, path: &str, report: &mut ValidationReport) {
    let Some(item) = item.as_object() else {
        report.add(path, "expected object");
        return;
    };

    if content_id(item.get("id")).is_none() {
        report.add(format!("{path}.id"), format!("invalid id, expected {ID_PATTERN}"));
    }
    for key in ["name", "description"] {
        if !is_non_empty_string(item.get(key)) {
            report.add(format!("{path}.{key}"), "required non-empty string");
        }
    }

    if let Some(max_stack) = given(item, "maxStack") {
        if !is_int_in(Some(max_stack), 1, None) {
            report.add(format!("{path}.maxStack"), "expected integer >= 1");
        }
    }
    if let Some(weight) = given(item, "weight") {
        if !weight.is_number() {
            report.add(format!("{path}.weight"), "expected number");
        }
    }
    if let Some(can_stack) = given(item, "canStack") {
        if !can_stack.is_boolean() {
            report.add(format!("{path}.canStack"), "expected boolean");
        }
    }
    if let Some(value) = given(item, "value") {
        if !value.as_f64().is_some_and(|v| v >= 0.0) {
            report.add(format!("{path}.value"), "expected number >= 0");
        }
    }

    if let Some(market) = given(item, "market") {
        validate_market(market, &format!("{path}.market"), report);
    }
}

fn validate_market(market: &Value, path: &str, report: &mut ValidationReport) {
    let Some(market) = market.as_object() else {
        report.add(path, "expected object");
        return;
    };

    if !market.get("tradable").is_some_and(Value::is_boolean) {
        report.add(format!("{path}.tradable"), "expected boolean");
    }
    let category_ok = market
        .get("category")
        .and_then(Value::as_str)
        .and_then(MarketCategory::from_tag)
        .is_some();
    if !category_ok {
        report.add(
            format!("{path}.category"),
            format!("expected one of {}", MarketCategory::sorted_tag_list()),
        );
    }

    for key in ["suggestedPrice", "minPrice", "maxPrice"] {
        if let Some(price) = given(market, key) {
            if !is_int_in(Some(price), 1, None) {
                report.add(format!("{path}.{key}"), "expected integer >= 1");
            }
        }
    }

    let min_price = market.get("minPrice").and_then(strict_int);
    let max_price = market.get("maxPrice").and_then(strict_int);
    if let (Some(min), Some(max)) = (min_price, max_price) {
        if max < min {
            report.add(format!("{path}.maxPrice"), "must be >= minPrice");
        }
    }
}

pub fn validate_item_pack(pack: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(items) = pack_entries(pack, PackKind::Items, &mut report) else {
        return report;
    };

    let mut seen: HashSet<&str> = HashSet::new();
    for (idx, item) in items.iter().enumerate() {
        let path = format!("$items.items[{idx}]");
        let Some(object) = item.as_object() else {
            report.add(path, "expected object");
            continue;
        };
        if let Some(id) = content_id(object.get("id")) {
            if !seen.insert(id) {
                report.add(format!("{path}.id"), format!("duplicate id '{id}'"));
            }
        }
        validate_item(item, &path, &mut report);
    }
    report
}

// -----------------------------------------------------------------------------
// Recipes
// -----------------------------------------------------------------------------

pub fn validate_recipe_pack(pack: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(recipes) = pack_entries(pack, PackKind::Recipes, &mut report) else {
        return report;
    };

    let mut seen: HashSet<&str> = HashSet::new();
    for (idx, recipe) in recipes.iter().enumerate() {
        let path = format!("$recipes.recipes[{idx}]");
        let Some(object) = recipe.as_object() else {
            report.add(path, "expected object");
            continue;
        };
        let Some(id) = content_id(object.get("id")) else {
            report.add(format!("{path}.id"), "invalid id");
            continue;
        };
        if !seen.insert(id) {
            report.add(format!("{path}.id"), format!("duplicate id '{id}'"));
        }
    }
    report
}

// -----------------------------------------------------------------------------
// Quest steps
// -----------------------------------------------------------------------------

pub fn validate_step(
    step: &Value,
    path: &str,
    report: &mut ValidationReport,
    item_ids: &HashSet<String>,
    recipe_ids: &HashSet<String>,
) {
    let Some(step) = step.as_object() else {
        report.add(path, "step must be an object");
        return;
    };

    let kind = match step.get("kind") {
        Some(Value::String(tag)) => StepKind::from_tag(tag),
        other => StepKind::Unknown(tag_text(other)),
    };
    if let StepKind::Unknown(raw) = &kind {
        report.add(format!("{path}.kind"), format!("invalid step kind '{raw}'"));
        return;
    }

    if !is_int_in(step.get("qty"), 1, None) {
        report.add(format!("{path}.qty"), "expected integer >= 1");
    }

    match kind {
        StepKind::GatherItem => validate_gather_step(step, path, report, item_ids),
        StepKind::ProcessItem => validate_process_step(step, path, report, item_ids),
        StepKind::CraftRecipe => {
            check_reference(step, "recipeId", path, report, recipe_ids, "recipe");
        }
        StepKind::MarketListItem | StepKind::MarketBuyItem => {
            check_reference(step, "itemId", path, report, item_ids, "item");
        }
        StepKind::FightWin | StepKind::Unknown(_) => {}
    }
}

/// `invalid <noun> id` for malformed ids, `unknown <noun> '<id>'` for dangling ones.
fn check_reference(
    object: &Object,
    key: &str,
    path: &str,
    report: &mut ValidationReport,
    known: &HashSet<String>,
    noun: &str,
) {
    match content_id(object.get(key)) {
        None => report.add(format!("{path}.{key}"), format!("invalid {noun} id")),
        Some(id) if !known.contains(id) => {
            report.add(format!("{path}.{key}"), format!("unknown {noun} '{id}'"));
        }
        Some(_) => {}
    }
}

fn validate_gather_step(
    step: &Object,
    path: &str,
    report: &mut ValidationReport,
    item_ids: &HashSet<String>,
) {
    let action_ok = step
        .get("action")
        .and_then(Value::as_str)
        .and_then(GatherAction::from_tag)
        .is_some();
    if !action_ok {
        report.add(format!("{path}.action"), "expected 'mine' or 'forest'");
    }

    check_reference(step, "itemId", path, report, item_ids, "item");

    for key in ["locationTierMin", "locationTierMax", "toolTierMin"] {
        if let Some(tier) = given(step, key) {
            if !is_int_in(Some(tier), TIER_MIN, Some(TIER_MAX)) {
                report.add(
                    format!("{path}.{key}"),
                    format!("expected integer between {TIER_MIN} and {TIER_MAX}"),
                );
            }
        }
    }

    let tier_min = step.get("locationTierMin").and_then(strict_int);
    let tier_max = step.get("locationTierMax").and_then(strict_int);
    if let (Some(min), Some(max)) = (tier_min, tier_max) {
        if max < min {
            report.add(format!("{path}.locationTierMax"), "must be >= locationTierMin");
        }
    }
}

fn validate_process_step(
    step: &Object,
    path: &str,
    report: &mut ValidationReport,
    item_ids: &HashSet<String>,
) {
    check_reference(step, "inputItemId", path, report, item_ids, "item");
    if given(step, "outputItemId").is_some() {
        check_reference(step, "outputItemId", path, report, item_ids, "item");
    }
    if let Some(success_only) = given(step, "successOnly") {
        if !success_only.is_boolean() {
            report.add(format!("{path}.successOnly"), "expected boolean");
        }
    }
}

// -----------------------------------------------------------------------------
// Quests
// -----------------------------------------------------------------------------

fn validate_repeat(repeat: &Value, path: &str, report: &mut ValidationReport) {
    let Some(repeat) = repeat.as_object() else {
        report.add(path, "repeat must be an object");
        return;
    };

    let kind = repeat
        .get("kind")
        .and_then(Value::as_str)
        .and_then(RepeatKind::from_tag);
    match kind {
        None => report.add(
            format!("{path}.kind"),
            format!("invalid repeat kind '{}'", tag_text(repeat.get("kind"))),
        ),
        Some(RepeatKind::Cooldown) if !is_int_in(repeat.get("hours"), 1, None) => {
            report.add(
                format!("{path}.hours"),
                "cooldown repeat requires integer hours >= 1",
            );
        }
        Some(_) => {}
    }
}

fn validate_prerequisites(
    prerequisites: &Value,
    path: &str,
    report: &mut ValidationReport,
    quest_ids: &HashSet<String>,
) {
    let Some(prerequisites) = prerequisites.as_object() else {
        report.add(path, "prerequisites must be an object");
        return;
    };

    if let Some(profession) = given(prerequisites, "profession") {
        if profession.as_str().and_then(Profession::from_tag).is_none() {
            report.add(
                format!("{path}.profession"),
                format!("invalid profession '{}'", tag_text(Some(profession))),
            );
        }
    }
    if let Some(min_level) = given(prerequisites, "minLevel") {
        if !is_int_in(Some(min_level), 1, None) {
            report.add(format!("{path}.minLevel"), "expected integer >= 1");
        }
    }

    let requires = match prerequisites.get("requiresQuestsCompleted") {
        None => return,
        Some(Value::Array(requires)) => requires,
        Some(_) => {
            report.add(format!("{path}.requiresQuestsCompleted"), "expected an array");
            return;
        }
    };
    for (idx, required) in requires.iter().enumerate() {
        let req_path = format!("{path}.requiresQuestsCompleted[{idx}]");
        match content_id(Some(required)) {
            None => report.add(req_path, "invalid quest id format"),
            Some(id) if !quest_ids.contains(id) => {
                report.add(req_path, format!("unknown quest '{id}'"));
            }
            Some(_) => {}
        }
    }
}

fn validate_rewards(
    rewards: Option<&Value>,
    path: &str,
    report: &mut ValidationReport,
    item_ids: &HashSet<String>,
) {
    let Some(rewards) = rewards.and_then(Value::as_object) else {
        report.add(path, "rewards must be an object");
        return;
    };

    let mut has_any_reward = false;

    for key in ["xp", "tokens"] {
        let Some(amount) = given(rewards, key) else {
            continue;
        };
        match strict_int(amount) {
            Some(n) if n >= 0 => has_any_reward |= n > 0,
            _ => report.add(format!("{path}.{key}"), "expected integer >= 0"),
        }
    }

    match given(rewards, "currency") {
        None => {}
        Some(Value::Array(currency)) => {
            has_any_reward |= !currency.is_empty();
            for (idx, reward) in currency.iter().enumerate() {
                let reward_path = format!("{path}.currency[{idx}]");
                let Some(reward) = reward.as_object() else {
                    report.add(reward_path, "expected object");
                    continue;
                };
                if content_id(reward.get("id")).is_none() {
                    report.add(format!("{reward_path}.id"), "invalid currency id");
                }
                if !is_int_in(reward.get("amount"), 1, None) {
                    report.add(format!("{reward_path}.amount"), "expected integer >= 1");
                }
            }
        }
        Some(_) => report.add(format!("{path}.currency"), "expected an array"),
    }

    match given(rewards, "items") {
        None => {}
        Some(Value::Array(items)) => {
            has_any_reward |= !items.is_empty();
            for (idx, reward) in items.iter().enumerate() {
                let reward_path = format!("{path}.items[{idx}]");
                let Some(reward) = reward.as_object() else {
                    report.add(reward_path, "expected object");
                    continue;
                };
                check_reference(reward, "itemId", &reward_path, report, item_ids, "item");
                if !is_int_in(reward.get("qty"), 1, None) {
                    report.add(format!("{reward_path}.qty"), "expected integer >= 1");
                }
            }
        }
        Some(_) => report.add(format!("{path}.items"), "expected an array"),
    }

    if !has_any_reward {
        report.add(path, "must contain at least one non-zero reward");
    }
}

pub fn validate_quest(
    quest: &Value,
    path: &str,
    report: &mut ValidationReport,
    quest_ids: &HashSet<String>,
    item_ids: &HashSet<String>,
    recipe_ids: &HashSet<String>,
) {
    let Some(quest) = quest.as_object() else {
        report.add(path, "expected object");
        return;
    };

    for key in ["title", "description"] {
        if !is_non_empty_string(quest.get(key)) {
            report.add(format!("{path}.{key}"), "required non-empty string");
        }
    }

    let difficulty_ok = match quest.get("difficulty") {
        None => true,
        Some(value) => value.as_str().and_then(Difficulty::from_tag).is_some(),
    };
    if !difficulty_ok {
        report.add(format!("{path}.difficulty"), "invalid difficulty");
    }

    if let Some(enabled) = given(quest, "enabled") {
        if !enabled.is_boolean() {
            report.add(format!("{path}.enabled"), "expected boolean");
        }
    }

    if let Some(repeat) = quest.get("repeat") {
        validate_repeat(repeat, &format!("{path}.repeat"), report);
    }

    if let Some(prerequisites) = given(quest, "prerequisites") {
        validate_prerequisites(
            prerequisites,
            &format!("{path}.prerequisites"),
            report,
            quest_ids,
        );
    }

    match quest.get("steps") {
        Some(Value::Array(steps)) if !steps.is_empty() => {
            for (idx, step) in steps.iter().enumerate() {
                validate_step(
                    step,
                    &format!("{path}.steps[{idx}]"),
                    report,
                    item_ids,
                    recipe_ids,
                );
            }
        }
        _ => report.add(format!("{path}.steps"), "expected non-empty array"),
    }

    validate_rewards(
        quest.get("rewards"),
        &format!("{path}.rewards"),
        report,
        item_ids,
    );
}

pub fn validate_quest_pack(
    pack: &Value,
    item_ids: &HashSet<String>,
    recipe_ids: &HashSet<String>,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(quests) = pack_entries(pack, PackKind::Quests, &mut report) else {
        return report;
    };

    let mut quest_ids: HashSet<String> = HashSet::new();
    for (idx, quest) in quests.iter().enumerate() {
        let path = format!("$quests.quests[{idx}]");
        let Some(object) = quest.as_object() else {
            report.add(path, "expected object");
            continue;
        };
        match content_id(object.get("id")) {
            None => report.add(format!("{path}.id"), format!("invalid id, expected {ID_PATTERN}")),
            Some(id) if quest_ids.contains(id) => {
                report.add(format!("{path}.id"), format!("duplicate id '{id}'"));
            }
            Some(id) => {
                quest_ids.insert(id.to_string());
            }
        }
    }

    for (idx, quest) in quests.iter().enumerate() {
        if !quest.is_object() {
            continue;
        }
        validate_quest(
            quest,
            &format!("$quests.quests[{idx}]"),
            &mut report,
            &quest_ids,
            item_ids,
            recipe_ids,
        );
    }
    report
}

// -----------------------------------------------------------------------------
// Store
// -----------------------------------------------------------------------------

pub fn validate_store_pack(pack: &Value, item_ids: &HashSet<String>) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(entries) = pack_entries(pack, PackKind::Store, &mut report) else {
        return report;
    };

    let mut seen: HashSet<&str> = HashSet::new();
    for (idx, entry) in entries.iter().enumerate() {
        let path = format!("$store.items[{idx}]");
        let Some(entry) = entry.as_object() else {
            report.add(path, "expected object");
            continue;
        };

        match content_id(entry.get("itemId")) {
            None => report.add(format!("{path}.itemId"), "invalid item id"),
            Some(id) if seen.contains(id) => {
                report.add(format!("{path}.itemId"), format!("duplicate item '{id}'"));
            }
            Some(id) if !item_ids.contains(id) => {
                report.add(format!("{path}.itemId"), format!("unknown item '{id}'"));
            }
            Some(id) => {
                seen.insert(id);
            }
        }

        if !is_non_empty_string(entry.get("name")) {
            report.add(format!("{path}.name"), "required non-empty string");
        }
        for key in ["buyPrice", "sellPrice"] {
            if !is_int_in(entry.get(key), 1, None) {
                report.add(format!("{path}.{key}"), "expected integer >= 1");
            }
        }
        if let Some(stock) = entry.get("stock") {
            if !is_int_in(Some(stock), rules::DEFAULT_STORE_STOCK, None) {
                report.add(format!("{path}.stock"), "expected integer >= -1");
            }
        }
        if let Some(available) = entry.get("available") {
            if !available.is_boolean() {
                report.add(format!("{path}.available"), "expected boolean");
            }
        }
        if let Some(category) = given(entry, "category") {
            if category.as_str().and_then(MarketCategory::from_tag).is_none() {
                report.add(
                    format!("{path}.category"),
                    format!("expected one of {}", MarketCategory::sorted_tag_list()),
                );
            }
        }
        if let Some(limit) = entry.get("purchaseLimit") {
            if !is_int_in(Some(limit), 0, None) {
                report.add(format!("{path}.purchaseLimit"), "expected integer >= 0");
            }
        }
    }
    report
}
