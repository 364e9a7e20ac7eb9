use std::fs;
use std::path::{Path, PathBuf};

use rpg_content_core::core_api::{
    ContentError, ContentErrorCode, Engine, ItemDraft, PackKind, QuestDraft, Session, StepDraft,
    StoreDraft,
};
use rpg_content_core::model::{Difficulty, Profession, RepeatKind, StepKind};
use rpg_content_core::value::parse_param_pairs;
use serde_json::{Value, json};
use tempfile::TempDir;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn fixture_dir() -> PathBuf {
    workspace_root().join("tests/fixtures/basic_pack")
}

fn fixture_copy() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    for entry in fs::read_dir(fixture_dir()).expect("fixture dir should exist") {
        let entry = entry.expect("fixture entry");
        fs::copy(entry.path(), dir.path().join(entry.file_name())).expect("copy fixture file");
    }
    dir
}

fn open(dir: &Path) -> Session {
    Engine::new()
        .open(dir)
        .unwrap_or_else(|e| panic!("failed to open {:?}: {}", dir, e))
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {:?}: {}", path, e))
}

fn issue_lines(err: &ContentError) -> Vec<String> {
    err.validation_report()
        .expect("expected a validation failure")
        .messages()
}

#[test]
fn fixture_pack_loads_and_validates_clean() {
    let session = open(&fixture_dir());
    let report = session.validate();
    assert!(report.is_empty(), "unexpected issues: {:?}", report.messages());

    let counts = session.counts();
    assert_eq!(counts.quests, 3);
    assert_eq!(counts.items, 5);
    assert_eq!(counts.recipes, 2);
    assert_eq!(counts.store_items, Some(2));
    assert!(session.paths().quests.ends_with("rpg.quests.json5"));
}

#[test]
fn summaries_apply_list_defaults() {
    let session = open(&fixture_dir());

    let quests = session.quest_summaries();
    assert_eq!(quests.len(), 3);
    assert_eq!(quests[0].id, "first_steps");
    assert_eq!(quests[0].step_count, 1);
    assert!(quests[0].enabled);
    assert_eq!(quests[2].difficulty, "hard");
    assert_eq!(quests[2].step_count, 3);
    assert!(!quests[2].enabled);

    let items = session.item_summaries();
    assert_eq!(items[2].id, "pyrite_ore");
    assert_eq!(items[2].category, None);
    assert_eq!(items[4].value, json!(7.5));

    let store = session.store_summaries();
    assert_eq!(store[0].stock, -1);
    assert_eq!(store[1].stock, 20);
    assert!(!store[1].available);
}

#[test]
fn show_finds_entries_by_id() {
    let session = open(&fixture_dir());
    assert_eq!(session.quest("smelting_101").expect("quest")["difficulty"], json!("medium"));
    assert_eq!(session.item("oak_log").expect("item")["value"], json!(3));
    assert_eq!(session.store_entry("iron_bar").expect("entry")["purchaseLimit"], json!(5));

    let err = session.quest("ghost").expect_err("no such quest");
    assert_eq!(err.code(), ContentErrorCode::NotFound);
    assert_eq!(err.to_string(), "Quest 'ghost' not found");
    let err = session.store_entry("oak_log").expect_err("not listed");
    assert_eq!(err.to_string(), "Store item 'oak_log' not found");
}

#[test]
fn create_quest_writes_skeleton_and_normalises_json5() {
    let dir = fixture_copy();
    let mut session = open(dir.path());

    let outcome = session
        .create_quest(QuestDraft::new("deep_dive", "Deep Dive", "Go deeper."))
        .expect("quest should be created");
    assert_eq!(outcome.pack, PackKind::Quests);
    assert_eq!(outcome.path, dir.path().join("rpg.quests.json5"));

    let text = read(&outcome.path);
    assert!(text.ends_with("}\n"));
    let on_disk: Value = serde_json::from_str(&text).expect("written file is strict JSON");
    assert_eq!(
        on_disk["quests"][3],
        json!({
            "id": "deep_dive",
            "title": "Deep Dive",
            "icon": "📜",
            "description": "Go deeper.",
            "repeat": {"kind": "none"},
            "difficulty": "easy",
            "enabled": true,
            "steps": [{
                "kind": "gather_item",
                "action": "mine",
                "itemId": "iron_ore",
                "qty": 1,
                "locationTierMin": 1
            }],
            "rewards": {
                "currency": [{"id": "coins", "amount": 100}],
                "xp": 50
            }
        })
    );
    assert!(text.contains("\"icon\": \"📜\""));
}

#[test]
fn create_quest_with_cooldown_and_prerequisites() {
    let dir = fixture_copy();
    let mut session = open(dir.path());

    let mut draft =
        QuestDraft::new("veteran", "Veteran", "For experienced miners.").with_requires_csv(" first_steps, ,smelting_101 ");
    draft.difficulty = Difficulty::Expert;
    draft.repeat_kind = RepeatKind::Cooldown;
    draft.profession = Some(Profession::Miner);
    draft.min_level = Some(5);
    draft.coins = 250;
    draft.xp = 0;
    draft.enabled = false;
    session.create_quest(draft).expect("quest should be created");

    let reopened = open(dir.path());
    let quest = reopened.quest("veteran").expect("quest persisted");
    assert_eq!(quest["repeat"], json!({"kind": "cooldown", "hours": 24}));
    assert_eq!(
        quest["prerequisites"],
        json!({"profession": "miner", "minLevel": 5, "requiresQuestsCompleted": ["first_steps", "smelting_101"]})
    );
    assert_eq!(quest["rewards"], json!({"currency": [{"id": "coins", "amount": 250}], "xp": 0}));
    assert_eq!(quest["enabled"], json!(false));
    assert_eq!(quest["difficulty"], json!("expert"));
}

#[test]
fn duplicate_quest_id_is_rejected_before_any_write() {
    let dir = fixture_copy();
    let before = read(&dir.path().join("rpg.quests.json5"));
    let mut session = open(dir.path());

    let err = session
        .create_quest(QuestDraft::new("first_steps", "Again", "Again."))
        .expect_err("duplicate id");
    assert_eq!(err.code(), ContentErrorCode::DuplicateId);
    assert_eq!(err.to_string(), "Quest 'first_steps' already exists");
    assert_eq!(read(&dir.path().join("rpg.quests.json5")), before);
}

#[test]
fn failed_write_rolls_back_the_working_copy() {
    let dir = fixture_copy();
    let quests_path = dir.path().join("rpg.quests.json5");
    let before = read(&quests_path);
    // A directory where the temp file should go makes the write fail.
    fs::create_dir(dir.path().join("rpg.quests.json5.tmp")).expect("block temp file");
    let mut session = open(dir.path());

    let err = session
        .create_quest(QuestDraft::new("night_shift", "Night Shift", "Work late."))
        .expect_err("write should fail");
    assert_eq!(err.code(), ContentErrorCode::Io);
    assert!(session.quest("night_shift").is_err());
    assert_eq!(session.quest_summaries().len(), 3);
    assert_eq!(read(&quests_path), before);
}

#[test]
fn failed_mutation_leaves_file_and_working_copy_untouched() {
    let dir = fixture_copy();
    let quests_path = dir.path().join("rpg.quests.json5");
    let before = read(&quests_path);
    let mut session = open(dir.path());

    let draft = QuestDraft::new("orphan", "Orphan", "Needs a ghost.").with_requires_csv("ghost_quest");
    let err = session.create_quest(draft).expect_err("unknown prerequisite");
    assert_eq!(err.code(), ContentErrorCode::SchemaViolation);
    assert_eq!(
        issue_lines(&err),
        vec!["$quests.quests[3].prerequisites.requiresQuestsCompleted[0]: unknown quest 'ghost_quest'"]
    );
    assert_eq!(
        err.to_string(),
        "Validation failed:\n - $quests.quests[3].prerequisites.requiresQuestsCompleted[0]: unknown quest 'ghost_quest'"
    );

    assert_eq!(read(&quests_path), before);
    assert_eq!(session.counts().quests, 3);
    assert!(session.validate().is_valid());
    assert!(!session.packs().ids().quests.contains("orphan"));
}

#[test]
fn set_then_reopen_reads_back_the_value() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    session
        .set_quest_field("first_steps", "steps[0].qty", json!(9))
        .expect("set should succeed");
    session
        .set_quest_field("first_steps", "rewards.tokens", json!(3))
        .expect("set creates missing keys");

    let reopened = open(dir.path());
    let quest = reopened.quest("first_steps").expect("quest");
    assert_eq!(quest["steps"][0]["qty"], json!(9));
    assert_eq!(quest["rewards"]["tokens"], json!(3));
}

#[test]
fn out_of_bounds_set_fails_and_never_appends() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let err = session
        .set_quest_field("first_steps", "steps[1]", json!({"kind": "fight_win", "qty": 1}))
        .expect_err("index 1 is past the end");
    assert_eq!(err.code(), ContentErrorCode::PathAccessFailure);
    assert_eq!(err.to_string(), "Index [1] out of bounds (size=1)");
    assert_eq!(session.quest_summaries()[0].step_count, 1);
}

#[test]
fn unset_twice_reports_missing_key() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    session
        .unset_quest_field("smelting_101", "prerequisites.profession")
        .expect("first unset succeeds");
    let err = session
        .unset_quest_field("smelting_101", "prerequisites.profession")
        .expect_err("second unset fails");
    assert_eq!(err.code(), ContentErrorCode::PathAccessFailure);
    assert!(err.to_string().contains("does not exist"));

    let reopened = open(dir.path());
    let prerequisites = &reopened.quest("smelting_101").expect("quest")["prerequisites"];
    assert_eq!(prerequisites.get("profession"), None);
    assert_eq!(prerequisites["minLevel"], json!(2));
}

#[test]
fn invalid_path_syntax_is_reported() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let err = session
        .set_quest_field("first_steps", "steps[first].qty", json!(1))
        .expect_err("bad index");
    assert_eq!(err.code(), ContentErrorCode::InvalidPathSyntax);
    assert_eq!(err.to_string(), "Invalid path 'steps[first].qty': Index 'first' is not numeric");
}

#[test]
fn zero_rewards_are_rejected() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let err = session
        .set_quest_field("first_steps", "rewards", json!({"xp": 0, "tokens": 0, "currency": []}))
        .expect_err("no reward left");
    assert_eq!(
        issue_lines(&err),
        vec!["$quests.quests[0].rewards: must contain at least one non-zero reward"]
    );
}

#[test]
fn unknown_gather_item_is_rejected() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let err = session
        .set_quest_field("first_steps", "steps[0].itemId", json!("unobtainium"))
        .expect_err("unknown item");
    assert_eq!(
        issue_lines(&err),
        vec!["$quests.quests[0].steps[0].itemId: unknown item 'unobtainium'"]
    );
}

#[test]
fn cooldown_without_hours_is_rejected() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let err = session
        .set_quest_field("first_steps", "repeat", json!({"kind": "cooldown"}))
        .expect_err("cooldown needs hours");
    assert_eq!(
        issue_lines(&err),
        vec!["$quests.quests[0].repeat.hours: cooldown repeat requires integer hours >= 1"]
    );
}

#[test]
fn inverted_location_tiers_are_rejected() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    session
        .set_quest_field("first_steps", "steps[0].locationTierMax", json!(1))
        .expect("1..1 is fine");
    let err = session
        .set_quest_field("first_steps", "steps[0].locationTierMin", json!(3))
        .expect_err("3..1 is inverted");
    assert_eq!(
        issue_lines(&err),
        vec!["$quests.quests[0].steps[0].locationTierMax: must be >= locationTierMin"]
    );
}

#[test]
fn prerequisite_cycle_blocks_the_write() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let err = session
        .set_quest_field(
            "first_steps",
            "prerequisites",
            json!({"requiresQuestsCompleted": ["market_day"]}),
        )
        .expect_err("cycle");
    assert_eq!(
        issue_lines(&err),
        vec!["$quests: circular dependency detected: first_steps -> market_day -> smelting_101 -> first_steps"]
    );
}

#[test]
fn deleting_a_referenced_item_is_blocked() {
    let dir = fixture_copy();
    let items_path = dir.path().join("rpg.materials.json");
    let before = read(&items_path);
    let mut session = open(dir.path());

    let err = session.delete_item("iron_ore").expect_err("still referenced");
    let lines = issue_lines(&err);
    assert!(lines.contains(&"$quests.quests[0].steps[0].itemId: unknown item 'iron_ore'".to_string()));
    assert!(lines.contains(&"$store.items[0].itemId: unknown item 'iron_ore'".to_string()));
    assert_eq!(read(&items_path), before);
    assert!(session.item("iron_ore").is_ok());
}

#[test]
fn deleting_an_unreferenced_item_succeeds() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let outcome = session.delete_item("pyrite_ore").expect("nothing refers to it");
    assert_eq!(outcome.path, dir.path().join("rpg.materials.json"));
    assert_eq!(open(dir.path()).counts().items, 4);
    assert!(!session.packs().ids().items.contains("pyrite_ore"));
}

#[test]
fn delete_quest_that_others_require_is_blocked() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let err = session.delete_quest("first_steps").expect_err("required by smelting_101");
    assert_eq!(
        issue_lines(&err),
        vec!["$quests.quests[0].prerequisites.requiresQuestsCompleted[0]: unknown quest 'first_steps'"]
    );
    session.delete_quest("market_day").expect("nothing requires market_day");
    assert_eq!(open(dir.path()).counts().quests, 2);
}

#[test]
fn step_add_appends_with_params() {
    let dir = fixture_copy();
    let mut session = open(dir.path());

    let mut step = StepDraft::new(StepKind::GatherItem);
    step.qty = 4;
    step.params = parse_param_pairs(&["action=forest", "itemId=oak_log", "toolTierMin=2"])
        .expect("params parse");
    session.add_quest_step("first_steps", step).expect("step added");
    session
        .add_quest_step("first_steps", StepDraft::new(StepKind::FightWin))
        .expect("fight step added");

    let reopened = open(dir.path());
    let steps = &reopened.quest("first_steps").expect("quest")["steps"];
    assert_eq!(
        steps[1],
        json!({"kind": "gather_item", "qty": 4, "action": "forest", "itemId": "oak_log", "toolTierMin": 2})
    );
    assert_eq!(steps[2], json!({"kind": "fight_win", "qty": 1}));
}

#[test]
fn step_add_with_unknown_kind_is_rejected() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let err = session
        .add_quest_step("first_steps", StepDraft::new(StepKind::from_tag("teleport")))
        .expect_err("unknown kind");
    assert_eq!(
        issue_lines(&err),
        vec!["$quests.quests[0].steps[1].kind: invalid step kind 'teleport'"]
    );
    assert_eq!(session.quest_summaries()[0].step_count, 1);
}

#[test]
fn step_remove_checks_bounds_and_non_empty_steps() {
    let dir = fixture_copy();
    let mut session = open(dir.path());

    let err = session.remove_quest_step("first_steps", 5).expect_err("out of range");
    assert_eq!(err.code(), ContentErrorCode::PathAccessFailure);
    assert_eq!(err.to_string(), "Step index 5 out of bounds (size=1)");

    let err = session.remove_quest_step("first_steps", 0).expect_err("last step");
    assert_eq!(issue_lines(&err), vec!["$quests.quests[0].steps: expected non-empty array"]);

    session.remove_quest_step("market_day", 0).expect("three steps, one removed");
    let store = open(dir.path());
    let steps = &store.quest("market_day").expect("quest")["steps"];
    assert_eq!(steps[0]["kind"], json!("market_buy_item"));
}

#[test]
fn step_add_requires_a_steps_array() {
    let dir = fixture_copy();
    fs::write(
        dir.path().join("rpg.quests.json5"),
        r#"{"schemaVersion": 1, "quests": [{"id": "broken", "steps": "oops"}]}"#,
    )
    .expect("write broken quests");
    let mut session = open(dir.path());
    let err = session
        .add_quest_step("broken", StepDraft::new(StepKind::FightWin))
        .expect_err("steps is a string");
    assert_eq!(err.to_string(), "Quest is invalid: steps must be an array");
}

#[test]
fn create_item_applies_defaults() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let outcome = session
        .create_item(ItemDraft::new("silver_ore", "Silver Ore", "Shiny."))
        .expect("item created");
    assert_eq!(outcome.pack, PackKind::Items);

    let reopened = open(dir.path());
    assert_eq!(
        reopened.item("silver_ore").expect("item"),
        &json!({
            "id": "silver_ore",
            "name": "Silver Ore",
            "description": "Shiny.",
            "emoji": ":package:",
            "maxStack": 99,
            "weight": 1.0,
            "canStack": true,
            "value": 1,
            "market": {
                "tradable": true,
                "category": "materials",
                "suggestedPrice": 1,
                "minPrice": 1,
                "maxPrice": 5000
            }
        })
    );
}

#[test]
fn create_item_with_inverted_prices_is_rejected() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let mut draft = ItemDraft::new("gold_ore", "Gold Ore", "Rare.");
    draft.value = 40;
    draft.min_price = 100;
    draft.max_price = 10;
    let err = session.create_item(draft).expect_err("max below min");
    assert_eq!(issue_lines(&err), vec!["$items.items[5].market.maxPrice: must be >= minPrice"]);

    let err = session
        .create_item(ItemDraft::new("Gold Ore", "Gold Ore", "Rare."))
        .expect_err("bad id");
    assert_eq!(issue_lines(&err), vec!["$items.items[5].id: invalid id, expected ^[a-z0-9_]+$"]);
}

#[test]
fn item_edits_preserve_key_order() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    session
        .set_item_field("iron_ore", "value", json!(5))
        .expect("set value");
    session
        .unset_item_field("iron_ore", "market.suggestedPrice")
        .expect("unset suggested price");

    let on_disk: Value =
        serde_json::from_str(&read(&dir.path().join("rpg.materials.json"))).expect("strict JSON");
    let keys: Vec<&str> = on_disk["items"][0]
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec!["id", "name", "description", "emoji", "maxStack", "weight", "canStack", "value", "market"]
    );
    let market_keys: Vec<&str> = on_disk["items"][0]["market"]
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(market_keys, vec!["tradable", "category", "minPrice", "maxPrice"]);
}

#[test]
fn store_add_unknown_item_fails_before_touching_the_store() {
    let dir = fixture_copy();
    fs::remove_file(dir.path().join("rpg.store.json")).expect("remove store");
    let mut session = open(dir.path());

    let err = session
        .add_store_entry(StoreDraft::new("ghost_item"))
        .expect_err("not an item");
    assert_eq!(err.code(), ContentErrorCode::NotFound);
    assert_eq!(err.to_string(), "Item 'ghost_item' not found");
    assert!(!dir.path().join("rpg.store.json").exists());
    assert!(!session.packs().has_store());
}

#[test]
fn store_add_copies_a_float_item_value_into_the_buy_price() {
    let dir = fixture_copy();
    let store_path = dir.path().join("rpg.store.json");
    let before = read(&store_path);
    let mut session = open(dir.path());

    let err = session
        .add_store_entry(StoreDraft::new("copper_wire"))
        .expect_err("7.5 is not an integer price");
    assert_eq!(
        issue_lines(&err),
        vec!["$store.items[2].buyPrice: expected integer >= 1"]
    );
    assert_eq!(read(&store_path), before);
    assert!(session.store_entry("copper_wire").is_err());

    let mut draft = StoreDraft::new("copper_wire");
    draft.buy_price = Some(8);
    session.add_store_entry(draft).expect("explicit buy price");
    let reopened = open(dir.path());
    assert_eq!(
        reopened.store_entry("copper_wire").expect("entry"),
        &json!({
            "itemId": "copper_wire",
            "name": "Copper Wire",
            "buyPrice": 8,
            "sellPrice": 6,
            "stock": -1,
            "available": true
        })
    );
}

#[test]
fn store_add_creates_the_store_file_when_missing() {
    let dir = fixture_copy();
    fs::remove_file(dir.path().join("rpg.store.json")).expect("remove store");
    let mut session = open(dir.path());

    let mut draft = StoreDraft::new("iron_bar");
    draft.name = Some("Fine Iron Bar".to_string());
    draft.buy_price = Some(20);
    draft.stock = Some(3);
    draft.available = false;
    draft.purchase_limit = Some(0);
    draft.required_role = Some("smith".to_string());
    let outcome = session.add_store_entry(draft).expect("entry added");
    assert_eq!(outcome.pack, PackKind::Store);
    assert_eq!(outcome.path, dir.path().join("rpg.store.json"));

    let on_disk: Value = serde_json::from_str(&read(&outcome.path)).expect("strict JSON");
    assert_eq!(
        on_disk,
        json!({
            "schemaVersion": 1,
            "items": [{
                "itemId": "iron_bar",
                "name": "Fine Iron Bar",
                "buyPrice": 20,
                "sellPrice": 10,
                "stock": 3,
                "available": false,
                "requiredRole": "smith"
            }]
        })
    );
}

#[test]
fn store_add_duplicate_is_rejected() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    let err = session
        .add_store_entry(StoreDraft::new("iron_ore"))
        .expect_err("already listed");
    assert_eq!(err.code(), ContentErrorCode::DuplicateId);
    assert_eq!(err.to_string(), "Store item 'iron_ore' already exists");
}

#[test]
fn store_field_edits_are_validated() {
    let dir = fixture_copy();
    let mut session = open(dir.path());

    let err = session
        .set_store_field("iron_ore", "buyPrice", json!(0))
        .expect_err("price below one");
    assert_eq!(issue_lines(&err), vec!["$store.items[0].buyPrice: expected integer >= 1"]);

    let err = session
        .set_store_field("iron_ore", "stock", json!(true))
        .expect_err("bool is not an integer");
    assert_eq!(issue_lines(&err), vec!["$store.items[0].stock: expected integer >= -1"]);

    session
        .set_store_field("iron_ore", "stock", json!(12))
        .expect("stock updated");
    session
        .unset_store_field("iron_bar", "purchaseLimit")
        .expect("limit removed");
    let reopened = open(dir.path());
    assert_eq!(reopened.store_entry("iron_ore").expect("entry")["stock"], json!(12));
    assert_eq!(reopened.store_entry("iron_bar").expect("entry").get("purchaseLimit"), None);
}

#[test]
fn store_remove_then_remove_again() {
    let dir = fixture_copy();
    let mut session = open(dir.path());
    session.remove_store_entry("iron_bar").expect("removed");
    let err = session.remove_store_entry("iron_bar").expect_err("already gone");
    assert_eq!(err.to_string(), "Store item 'iron_bar' not found");
    assert_eq!(open(dir.path()).counts().store_items, Some(1));
}

#[test]
fn long_issue_lists_are_capped_in_the_error_message() {
    let dir = fixture_copy();
    let broken: Vec<Value> = (0..40).map(|_| json!("not a quest")).collect();
    fs::write(
        dir.path().join("rpg.quests.json5"),
        serde_json::to_string(&json!({"schemaVersion": 1, "quests": broken})).expect("encode"),
    )
    .expect("write quests");

    let mut session = open(dir.path());
    assert_eq!(session.validate().len(), 40);

    let err = session
        .create_item(ItemDraft::new("tin_ore", "Tin Ore", "Soft."))
        .expect_err("existing quest pack is invalid");
    assert_eq!(err.validation_report().map(|r| r.len()), Some(40));

    let message = err.to_string();
    let lines: Vec<&str> = message.lines().collect();
    assert_eq!(lines.len(), 32);
    assert_eq!(lines[0], "Validation failed:");
    assert_eq!(lines[1], " - $quests.quests[0]: expected object");
    assert_eq!(lines[31], " - ... and 10 more");
}
