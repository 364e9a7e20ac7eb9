use std::path::Path;

use log::{debug, info};
use serde_json::{Map, Number, Value};

use crate::model::{
    CurrencyReward, GatherStep, Market, NewItem, NewQuest, Prerequisites, Repeat, RepeatKind,
    Rewards, StoreEntry,
};
use crate::path::{delete_by_path, set_by_path};
use crate::repository::{ContentPacks, PackPaths};
use crate::rules;
use crate::validation::ValidationReport;

use super::error::ContentError;
use super::types::{
    EntityKind, ItemDraft, ItemSummary, Mutation, PackCounts, PackKind, QuestDraft, QuestSummary,
    StepDraft, StoreDraft, StoreSummary,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

#[derive(Debug)]
pub struct Session {
    packs: ContentPacks,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn open<P: AsRef<Path>>(&self, pack_dir: P) -> Result<Session, ContentError> {
        let paths = PackPaths::resolve(pack_dir.as_ref())?;
        let packs = ContentPacks::load(paths)?;
        Ok(Session { packs })
    }
}

impl Session {
    pub fn paths(&self) -> &PackPaths {
        self.packs.paths()
    }

    pub fn packs(&self) -> &ContentPacks {
        &self.packs
    }

    pub fn counts(&self) -> PackCounts {
        self.packs.counts()
    }

    pub fn validate(&self) -> ValidationReport {
        self.packs.validate()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn quest_summaries(&self) -> Vec<QuestSummary> {
        self.packs
            .entries(PackKind::Quests)
            .iter()
            .filter(|quest| quest.is_object())
            .map(|quest| QuestSummary {
                id: text_field(quest, "id", "<missing-id>"),
                title: text_field(quest, "title", "<missing-title>"),
                difficulty: text_field(quest, "difficulty", "easy"),
                step_count: quest
                    .get("steps")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len),
                enabled: quest.get("enabled").and_then(Value::as_bool).unwrap_or(true),
            })
            .collect()
    }

    pub fn item_summaries(&self) -> Vec<ItemSummary> {
        self.packs
            .entries(PackKind::Items)
            .iter()
            .filter(|item| item.is_object())
            .map(|item| ItemSummary {
                id: text_field(item, "id", "<missing-id>"),
                name: text_field(item, "name", "<missing-name>"),
                value: item.get("value").cloned().unwrap_or_else(|| Value::from(0)),
                category: item
                    .get("market")
                    .and_then(|market| market.get("category"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect()
    }

    pub fn store_summaries(&self) -> Vec<StoreSummary> {
        self.packs
            .entries(PackKind::Store)
            .iter()
            .filter(|entry| entry.is_object())
            .map(|entry| StoreSummary {
                item_id: text_field(entry, "itemId", "<missing>"),
                name: text_field(entry, "name", "<missing>"),
                buy_price: entry.get("buyPrice").cloned().unwrap_or_else(|| Value::from(0)),
                sell_price: entry.get("sellPrice").cloned().unwrap_or_else(|| Value::from(0)),
                stock: entry
                    .get("stock")
                    .and_then(Value::as_i64)
                    .unwrap_or(rules::DEFAULT_STORE_STOCK),
                available: entry.get("available").and_then(Value::as_bool).unwrap_or(true),
            })
            .collect()
    }

    pub fn quest(&self, id: &str) -> Result<&Value, ContentError> {
        self.packs.find(EntityKind::Quest, id).map(|(_, quest)| quest)
    }

    pub fn item(&self, id: &str) -> Result<&Value, ContentError> {
        self.packs.find(EntityKind::Item, id).map(|(_, item)| item)
    }

    pub fn store_entry(&self, item_id: &str) -> Result<&Value, ContentError> {
        self.packs
            .find(EntityKind::StoreItem, item_id)
            .map(|(_, entry)| entry)
    }

    // -------------------------------------------------------------------------
    // Quests
    // -------------------------------------------------------------------------

    pub fn create_quest(&mut self, draft: QuestDraft) -> Result<Mutation, ContentError> {
        self.ensure_absent(EntityKind::Quest, &draft.id)?;

        let gather_item = self
            .packs
            .entries(PackKind::Items)
            .iter()
            .filter_map(|item| item.get("id").and_then(Value::as_str))
            .find(|id| rules::is_valid_content_id(id))
            .unwrap_or(rules::FALLBACK_GATHER_ITEM_ID)
            .to_string();

        let requires = (!draft.requires.is_empty()).then_some(draft.requires);
        let quest = NewQuest {
            id: draft.id,
            title: draft.title,
            icon: draft.icon,
            description: draft.description,
            repeat: Repeat {
                kind: draft.repeat_kind,
                hours: (draft.repeat_kind == RepeatKind::Cooldown).then_some(draft.repeat_hours),
            },
            difficulty: draft.difficulty,
            enabled: draft.enabled,
            steps: vec![GatherStep::starter(gather_item)],
            rewards: Rewards {
                currency: vec![CurrencyReward {
                    id: rules::DEFAULT_CURRENCY_ID.to_string(),
                    amount: draft.coins,
                }],
                xp: draft.xp,
            },
            prerequisites: Prerequisites {
                profession: draft.profession,
                min_level: draft.min_level,
                requires_quests_completed: requires,
            },
        };
        let document = serde_json::to_value(quest)?;

        self.transact(PackKind::Quests, |packs| {
            packs.entries_mut(PackKind::Quests)?.push(document);
            Ok(())
        })
    }

    pub fn delete_quest(&mut self, id: &str) -> Result<Mutation, ContentError> {
        self.delete_entry(EntityKind::Quest, id)
    }

    pub fn set_quest_field(
        &mut self,
        id: &str,
        path: &str,
        value: Value,
    ) -> Result<Mutation, ContentError> {
        self.set_field(EntityKind::Quest, id, path, value)
    }

    pub fn unset_quest_field(&mut self, id: &str, path: &str) -> Result<Mutation, ContentError> {
        self.unset_field(EntityKind::Quest, id, path)
    }

    pub fn add_quest_step(&mut self, id: &str, step: StepDraft) -> Result<Mutation, ContentError> {
        self.transact(PackKind::Quests, |packs| {
            let (_, quest) = packs.find_mut(EntityKind::Quest, id)?;
            let steps = quest_steps_mut(quest, true)?;

            let mut new_step = Map::new();
            new_step.insert("kind".to_string(), Value::from(step.kind.as_str()));
            new_step.insert("qty".to_string(), Value::from(step.qty));
            new_step.extend(step.params);
            steps.push(Value::Object(new_step));
            Ok(())
        })
    }

    pub fn remove_quest_step(&mut self, id: &str, index: usize) -> Result<Mutation, ContentError> {
        self.transact(PackKind::Quests, |packs| {
            let (_, quest) = packs.find_mut(EntityKind::Quest, id)?;
            let steps = quest_steps_mut(quest, false)?;
            if index >= steps.len() {
                return Err(ContentError::path_access(
                    &format!("steps[{index}]"),
                    format!("Step index {index} out of bounds (size={})", steps.len()),
                ));
            }
            steps.remove(index);
            Ok(())
        })
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    pub fn create_item(&mut self, draft: ItemDraft) -> Result<Mutation, ContentError> {
        self.ensure_absent(EntityKind::Item, &draft.id)?;

        let suggested_price = draft.suggested_price.unwrap_or(draft.value.max(1));
        let item = NewItem {
            id: draft.id,
            name: draft.name,
            description: draft.description,
            emoji: draft.emoji,
            max_stack: draft.max_stack,
            weight: draft.weight,
            can_stack: draft.can_stack,
            value: draft.value,
            market: Market {
                tradable: draft.tradable,
                category: draft.category,
                suggested_price,
                min_price: draft.min_price,
                max_price: draft.max_price,
            },
        };
        let document = serde_json::to_value(item)?;

        self.transact(PackKind::Items, |packs| {
            packs.entries_mut(PackKind::Items)?.push(document);
            Ok(())
        })
    }

    pub fn delete_item(&mut self, id: &str) -> Result<Mutation, ContentError> {
        self.delete_entry(EntityKind::Item, id)
    }

    pub fn set_item_field(
        &mut self,
        id: &str,
        path: &str,
        value: Value,
    ) -> Result<Mutation, ContentError> {
        self.set_field(EntityKind::Item, id, path, value)
    }

    pub fn unset_item_field(&mut self, id: &str, path: &str) -> Result<Mutation, ContentError> {
        self.unset_field(EntityKind::Item, id, path)
    }

    // -------------------------------------------------------------------------
    // Store
    // -------------------------------------------------------------------------

    pub fn add_store_entry(&mut self, draft: StoreDraft) -> Result<Mutation, ContentError> {
        if !self.packs.ids().items.contains(&draft.item_id) {
            return Err(ContentError::NotFound {
                kind: EntityKind::Item,
                id: draft.item_id,
            });
        }
        self.ensure_absent(EntityKind::StoreItem, &draft.item_id)?;

        let (_, item) = self.packs.find(EntityKind::Item, &draft.item_id)?;
        let default_name = item
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(&draft.item_id)
            .to_string();
        let base_value = match item.get("value") {
            Some(Value::Number(value)) => value.clone(),
            _ => Number::from(rules::DEFAULT_STORE_BUY_PRICE),
        };
        let base_sell = base_value.as_f64().unwrap_or_default() * rules::STORE_SELL_RATIO;

        let entry = StoreEntry {
            name: draft
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or(default_name),
            buy_price: draft.buy_price.map_or(base_value, Number::from),
            sell_price: draft.sell_price.unwrap_or(base_sell.trunc() as i64),
            stock: draft.stock.unwrap_or(rules::DEFAULT_STORE_STOCK),
            available: draft.available,
            description: draft.description.filter(|d| !d.is_empty()),
            category: draft.category,
            purchase_limit: draft.purchase_limit.filter(|limit| *limit > 0),
            required_role: draft.required_role.filter(|r| !r.is_empty()),
            item_id: draft.item_id,
        };
        let document = serde_json::to_value(entry)?;

        self.transact(PackKind::Store, |packs| {
            packs.entries_mut(PackKind::Store)?.push(document);
            Ok(())
        })
    }

    pub fn remove_store_entry(&mut self, item_id: &str) -> Result<Mutation, ContentError> {
        self.delete_entry(EntityKind::StoreItem, item_id)
    }

    pub fn set_store_field(
        &mut self,
        item_id: &str,
        path: &str,
        value: Value,
    ) -> Result<Mutation, ContentError> {
        self.set_field(EntityKind::StoreItem, item_id, path, value)
    }

    pub fn unset_store_field(&mut self, item_id: &str, path: &str) -> Result<Mutation, ContentError> {
        self.unset_field(EntityKind::StoreItem, item_id, path)
    }

    // -------------------------------------------------------------------------
    // Shared mutation plumbing
    // -------------------------------------------------------------------------

    fn ensure_absent(&self, kind: EntityKind, id: &str) -> Result<(), ContentError> {
        if self.packs.contains(kind, id) {
            return Err(ContentError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn delete_entry(&mut self, kind: EntityKind, id: &str) -> Result<Mutation, ContentError> {
        self.transact(kind.pack(), |packs| {
            let (index, _) = packs.find(kind, id)?;
            packs.entries_mut(kind.pack())?.remove(index);
            Ok(())
        })
    }

    fn set_field(
        &mut self,
        kind: EntityKind,
        id: &str,
        path: &str,
        value: Value,
    ) -> Result<Mutation, ContentError> {
        self.transact(kind.pack(), |packs| {
            let (_, entry) = packs.find_mut(kind, id)?;
            set_by_path(entry, path, value)
        })
    }

    fn unset_field(&mut self, kind: EntityKind, id: &str, path: &str) -> Result<Mutation, ContentError> {
        self.transact(kind.pack(), |packs| {
            let (_, entry) = packs.find_mut(kind, id)?;
            delete_by_path(entry, path).map(|_| ())
        })
    }

    /// Applies `mutate` to the working copy, re-validates every pack and
    /// writes `pack` only when the result is clean. On any failure, a failed
    /// write included, the working copy is put back as it was.
    fn transact<F>(&mut self, pack: PackKind, mutate: F) -> Result<Mutation, ContentError>
    where
        F: FnOnce(&mut ContentPacks) -> Result<(), ContentError>,
    {
        let snapshot = self.packs.snapshot(pack);

        let mut outcome = mutate(&mut self.packs);
        if outcome.is_ok() {
            self.packs.rebuild_ids();
            let report = self.packs.validate();
            if !report.is_valid() {
                debug!("mutation rejected with {} issue(s)", report.len());
                outcome = Err(ContentError::Validation(report));
            }
        }
        let saved = outcome.and_then(|()| self.packs.save(pack));
        match saved {
            Ok(path) => {
                info!("updated {:?} pack", pack);
                Ok(Mutation { pack, path })
            }
            Err(err) => {
                self.packs.restore(pack, snapshot);
                Err(err)
            }
        }
    }
}

fn text_field(entry: &Value, key: &str, default: &str) -> String {
    match entry.get(key) {
        None => default.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn quest_steps_mut(quest: &mut Value, create: bool) -> Result<&mut Vec<Value>, ContentError> {
    let invalid = || ContentError::path_access("steps", "Quest is invalid: steps must be an array");
    let object = quest.as_object_mut().ok_or_else(invalid)?;
    if create {
        object
            .entry("steps".to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
    }
    object
        .get_mut("steps")
        .and_then(Value::as_array_mut)
        .ok_or_else(invalid)
}
