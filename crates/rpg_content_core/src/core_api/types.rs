use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Difficulty, MarketCategory, Profession, RepeatKind, StepKind};
use crate::rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackKind {
    Quests,
    Items,
    Recipes,
    Store,
}

impl PackKind {
    pub const ALL: [PackKind; 4] = [Self::Quests, Self::Items, Self::Recipes, Self::Store];

    /// File name without the `.json5`/`.json` extension.
    pub fn basename(self) -> &'static str {
        match self {
            Self::Quests => "rpg.quests",
            Self::Items => "rpg.materials",
            Self::Recipes => "rpg.recipes",
            Self::Store => "rpg.store",
        }
    }

    /// Key of the entry array under the pack root.
    pub fn entries_key(self) -> &'static str {
        match self {
            Self::Quests => "quests",
            Self::Items | Self::Store => "items",
            Self::Recipes => "recipes",
        }
    }

    /// Prefix used in validation issue paths.
    pub fn label(self) -> &'static str {
        match self {
            Self::Quests => "$quests",
            Self::Items => "$items",
            Self::Recipes => "$recipes",
            Self::Store => "$store",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Quest,
    Item,
    Recipe,
    StoreItem,
}

impl EntityKind {
    pub fn pack(self) -> PackKind {
        match self {
            Self::Quest => PackKind::Quests,
            Self::Item => PackKind::Items,
            Self::Recipe => PackKind::Recipes,
            Self::StoreItem => PackKind::Store,
        }
    }

    pub fn id_field(self) -> &'static str {
        match self {
            Self::StoreItem => "itemId",
            _ => "id",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quest => "Quest",
            Self::Item => "Item",
            Self::Recipe => "Recipe",
            Self::StoreItem => "Store item",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackCounts {
    pub quests: usize,
    pub items: usize,
    pub recipes: usize,
    pub store_items: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestSummary {
    pub id: String,
    pub title: String,
    pub difficulty: String,
    pub step_count: usize,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemSummary {
    pub id: String,
    pub name: String,
    /// Raw `value` field; shown as-is so floats keep their fraction.
    pub value: Value,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSummary {
    pub item_id: String,
    pub name: String,
    pub buy_price: Value,
    pub sell_price: Value,
    pub stock: i64,
    pub available: bool,
}

/// Written file reported back to the caller after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub pack: PackKind,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestDraft {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub difficulty: Difficulty,
    pub repeat_kind: RepeatKind,
    pub repeat_hours: i64,
    pub profession: Option<Profession>,
    pub min_level: Option<i64>,
    pub requires: Vec<String>,
    pub coins: i64,
    pub xp: i64,
    pub enabled: bool,
}

impl QuestDraft {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            icon: rules::DEFAULT_QUEST_ICON.to_string(),
            difficulty: Difficulty::Easy,
            repeat_kind: RepeatKind::None,
            repeat_hours: rules::DEFAULT_REPEAT_HOURS,
            profession: None,
            min_level: None,
            requires: Vec::new(),
            coins: rules::DEFAULT_QUEST_COINS,
            xp: rules::DEFAULT_QUEST_XP,
            enabled: true,
        }
    }

    /// Splits a comma separated id list, dropping blank parts.
    pub fn with_requires_csv(mut self, csv: &str) -> Self {
        self.requires = csv
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepDraft {
    pub kind: StepKind,
    pub qty: i64,
    pub params: Map<String, Value>,
}

impl StepDraft {
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            qty: 1,
            params: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub id: String,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub max_stack: i64,
    pub weight: f64,
    pub can_stack: bool,
    pub value: i64,
    pub tradable: bool,
    pub category: MarketCategory,
    pub suggested_price: Option<i64>,
    pub min_price: i64,
    pub max_price: i64,
}

impl ItemDraft {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            emoji: rules::DEFAULT_ITEM_EMOJI.to_string(),
            max_stack: rules::DEFAULT_MAX_STACK,
            weight: rules::DEFAULT_ITEM_WEIGHT,
            can_stack: true,
            value: rules::DEFAULT_ITEM_VALUE,
            tradable: true,
            category: MarketCategory::Materials,
            suggested_price: None,
            min_price: rules::DEFAULT_MIN_PRICE,
            max_price: rules::DEFAULT_MAX_PRICE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreDraft {
    pub item_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub buy_price: Option<i64>,
    pub sell_price: Option<i64>,
    pub stock: Option<i64>,
    pub available: bool,
    pub category: Option<MarketCategory>,
    pub purchase_limit: Option<i64>,
    pub required_role: Option<String>,
}

impl StoreDraft {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            available: true,
            ..Self::default()
        }
    }
}
