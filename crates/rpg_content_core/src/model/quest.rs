use std::fmt;

use serde::Serialize;

use super::vocab::{Difficulty, GatherAction, Profession, RepeatKind};

/// Discriminator of a quest step. Unrecognised tags are kept verbatim so
/// validation can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepKind {
    GatherItem,
    ProcessItem,
    CraftRecipe,
    MarketListItem,
    MarketBuyItem,
    FightWin,
    Unknown(String),
}

impl StepKind {
    pub const KNOWN: [StepKind; 6] = [
        Self::GatherItem,
        Self::ProcessItem,
        Self::CraftRecipe,
        Self::MarketListItem,
        Self::MarketBuyItem,
        Self::FightWin,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "gather_item" => Self::GatherItem,
            "process_item" => Self::ProcessItem,
            "craft_recipe" => Self::CraftRecipe,
            "market_list_item" => Self::MarketListItem,
            "market_buy_item" => Self::MarketBuyItem,
            "fight_win" => Self::FightWin,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::GatherItem => "gather_item",
            Self::ProcessItem => "process_item",
            Self::CraftRecipe => "craft_recipe",
            Self::MarketListItem => "market_list_item",
            Self::MarketBuyItem => "market_buy_item",
            Self::FightWin => "fight_win",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Starter step given to freshly created quests. The `kind` tag is written
/// first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename = "gather_item", rename_all = "camelCase")]
pub struct GatherStep {
    pub action: GatherAction,
    pub item_id: String,
    pub qty: i64,
    pub location_tier_min: i64,
}

impl GatherStep {
    pub fn starter(item_id: impl Into<String>) -> Self {
        Self {
            action: GatherAction::Mine,
            item_id: item_id.into(),
            qty: 1,
            location_tier_min: crate::rules::TIER_MIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Repeat {
    pub kind: RepeatKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prerequisites {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<Profession>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_quests_completed: Option<Vec<String>>,
}

impl Prerequisites {
    pub fn is_empty(&self) -> bool {
        self.profession.is_none()
            && self.min_level.is_none()
            && self.requires_quests_completed.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyReward {
    pub id: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rewards {
    pub currency: Vec<CurrencyReward>,
    pub xp: i64,
}

/// Quest document as written by `create`; field order is the on-disk order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuest {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub description: String,
    pub repeat: Repeat,
    pub difficulty: Difficulty,
    pub enabled: bool,
    pub steps: Vec<GatherStep>,
    pub rewards: Rewards,
    #[serde(skip_serializing_if = "Prerequisites::is_empty")]
    pub prerequisites: Prerequisites,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{GatherStep, StepKind};

    #[test]
    fn unknown_step_tags_are_preserved() {
        let kind = StepKind::from_tag("teleport");
        assert_eq!(kind, StepKind::Unknown("teleport".to_string()));
        assert_eq!(kind.as_str(), "teleport");
        assert!(!kind.is_known());
        for known in StepKind::KNOWN {
            assert_eq!(StepKind::from_tag(known.as_str()), known);
        }
    }

    #[test]
    fn starter_gather_step_serialises_with_kind_first() {
        let step = serde_json::to_value(GatherStep::starter("iron_ore"))
            .expect("step should serialise");
        assert_eq!(
            step,
            json!({
                "kind": "gather_item",
                "action": "mine",
                "itemId": "iron_ore",
                "qty": 1,
                "locationTierMin": 1
            })
        );
        let keys: Vec<&str> = step
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["kind", "action", "itemId", "qty", "locationTierMin"]);
    }
}
