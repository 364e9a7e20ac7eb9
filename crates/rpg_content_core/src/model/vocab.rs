//! Closed string vocabularies used by quests, items and the store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generates a fieldless enum backed by a fixed set of lowercase tags.
macro_rules! define_vocab {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $tag:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $($tag => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag),+
                }
            }

            pub fn tags() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_tag(s).ok_or_else(|| {
                    format!("expected one of: {}", Self::tags().join(", "))
                })
            }
        }
    };
}

define_vocab! {
    Difficulty {
        Easy => "easy",
        Medium => "medium",
        Hard => "hard",
        Expert => "expert",
        Legendary => "legendary",
    }
}

define_vocab! {
    RepeatKind {
        None => "none",
        Daily => "daily",
        Weekly => "weekly",
        Cooldown => "cooldown",
    }
}

define_vocab! {
    Profession {
        Miner => "miner",
        Lumber => "lumber",
    }
}

define_vocab! {
    GatherAction {
        Mine => "mine",
        Forest => "forest",
    }
}

define_vocab! {
    MarketCategory {
        Materials => "materials",
        Consumables => "consumables",
        Components => "components",
        Gear => "gear",
        Tools => "tools",
    }
}

impl MarketCategory {
    /// `['components', 'consumables', ...]`, the form used in issue messages.
    pub fn sorted_tag_list() -> String {
        let mut tags = Self::tags();
        tags.sort_unstable();
        let quoted: Vec<String> = tags.iter().map(|tag| format!("'{tag}'")).collect();
        format!("[{}]", quoted.join(", "))
    }
}
