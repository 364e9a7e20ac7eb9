//! Content rules shared by the validators, the model builders and the CLI.

pub const SCHEMA_VERSION: i64 = 1;

pub const TIER_MIN: i64 = 1;
pub const TIER_MAX: i64 = 4;

/// Issues shown in a failed-mutation message before the "... and N more" line.
pub const REPORT_DISPLAY_CAP: usize = 30;

pub const ID_PATTERN: &str = "^[a-z0-9_]+$";

pub const DEFAULT_QUEST_ICON: &str = "📜";
pub const DEFAULT_QUEST_COINS: i64 = 100;
pub const DEFAULT_QUEST_XP: i64 = 50;
pub const DEFAULT_REPEAT_HOURS: i64 = 24;
pub const DEFAULT_CURRENCY_ID: &str = "coins";
pub const FALLBACK_GATHER_ITEM_ID: &str = "pyrite_ore";

pub const DEFAULT_ITEM_EMOJI: &str = ":package:";
pub const DEFAULT_MAX_STACK: i64 = 99;
pub const DEFAULT_ITEM_WEIGHT: f64 = 1.0;
pub const DEFAULT_ITEM_VALUE: i64 = 1;
pub const DEFAULT_MIN_PRICE: i64 = 1;
pub const DEFAULT_MAX_PRICE: i64 = 5000;

pub const DEFAULT_STORE_STOCK: i64 = -1;
pub const DEFAULT_STORE_BUY_PRICE: i64 = 10;
pub const STORE_SELL_RATIO: f64 = 0.85;

/// Content ids are non-empty runs of lowercase ASCII letters, digits and `_`.
pub fn is_valid_content_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}
