use serde::Serialize;
use serde_json::Number;

use super::vocab::MarketCategory;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub tradable: bool,
    pub category: MarketCategory,
    pub suggested_price: i64,
    pub min_price: i64,
    pub max_price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub max_stack: i64,
    pub weight: f64,
    pub can_stack: bool,
    pub value: i64,
    pub market: Market,
}

/// Store catalog entry; optional fields are omitted rather than written as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreEntry {
    pub item_id: String,
    pub name: String,
    /// Defaults to the item's `value` verbatim, so a float value stays a float.
    pub buy_price: Number,
    pub sell_price: i64,
    pub stock: i64,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MarketCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_role: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::{Number, json};

    use super::{Market, MarketCategory, NewItem, StoreEntry};

    #[test]
    fn new_item_keeps_on_disk_field_names() {
        let item = NewItem {
            id: "iron_bar".to_string(),
            name: "Iron Bar".to_string(),
            description: "Smelted iron".to_string(),
            emoji: ":package:".to_string(),
            max_stack: 99,
            weight: 1.0,
            can_stack: true,
            value: 5,
            market: Market {
                tradable: true,
                category: MarketCategory::Materials,
                suggested_price: 5,
                min_price: 1,
                max_price: 5000,
            },
        };
        let doc = serde_json::to_value(item).expect("item should serialise");
        assert_eq!(doc["maxStack"], json!(99));
        assert_eq!(doc["weight"], json!(1.0));
        assert_eq!(doc["market"]["suggestedPrice"], json!(5));
        assert_eq!(doc["market"]["category"], json!("materials"));
    }

    #[test]
    fn store_entry_omits_absent_optionals() {
        let entry = StoreEntry {
            item_id: "iron_ore".to_string(),
            name: "Iron Ore".to_string(),
            buy_price: Number::from(4),
            sell_price: 3,
            stock: -1,
            available: true,
            description: None,
            category: None,
            purchase_limit: None,
            required_role: None,
        };
        assert_eq!(
            serde_json::to_value(entry).expect("entry should serialise"),
            json!({
                "itemId": "iron_ore",
                "name": "Iron Ore",
                "buyPrice": 4,
                "sellPrice": 3,
                "stock": -1,
                "available": true
            })
        );
    }
}
