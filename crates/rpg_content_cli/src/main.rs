use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use rpg_content_core::core_api::{
    ContentError, Engine, ItemDraft, QuestDraft, Session, StepDraft, StoreDraft,
};
use rpg_content_core::model::{Difficulty, MarketCategory, Profession, RepeatKind, StepKind};
use rpg_content_core::value::{parse_cli_value, parse_param_pairs};
use rpg_content_render::{
    render_document, render_item_list, render_item_list_json, render_pack_counts,
    render_quest_list, render_quest_list_json, render_store_list, render_store_list_json,
    render_validation_json, render_validation_report,
};
use serde_json::Value as JsonValue;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Manage RPG quests, items and store content packs.",
    after_help = "Examples:\n  rpg-content validate\n  rpg-content quests create tutorial_quest --title \"First Steps\" --description \"Learn the basics\"\n  rpg-content quests step-add tutorial_quest --kind gather_item --param itemId=stone_ore --qty 5\n  rpg-content store add pyrite_ore --buy-price 50 --sell-price 40"
)]
struct Cli {
    /// Directory containing the content packs.
    #[arg(
        long,
        global = true,
        env = "RPG_CONTENT_PACK_DIR",
        default_value = "content/packs",
        value_name = "DIR"
    )]
    pack_dir: PathBuf,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate quests, items, recipes and store packs.
    Validate {
        #[arg(long)]
        json: bool,
    },
    /// Quest operations.
    Quests {
        #[command(subcommand)]
        command: QuestCommand,
    },
    /// Item operations.
    Items {
        #[command(subcommand)]
        command: ItemCommand,
    },
    /// Store catalog operations.
    Store {
        #[command(subcommand)]
        command: StoreCommand,
    },
}

#[derive(Debug, Subcommand)]
enum QuestCommand {
    /// List all quests.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one quest as JSON.
    Show { quest_id: String },
    /// Create a quest skeleton with default structure.
    Create {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,
        #[arg(long = "repeat-kind", default_value = "none")]
        repeat_kind: RepeatKind,
        /// Cooldown hours, only used with --repeat-kind cooldown.
        #[arg(long = "repeat-hours", allow_hyphen_values = true)]
        repeat_hours: Option<i64>,
        #[arg(long)]
        profession: Option<Profession>,
        #[arg(long = "min-level", allow_hyphen_values = true)]
        min_level: Option<i64>,
        /// Comma-separated quest ids that must be completed first.
        #[arg(long)]
        requires: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        coins: Option<i64>,
        #[arg(long, allow_hyphen_values = true)]
        xp: Option<i64>,
        #[arg(long)]
        disabled: bool,
    },
    /// Delete a quest.
    Delete { quest_id: String },
    /// Set a quest field by path (e.g. steps[0].itemId).
    Set {
        quest_id: String,
        #[arg(long)]
        path: String,
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },
    /// Delete a quest field by path (e.g. prerequisites.profession).
    Unset {
        quest_id: String,
        #[arg(long)]
        path: String,
    },
    /// Append a quest step.
    StepAdd {
        quest_id: String,
        #[arg(long, value_parser = parse_step_kind)]
        kind: StepKind,
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        qty: i64,
        /// Extra step field as key=value. Can be repeated.
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
    /// Remove a step by zero-based index.
    StepRemove {
        quest_id: String,
        #[arg(long)]
        index: usize,
    },
}

#[derive(Debug, Subcommand)]
enum ItemCommand {
    /// List all items.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one item as JSON.
    Show { item_id: String },
    /// Create an item.
    Create {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        emoji: Option<String>,
        #[arg(long = "max-stack", allow_hyphen_values = true)]
        max_stack: Option<i64>,
        #[arg(long, allow_hyphen_values = true)]
        weight: Option<f64>,
        #[arg(long = "can-stack", overrides_with = "no_can_stack")]
        can_stack: bool,
        #[arg(long = "no-can-stack", overrides_with = "can_stack")]
        no_can_stack: bool,
        #[arg(long, allow_hyphen_values = true)]
        value: Option<i64>,
        #[arg(long, overrides_with = "no_tradable")]
        tradable: bool,
        #[arg(long = "no-tradable", overrides_with = "tradable")]
        no_tradable: bool,
        #[arg(long)]
        category: Option<MarketCategory>,
        /// Defaults to the item value.
        #[arg(long = "suggested-price", allow_hyphen_values = true)]
        suggested_price: Option<i64>,
        #[arg(long = "min-price", allow_hyphen_values = true)]
        min_price: Option<i64>,
        #[arg(long = "max-price", allow_hyphen_values = true)]
        max_price: Option<i64>,
    },
    /// Delete an item.
    Delete { item_id: String },
    /// Set an item field by path (e.g. market.suggestedPrice).
    Set {
        item_id: String,
        #[arg(long)]
        path: String,
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },
    /// Delete an item field by path (e.g. market.maxPrice).
    Unset {
        item_id: String,
        #[arg(long)]
        path: String,
    },
}

#[derive(Debug, Subcommand)]
enum StoreCommand {
    /// List all store items.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one store item as JSON.
    Show { item_id: String },
    /// Add an existing item to the store catalog.
    Add {
        item_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Defaults to the item value.
        #[arg(long = "buy-price", allow_hyphen_values = true)]
        buy_price: Option<i64>,
        /// Defaults to 85% of the item value.
        #[arg(long = "sell-price", allow_hyphen_values = true)]
        sell_price: Option<i64>,
        /// Available stock, -1 for unlimited.
        #[arg(long, allow_hyphen_values = true)]
        stock: Option<i64>,
        #[arg(long)]
        unavailable: bool,
        #[arg(long)]
        category: Option<MarketCategory>,
        /// Per-user purchase limit, 0 for unlimited.
        #[arg(long = "purchase-limit", allow_hyphen_values = true)]
        purchase_limit: Option<i64>,
        #[arg(long = "required-role")]
        required_role: Option<String>,
    },
    /// Remove an item from the store.
    Remove { item_id: String },
    /// Set a store item field (e.g. buyPrice, available).
    Set {
        item_id: String,
        #[arg(long)]
        path: String,
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },
    /// Delete a store item field by path.
    Unset {
        item_id: String,
        #[arg(long)]
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<i32, ContentError> {
    let mut session = Engine::new().open(&cli.pack_dir)?;
    match cli.command {
        Command::Validate { json } => run_validate(&session, json),
        Command::Quests { command } => run_quests(&mut session, command).map(|()| 0),
        Command::Items { command } => run_items(&mut session, command).map(|()| 0),
        Command::Store { command } => run_store(&mut session, command).map(|()| 0),
    }
}

fn run_validate(session: &Session, json: bool) -> Result<i32, ContentError> {
    let report = session.validate();
    let code = if report.is_valid() { 0 } else { 1 };

    if json {
        print_json(&render_validation_json(&report, &session.counts()))?;
    } else if report.is_empty() {
        print!("{}", render_pack_counts(&session.counts()));
    } else {
        print!("{}", render_validation_report(&report));
    }
    Ok(code)
}

// -----------------------------------------------------------------------------
// Quests
// -----------------------------------------------------------------------------

fn run_quests(session: &mut Session, command: QuestCommand) -> Result<(), ContentError> {
    match command {
        QuestCommand::List { json } => {
            let quests = session.quest_summaries();
            if json {
                print_json(&render_quest_list_json(&quests))?;
            } else {
                print!("{}", render_quest_list(&quests));
            }
        }
        QuestCommand::Show { quest_id } => {
            print!("{}", render_document(session.quest(&quest_id)?));
        }
        QuestCommand::Create {
            id,
            title,
            description,
            icon,
            difficulty,
            repeat_kind,
            repeat_hours,
            profession,
            min_level,
            requires,
            coins,
            xp,
            disabled,
        } => {
            let mut draft = QuestDraft::new(id.as_str(), title, description)
                .with_requires_csv(requires.as_deref().unwrap_or(""));
            if let Some(icon) = icon {
                draft.icon = icon;
            }
            draft.difficulty = difficulty;
            draft.repeat_kind = repeat_kind;
            if let Some(hours) = repeat_hours {
                draft.repeat_hours = hours;
            }
            draft.profession = profession;
            draft.min_level = min_level;
            if let Some(coins) = coins {
                draft.coins = coins;
            }
            if let Some(xp) = xp {
                draft.xp = xp;
            }
            draft.enabled = !disabled;

            let mutation = session.create_quest(draft)?;
            println!("Created quest '{id}' in {}", mutation.path.display());
        }
        QuestCommand::Delete { quest_id } => {
            session.delete_quest(&quest_id)?;
            println!("Deleted quest '{quest_id}'");
        }
        QuestCommand::Set {
            quest_id,
            path,
            value,
        } => {
            session.set_quest_field(&quest_id, &path, parse_cli_value(&value)?)?;
            println!("Updated quest '{quest_id}' at path '{path}'");
        }
        QuestCommand::Unset { quest_id, path } => {
            session.unset_quest_field(&quest_id, &path)?;
            println!("Removed path '{path}' from quest '{quest_id}'");
        }
        QuestCommand::StepAdd {
            quest_id,
            kind,
            qty,
            params,
        } => {
            let mut step = StepDraft::new(kind.clone());
            step.qty = qty;
            step.params = parse_param_pairs(&params)?;
            session.add_quest_step(&quest_id, step)?;
            println!("Added step '{kind}' to quest '{quest_id}'");
        }
        QuestCommand::StepRemove { quest_id, index } => {
            session.remove_quest_step(&quest_id, index)?;
            println!("Removed step index {index} from quest '{quest_id}'");
        }
    }
    Ok(())
}

fn parse_step_kind(value: &str) -> Result<StepKind, String> {
    let kind = StepKind::from_tag(value);
    if kind.is_known() {
        return Ok(kind);
    }
    let known = StepKind::KNOWN;
    let tags: Vec<&str> = known.iter().map(StepKind::as_str).collect();
    Err(format!("expected one of: {}", tags.join(", ")))
}

// -----------------------------------------------------------------------------
// Items
// -----------------------------------------------------------------------------

fn run_items(session: &mut Session, command: ItemCommand) -> Result<(), ContentError> {
    match command {
        ItemCommand::List { json } => {
            let items = session.item_summaries();
            if json {
                print_json(&render_item_list_json(&items))?;
            } else {
                print!("{}", render_item_list(&items));
            }
        }
        ItemCommand::Show { item_id } => {
            print!("{}", render_document(session.item(&item_id)?));
        }
        ItemCommand::Create {
            id,
            name,
            description,
            emoji,
            max_stack,
            weight,
            can_stack: _,
            no_can_stack,
            value,
            tradable: _,
            no_tradable,
            category,
            suggested_price,
            min_price,
            max_price,
        } => {
            let mut draft = ItemDraft::new(id.as_str(), name, description);
            if let Some(emoji) = emoji {
                draft.emoji = emoji;
            }
            if let Some(max_stack) = max_stack {
                draft.max_stack = max_stack;
            }
            if let Some(weight) = weight {
                draft.weight = weight;
            }
            draft.can_stack = !no_can_stack;
            if let Some(value) = value {
                draft.value = value;
            }
            draft.tradable = !no_tradable;
            if let Some(category) = category {
                draft.category = category;
            }
            draft.suggested_price = suggested_price;
            if let Some(min_price) = min_price {
                draft.min_price = min_price;
            }
            if let Some(max_price) = max_price {
                draft.max_price = max_price;
            }

            let mutation = session.create_item(draft)?;
            println!("Created item '{id}' in {}", mutation.path.display());
        }
        ItemCommand::Delete { item_id } => {
            session.delete_item(&item_id)?;
            println!("Deleted item '{item_id}'");
        }
        ItemCommand::Set {
            item_id,
            path,
            value,
        } => {
            session.set_item_field(&item_id, &path, parse_cli_value(&value)?)?;
            println!("Updated item '{item_id}' at path '{path}'");
        }
        ItemCommand::Unset { item_id, path } => {
            session.unset_item_field(&item_id, &path)?;
            println!("Removed path '{path}' from item '{item_id}'");
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Store
// -----------------------------------------------------------------------------

fn run_store(session: &mut Session, command: StoreCommand) -> Result<(), ContentError> {
    match command {
        StoreCommand::List { json } => {
            let entries = session.store_summaries();
            if json {
                print_json(&render_store_list_json(&entries))?;
            } else {
                print!("{}", render_store_list(&entries));
            }
        }
        StoreCommand::Show { item_id } => {
            print!("{}", render_document(session.store_entry(&item_id)?));
        }
        StoreCommand::Add {
            item_id,
            name,
            description,
            buy_price,
            sell_price,
            stock,
            unavailable,
            category,
            purchase_limit,
            required_role,
        } => {
            let draft = StoreDraft {
                name,
                description,
                buy_price,
                sell_price,
                stock,
                available: !unavailable,
                category,
                purchase_limit,
                required_role,
                ..StoreDraft::new(item_id.as_str())
            };
            let mutation = session.add_store_entry(draft)?;
            println!("Added '{item_id}' to store in {}", mutation.path.display());
        }
        StoreCommand::Remove { item_id } => {
            session.remove_store_entry(&item_id)?;
            println!("Removed '{item_id}' from store");
        }
        StoreCommand::Set {
            item_id,
            path,
            value,
        } => {
            session.set_store_field(&item_id, &path, parse_cli_value(&value)?)?;
            println!("Updated store item '{item_id}' at path '{path}'");
        }
        StoreCommand::Unset { item_id, path } => {
            session.unset_store_field(&item_id, &path)?;
            println!("Removed path '{path}' from store item '{item_id}'");
        }
    }
    Ok(())
}

fn print_json(value: &JsonValue) -> Result<(), ContentError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
