use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::{Value, json};

use crate::core_api::{ContentError, EntityKind, PackCounts, PackKind};
use crate::json_io::{parse_content_file, write_content_file};
use crate::rules::SCHEMA_VERSION;
use crate::validation::{IdIndex, ValidationReport, validate_packs};

const EXTENSIONS: [&str; 2] = ["json5", "json"];

/// Pack files found in a pack directory. `.json5` wins over `.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackPaths {
    pub pack_dir: PathBuf,
    pub quests: PathBuf,
    pub items: PathBuf,
    pub recipes: PathBuf,
    pub store: Option<PathBuf>,
}

impl PackPaths {
    pub fn resolve(pack_dir: impl Into<PathBuf>) -> Result<Self, ContentError> {
        let pack_dir = pack_dir.into();
        let required = |kind: PackKind| {
            find_pack_file(&pack_dir, kind).ok_or_else(|| ContentError::MissingPack {
                dir: pack_dir.clone(),
                basename: kind.basename().to_string(),
            })
        };

        Ok(Self {
            quests: required(PackKind::Quests)?,
            items: required(PackKind::Items)?,
            recipes: required(PackKind::Recipes)?,
            store: find_pack_file(&pack_dir, PackKind::Store),
            pack_dir,
        })
    }

    /// Where the store pack is written: the existing file, or a new
    /// `rpg.store.json` in the pack directory.
    pub fn store_target(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(|| {
            self.pack_dir
                .join(format!("{}.json", PackKind::Store.basename()))
        })
    }

    pub fn file(&self, kind: PackKind) -> PathBuf {
        match kind {
            PackKind::Quests => self.quests.clone(),
            PackKind::Items => self.items.clone(),
            PackKind::Recipes => self.recipes.clone(),
            PackKind::Store => self.store_target(),
        }
    }
}

fn find_pack_file(dir: &Path, kind: PackKind) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{ext}", kind.basename())))
        .find(|candidate| candidate.is_file())
}

/// In-memory working copy of every pack in a directory.
#[derive(Debug, Clone)]
pub struct ContentPacks {
    paths: PackPaths,
    quests: Value,
    items: Value,
    recipes: Value,
    store: Option<Value>,
    ids: IdIndex,
}

impl ContentPacks {
    pub fn load(paths: PackPaths) -> Result<Self, ContentError> {
        debug!("loading packs from {}", paths.pack_dir.display());
        let quests = parse_content_file(&paths.quests)?;
        let items = parse_content_file(&paths.items)?;
        let recipes = parse_content_file(&paths.recipes)?;
        let store = paths
            .store
            .as_deref()
            .map(parse_content_file)
            .transpose()?;

        let mut packs = Self {
            paths,
            quests,
            items,
            recipes,
            store,
            ids: IdIndex::default(),
        };
        packs.rebuild_ids();
        Ok(packs)
    }

    pub fn paths(&self) -> &PackPaths {
        &self.paths
    }

    pub fn ids(&self) -> &IdIndex {
        &self.ids
    }

    pub fn rebuild_ids(&mut self) {
        self.ids = IdIndex::build(&self.quests, &self.items, &self.recipes);
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub fn pack(&self, kind: PackKind) -> Option<&Value> {
        match kind {
            PackKind::Quests => Some(&self.quests),
            PackKind::Items => Some(&self.items),
            PackKind::Recipes => Some(&self.recipes),
            PackKind::Store => self.store.as_ref(),
        }
    }

    fn pack_mut(&mut self, kind: PackKind) -> &mut Value {
        match kind {
            PackKind::Quests => &mut self.quests,
            PackKind::Items => &mut self.items,
            PackKind::Recipes => &mut self.recipes,
            PackKind::Store => self
                .store
                .get_or_insert_with(|| json!({"schemaVersion": SCHEMA_VERSION, "items": []})),
        }
    }

    /// Entry array of a pack; empty when the pack is absent or malformed.
    pub fn entries(&self, kind: PackKind) -> &[Value] {
        self.pack(kind)
            .and_then(|pack| pack.get(kind.entries_key()))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Mutable entry array. A missing store pack is created in memory, and a
    /// missing entry key is created as an empty array.
    pub fn entries_mut(&mut self, kind: PackKind) -> Result<&mut Vec<Value>, ContentError> {
        let key = kind.entries_key();
        let Value::Object(root) = self.pack_mut(kind) else {
            return Err(ContentError::path_access(
                key,
                format!("{}: root must be an object", kind.label()),
            ));
        };
        let slot = root
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        slot.as_array_mut().ok_or_else(|| {
            ContentError::path_access(key, format!("{}.{key}: expected an array", kind.label()))
        })
    }

    pub fn find(&self, kind: EntityKind, id: &str) -> Result<(usize, &Value), ContentError> {
        self.entries(kind.pack())
            .iter()
            .enumerate()
            .find(|(_, entry)| entry_has_id(entry, kind, id))
            .ok_or_else(|| not_found(kind, id))
    }

    pub fn find_mut(
        &mut self,
        kind: EntityKind,
        id: &str,
    ) -> Result<(usize, &mut Value), ContentError> {
        let missing = not_found(kind, id);
        if self.pack(kind.pack()).is_none() {
            return Err(missing);
        }
        self.entries_mut(kind.pack())?
            .iter_mut()
            .enumerate()
            .find(|(_, entry)| entry_has_id(entry, kind, id))
            .ok_or(missing)
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.find(kind, id).is_ok()
    }

    pub fn counts(&self) -> PackCounts {
        PackCounts {
            quests: self.entries(PackKind::Quests).len(),
            items: self.entries(PackKind::Items).len(),
            recipes: self.entries(PackKind::Recipes).len(),
            store_items: self
                .has_store()
                .then(|| self.entries(PackKind::Store).len()),
        }
    }

    /// Full validation of every loaded pack, including the cycle check.
    pub fn validate(&self) -> ValidationReport {
        validate_packs(&self.quests, &self.items, &self.recipes, self.store.as_ref())
    }

    pub(crate) fn snapshot(&self, kind: PackKind) -> Option<Value> {
        self.pack(kind).cloned()
    }

    pub(crate) fn restore(&mut self, kind: PackKind, snapshot: Option<Value>) {
        match (kind, snapshot) {
            (PackKind::Store, snapshot) => self.store = snapshot,
            (_, Some(pack)) => *self.pack_mut(kind) = pack,
            (_, None) => {}
        }
        self.rebuild_ids();
    }

    /// Writes one pack back to disk. The store goes to its existing file or
    /// to `rpg.store.json` when it was created in memory.
    pub fn save(&mut self, kind: PackKind) -> Result<PathBuf, ContentError> {
        self.rebuild_ids();
        let target = self.paths.file(kind);
        let Some(pack) = self.pack(kind) else {
            return Ok(target);
        };
        write_content_file(&target, pack)?;
        if kind == PackKind::Store {
            self.paths.store = Some(target.clone());
        }
        info!("saved {}", target.display());
        Ok(target)
    }
}

fn entry_has_id(entry: &Value, kind: EntityKind, id: &str) -> bool {
    entry.get(kind.id_field()).and_then(Value::as_str) == Some(id)
}

fn not_found(kind: EntityKind, id: &str) -> ContentError {
    ContentError::NotFound {
        kind,
        id: id.to_string(),
    }
}
