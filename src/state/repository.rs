use std::path::{Path, PathBuf};

use crate::engine::ledger::RejectedEntry;
use crate::error::{MenuError, Result};
use crate::models::{EntryKind, LedgerEntry, LedgerSet, RecipeCard};
use crate::state::persistence::{
    append_ledger_rows, load_ledger_checked, load_recipes, remove_ledger_row,
    set_essential_in_file,
};

/// Storage for a user's manual ledger. Append/delete only.
pub trait LedgerRepository {
    /// Readable entries plus the stored rows that could not be read.
    fn load_checked(&self) -> Result<(LedgerSet, Vec<RejectedEntry>)>;

    fn load(&self) -> Result<LedgerSet> {
        Ok(self.load_checked()?.0)
    }

    /// Append entries, skipping any that fail validation. Returns how many
    /// were stored.
    fn append(&mut self, entries: Vec<LedgerEntry>) -> Result<usize>;

    fn delete(&mut self, kind: EntryKind, index: usize) -> Result<LedgerEntry>;
}

/// Storage for recipe cards keyed by SKU.
pub trait RecipeRepository {
    fn load_recipes(&self) -> Result<Vec<RecipeCard>>;

    /// The only write the engine makes to recipe data.
    fn set_essential(&mut self, sku_id: &str, essential: bool) -> Result<()>;
}

/// Ledger kept as a single JSON document.
pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerRepository for JsonLedgerStore {
    fn load_checked(&self) -> Result<(LedgerSet, Vec<RejectedEntry>)> {
        load_ledger_checked(&self.path)
    }

    fn append(&mut self, entries: Vec<LedgerEntry>) -> Result<usize> {
        let mut valid = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            match entry.validate() {
                Ok(()) => valid.push(entry),
                Err(e) => tracing::warn!("Not importing row {}: {}", i + 1, e),
            }
        }

        if !valid.is_empty() {
            append_ledger_rows(&self.path, &valid)?;
            tracing::info!("Appended {} ledger entries to {:?}", valid.len(), self.path);
        }
        Ok(valid.len())
    }

    fn delete(&mut self, kind: EntryKind, index: usize) -> Result<LedgerEntry> {
        let removed = remove_ledger_row(&self.path, kind, index)?;
        tracing::info!("Deleted {} entry #{} from {:?}", kind, index, self.path);
        Ok(removed)
    }
}

/// Recipe cards kept as a JSON array.
pub struct JsonRecipeStore {
    path: PathBuf,
}

impl JsonRecipeStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecipeRepository for JsonRecipeStore {
    fn load_recipes(&self) -> Result<Vec<RecipeCard>> {
        load_recipes(&self.path)
    }

    fn set_essential(&mut self, sku_id: &str, essential: bool) -> Result<()> {
        if set_essential_in_file(&self.path, sku_id, essential)? == 0 {
            return Err(MenuError::RecipeNotFound(sku_id.to_string()));
        }
        tracing::info!("Set essential={} on {}", essential, sku_id);
        Ok(())
    }
}
