use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::ledger::RejectedEntry;
use crate::error::{MenuError, Result};
use crate::models::{
    EntryKind, ExpenseEntry, LedgerEntry, LedgerSet, ManpowerEntry, PurchaseEntry, RecipeCard,
    SalesEntry, VisionCash,
};

/// Parse each element on its own, so one malformed row does not hide the rest.
fn parse_rows<T: DeserializeOwned>(
    source: &'static str,
    rows: &[Value],
    rejected: &mut Vec<RejectedEntry>,
) -> Vec<T> {
    let mut parsed = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        match T::deserialize(row) {
            Ok(value) => parsed.push(value),
            Err(e) => {
                tracing::warn!("Skipping unreadable {} row #{}: {}", source, index, e);
                rejected.push(RejectedEntry {
                    source,
                    index,
                    error: MenuError::Json(e),
                });
            }
        }
    }
    parsed
}

fn read_array<P: AsRef<Path>>(path: P) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load recipe cards from a JSON array.
///
/// Cards that cannot be read are skipped with a warning. Deduplicates by
/// lowercase SKU (last occurrence wins). Cards are returned as stored;
/// validation happens when they are scored.
pub fn load_recipes<P: AsRef<Path>>(path: P) -> Result<Vec<RecipeCard>> {
    let rows = read_array(path)?;
    let recipes: Vec<RecipeCard> = parse_rows("recipe", &rows, &mut Vec::new());

    let mut order: Vec<String> = Vec::new();
    let mut seen: HashMap<String, RecipeCard> = HashMap::new();
    for recipe in recipes {
        let key = recipe.key();
        if !seen.contains_key(&key) {
            order.push(key.clone());
        }
        seen.insert(key, recipe);
    }

    Ok(order
        .into_iter()
        .filter_map(|key| seen.remove(&key))
        .collect())
}

/// Save recipe cards to a JSON file, preserving passthrough fields.
pub fn save_recipes<P: AsRef<Path>>(path: P, recipes: &[RecipeCard]) -> Result<()> {
    let json = serde_json::to_string_pretty(recipes)?;
    fs::write(path, json)?;
    Ok(())
}

/// Flip `isEssential` on every stored card with this SKU.
///
/// Works on the file as stored, so duplicate and unreadable cards are
/// written back untouched. Returns how many cards matched.
pub fn set_essential_in_file<P: AsRef<Path>>(
    path: P,
    sku_id: &str,
    essential: bool,
) -> Result<usize> {
    let path = path.as_ref();
    let mut rows = read_array(path)?;
    let key = sku_id.to_lowercase();

    let mut matched = 0;
    for row in rows.iter_mut() {
        let Some(card) = row.as_object_mut() else {
            continue;
        };
        let same_sku = card
            .get("skuId")
            .and_then(Value::as_str)
            .is_some_and(|sku| sku.to_lowercase() == key);
        if same_sku {
            card.insert("isEssential".to_string(), Value::Bool(essential));
            matched += 1;
        }
    }

    if matched > 0 {
        fs::write(path, serde_json::to_string_pretty(&rows)?)?;
    }
    Ok(matched)
}

/// Ledger document as stored, rows left unparsed.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawLedger {
    #[serde(default)]
    sales: Vec<Value>,
    #[serde(default)]
    purchases: Vec<Value>,
    #[serde(default)]
    expenses: Vec<Value>,
    #[serde(default)]
    manpower: Vec<Value>,
}

impl RawLedger {
    fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Ledger file {:?} not found, starting empty", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn rows(&self, kind: EntryKind) -> &[Value] {
        match kind {
            EntryKind::Sales => &self.sales,
            EntryKind::Purchase => &self.purchases,
            EntryKind::Expense => &self.expenses,
            EntryKind::Manpower => &self.manpower,
        }
    }

    fn rows_mut(&mut self, kind: EntryKind) -> &mut Vec<Value> {
        match kind {
            EntryKind::Sales => &mut self.sales,
            EntryKind::Purchase => &mut self.purchases,
            EntryKind::Expense => &mut self.expenses,
            EntryKind::Manpower => &mut self.manpower,
        }
    }

    fn parse(&self) -> (LedgerSet, Vec<RejectedEntry>) {
        let mut rejected = Vec::new();
        let ledger = LedgerSet {
            sales: parse_rows(EntryKind::Sales.as_str(), &self.sales, &mut rejected),
            purchases: parse_rows(EntryKind::Purchase.as_str(), &self.purchases, &mut rejected),
            expenses: parse_rows(EntryKind::Expense.as_str(), &self.expenses, &mut rejected),
            manpower: parse_rows(EntryKind::Manpower.as_str(), &self.manpower, &mut rejected),
        };
        (ledger, rejected)
    }
}

/// Position in the stored array of the `index`-th readable row of `kind`.
fn raw_position(raw: &RawLedger, kind: EntryKind, index: usize) -> Option<usize> {
    let readable = |row: &Value| match kind {
        EntryKind::Sales => SalesEntry::deserialize(row).is_ok(),
        EntryKind::Purchase => PurchaseEntry::deserialize(row).is_ok(),
        EntryKind::Expense => ExpenseEntry::deserialize(row).is_ok(),
        EntryKind::Manpower => ManpowerEntry::deserialize(row).is_ok(),
    };
    raw.rows(kind)
        .iter()
        .enumerate()
        .filter(|(_, row)| readable(*row))
        .nth(index)
        .map(|(pos, _)| pos)
}

/// Load the ledger, returning unreadable rows alongside the readable ones.
/// A missing file is an empty ledger.
pub fn load_ledger_checked<P: AsRef<Path>>(path: P) -> Result<(LedgerSet, Vec<RejectedEntry>)> {
    Ok(RawLedger::read(path.as_ref())?.parse())
}

/// Load the ledger. Unreadable rows are skipped with a warning.
pub fn load_ledger<P: AsRef<Path>>(path: P) -> Result<LedgerSet> {
    Ok(load_ledger_checked(path)?.0)
}

pub fn save_ledger<P: AsRef<Path>>(path: P, ledger: &LedgerSet) -> Result<()> {
    let json = serde_json::to_string_pretty(ledger)?;
    fs::write(path, json)?;
    Ok(())
}

/// Append entries to the stored ledger without touching existing rows.
pub fn append_ledger_rows<P: AsRef<Path>>(path: P, entries: &[LedgerEntry]) -> Result<()> {
    let path = path.as_ref();
    let mut raw = RawLedger::read(path)?;
    for entry in entries {
        let row = match entry {
            LedgerEntry::Sales(e) => serde_json::to_value(e)?,
            LedgerEntry::Purchase(e) => serde_json::to_value(e)?,
            LedgerEntry::Expense(e) => serde_json::to_value(e)?,
            LedgerEntry::Manpower(e) => serde_json::to_value(e)?,
        };
        raw.rows_mut(entry.kind()).push(row);
    }
    raw.write(path)
}

/// Remove the `index`-th readable row of `kind`. Unreadable rows are kept
/// and do not count towards the index.
pub fn remove_ledger_row<P: AsRef<Path>>(
    path: P,
    kind: EntryKind,
    index: usize,
) -> Result<LedgerEntry> {
    let path = path.as_ref();
    let mut raw = RawLedger::read(path)?;
    let pos = raw_position(&raw, kind, index).ok_or(MenuError::EntryNotFound {
        kind: kind.as_str(),
        index,
    })?;

    let row = raw.rows_mut(kind).remove(pos);
    let removed = match kind {
        EntryKind::Sales => LedgerEntry::Sales(serde_json::from_value(row)?),
        EntryKind::Purchase => LedgerEntry::Purchase(serde_json::from_value(row)?),
        EntryKind::Expense => LedgerEntry::Expense(serde_json::from_value(row)?),
        EntryKind::Manpower => LedgerEntry::Manpower(serde_json::from_value(row)?),
    };
    raw.write(path)?;
    Ok(removed)
}

/// Load one vision cash-movement record.
pub fn load_vision<P: AsRef<Path>>(path: P) -> Result<VisionCash> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Read ledger rows of one kind from a CSV file with a header row.
///
/// Headers use the JSON field names (`date,revenue,orderCount,channel` for
/// sales, `date,type,amount,note` for expenses, and so on).
pub fn import_ledger_csv<P: AsRef<Path>>(path: P, kind: EntryKind) -> Result<Vec<LedgerEntry>> {
    let path = path.as_ref();
    let entries = match kind {
        EntryKind::Sales => read_rows::<SalesEntry>(path)?
            .into_iter()
            .map(LedgerEntry::Sales)
            .collect(),
        EntryKind::Purchase => read_rows::<PurchaseEntry>(path)?
            .into_iter()
            .map(LedgerEntry::Purchase)
            .collect(),
        EntryKind::Expense => read_rows::<ExpenseEntry>(path)?
            .into_iter()
            .map(LedgerEntry::Expense)
            .collect(),
        EntryKind::Manpower => read_rows::<ManpowerEntry>(path)?
            .into_iter()
            .map(LedgerEntry::Manpower)
            .collect(),
    };
    Ok(entries)
}
