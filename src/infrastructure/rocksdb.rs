use crate::domain::calculation::SavedCalculation;
use crate::domain::ports::CalculationStore;
use crate::error::{LoanError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for storing saved calculations.
pub const CF_CALCULATIONS: &str = "calculations";

/// A persistent calculation store backed by RocksDB.
///
/// Records are keyed by the 16 raw bytes of their id and stored as JSON.
/// Owner scoping is enforced on read, so a foreign record reads as missing.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

fn missing_cf() -> LoanError {
    LoanError::StorageError(Box::new(std::io::Error::other(
        "Calculations column family not found",
    )))
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf = ColumnFamilyDescriptor::new(CF_CALCULATIONS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn read(&self, id: Uuid) -> Result<Option<SavedCalculation>> {
        let cf = self.db.cf_handle(CF_CALCULATIONS).ok_or_else(missing_cf)?;
        match self.db.get_cf(&cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CalculationStore for RocksDBStore {
    async fn store(&self, calculation: SavedCalculation) -> Result<()> {
        let cf = self.db.cf_handle(CF_CALCULATIONS).ok_or_else(missing_cf)?;
        let value = serde_json::to_vec(&calculation)?;
        self.db.put_cf(&cf, calculation.id.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, owner: &str, id: Uuid) -> Result<Option<SavedCalculation>> {
        Ok(self.read(id)?.filter(|c| c.owner == owner))
    }

    async fn list(&self, owner: &str) -> Result<Vec<SavedCalculation>> {
        let cf = self.db.cf_handle(CF_CALCULATIONS).ok_or_else(missing_cf)?;

        let mut calculations = Vec::new();
        for item in self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let calculation: SavedCalculation = serde_json::from_slice(&value)?;
            if calculation.owner == owner {
                calculations.push(calculation);
            }
        }
        calculations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(calculations)
    }

    async fn delete(&self, owner: &str, id: Uuid) -> Result<bool> {
        if self.get(owner, id).await?.is_none() {
            return Ok(false);
        }
        let cf = self.db.cf_handle(CF_CALCULATIONS).ok_or_else(missing_cf)?;
        self.db.delete_cf(&cf, id.as_bytes())?;
        Ok(true)
    }
}
