//! File-based CombatantStore implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use arena_core::{
    BattleId, BattleRecord, BattleSummary, Combatant, CombatantId, CombatantSpec, NewBattleRecord,
    RankingEntry, StatsDelta,
};

use crate::repository::{
    ArenaLedger, ArenaTotals, BattleCommit, CombatantStore, RepositoryError, Result,
};

/// File-based implementation of CombatantStore.
///
/// The whole ledger lives in one JSON document (`arena.json`). Reads are served
/// from memory; every write is applied to a copy of the ledger, persisted, and
/// only then swapped in.
///
/// # Atomicity
///
/// The document is written to `arena.json.tmp` and renamed over the original,
/// so a crash mid-write leaves the previous version intact. A failed write
/// leaves both disk and memory unchanged.
///
/// Writers are serialized by an async mutex; the file I/O and the swap run on
/// the blocking pool, so readers and timers keep running during a write.
pub struct FileCombatantStore {
    path: PathBuf,
    ledger: Arc<RwLock<ArenaLedger>>,
    writer: Arc<Mutex<()>>,
}

impl FileCombatantStore {
    pub const FILE_NAME: &'static str = "arena.json";

    /// Open (or create) the store inside `base_dir`.
    pub fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        let path = base_dir.join(Self::FILE_NAME);

        let ledger = if path.exists() {
            let bytes = fs::read(&path)?;
            let ledger: ArenaLedger = serde_json::from_slice(&bytes)?;
            tracing::debug!(
                path = %path.display(),
                battles = ledger.battles().len(),
                "loaded arena ledger"
            );
            ledger
        } else {
            let ledger = ArenaLedger::new();
            Self::persist(&path, &ledger)?;
            tracing::debug!(path = %path.display(), "created empty arena ledger");
            ledger
        };

        Ok(Self {
            path,
            ledger: Arc::new(RwLock::new(ledger)),
            writer: Arc::new(Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(path: &Path, ledger: &ArenaLedger) -> Result<()> {
        let temp_path = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(ledger)?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&ArenaLedger) -> T) -> Result<T> {
        let ledger = self
            .ledger
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(f(&ledger))
    }

    /// Apply `f` to a copy, persist it, then publish it.
    ///
    /// The writer guard moves into the blocking task: if the caller is dropped
    /// mid-write, the write still completes (disk and memory together) before
    /// the next writer copies the ledger.
    async fn transact<T, F>(&self, f: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut ArenaLedger) -> Result<T> + Send,
    {
        let writer = Arc::clone(&self.writer).lock_owned().await;

        let mut draft = self.read(ArenaLedger::clone)?;
        let value = f(&mut draft)?;

        let path = self.path.clone();
        let ledger = Arc::clone(&self.ledger);
        tokio::task::spawn_blocking(move || -> Result<()> {
            let _writer = writer;
            Self::persist(&path, &draft)?;
            *ledger.write().map_err(|_| RepositoryError::LockPoisoned)? = draft;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::Unavailable(format!("ledger write task failed: {e}")))??;

        Ok(value)
    }
}

#[async_trait]
impl CombatantStore for FileCombatantStore {
    async fn get_combatant(&self, id: CombatantId) -> Result<Option<Combatant>> {
        self.read(|ledger| ledger.combatant(id).cloned())
    }

    async fn insert_battle_record(&self, record: NewBattleRecord) -> Result<BattleId> {
        self.transact(|ledger| {
            ledger
                .insert_battle_record(record, Utc::now())
                .map(|saved| saved.id)
        })
        .await
    }

    async fn update_combatant_stats(&self, id: CombatantId, delta: StatsDelta) -> Result<()> {
        self.transact(|ledger| ledger.apply_delta(id, &delta))
            .await
    }

    async fn commit_battle(&self, commit: BattleCommit) -> Result<BattleRecord> {
        self.transact(|ledger| ledger.commit(commit, Utc::now()))
            .await
    }

    async fn top_ranked(&self, limit: usize) -> Result<Vec<RankingEntry>> {
        self.read(|ledger| ledger.top_ranked(limit))
    }

    async fn list_combatants(&self) -> Result<Vec<Combatant>> {
        self.read(ArenaLedger::list_combatants)
    }

    async fn recent_battles(&self, limit: usize) -> Result<Vec<BattleSummary>> {
        self.read(|ledger| ledger.recent_battles(limit))
    }

    async fn totals(&self) -> Result<ArenaTotals> {
        self.read(ArenaLedger::totals)
    }

    async fn seed_combatants(&self, roster: Vec<CombatantSpec>) -> Result<Vec<Combatant>> {
        self.transact(|ledger| Ok(ledger.seed(roster))).await
    }

    async fn ping(&self) -> Result<()> {
        if self.path.exists() {
            Ok(())
        } else {
            Err(RepositoryError::Unavailable(format!(
                "ledger file {} is missing",
                self.path.display()
            )))
        }
    }
}
