//! Plain in-process model of the store's tables.
//!
//! Both store adapters keep an [`ArenaLedger`] behind a lock; the file adapter
//! additionally serializes it. All validation happens before any mutation, so a
//! failed operation leaves the ledger untouched.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use arena_core::{
    BattleId, BattleRecord, BattleSummary, Combatant, CombatantId, CombatantSpec, MostVictorious,
    NewBattleRecord, RankingEntry, StatsDelta, compare_rank,
};

use super::error::{RepositoryError, Result};
use super::types::{ArenaTotals, BattleCommit};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaLedger {
    combatants: BTreeMap<CombatantId, Combatant>,
    battles: Vec<BattleRecord>,
    next_combatant_id: CombatantId,
    next_battle_id: BattleId,
}

impl Default for ArenaLedger {
    fn default() -> Self {
        Self {
            combatants: BTreeMap::new(),
            battles: Vec::new(),
            next_combatant_id: CombatantId(1),
            next_battle_id: BattleId::FIRST,
        }
    }
}

impl ArenaLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }

    pub fn battles(&self) -> &[BattleRecord] {
        &self.battles
    }

    fn require(&self, id: CombatantId) -> Result<&Combatant> {
        self.combatants
            .get(&id)
            .ok_or(RepositoryError::CombatantNotFound(id))
    }

    fn check_participants(&self, record: &NewBattleRecord) -> Result<()> {
        if record.hero1_id == record.hero2_id {
            return Err(RepositoryError::SameCombatant(record.hero1_id));
        }
        self.require(record.hero1_id)?;
        self.require(record.hero2_id)?;
        Ok(())
    }

    fn append(&mut self, record: NewBattleRecord, now: DateTime<Utc>) -> BattleRecord {
        let id = self.next_battle_id;
        self.next_battle_id = id.next();
        let record = record.into_record(id, now);
        self.battles.push(record.clone());
        record
    }

    pub fn insert_battle_record(
        &mut self,
        record: NewBattleRecord,
        now: DateTime<Utc>,
    ) -> Result<BattleRecord> {
        self.check_participants(&record)?;
        Ok(self.append(record, now))
    }

    pub fn apply_delta(&mut self, id: CombatantId, delta: &StatsDelta) -> Result<()> {
        let combatant = self
            .combatants
            .get_mut(&id)
            .ok_or(RepositoryError::CombatantNotFound(id))?;
        combatant.apply(delta);
        Ok(())
    }

    pub fn commit(&mut self, commit: BattleCommit, now: DateTime<Utc>) -> Result<BattleRecord> {
        self.check_participants(&commit.record)?;
        for (id, _) in &commit.deltas {
            if !commit.record.involves(*id) {
                return Err(RepositoryError::ForeignDelta(*id));
            }
        }

        let record = self.append(commit.record, now);
        for (id, delta) in &commit.deltas {
            // Participants were checked above.
            self.apply_delta(*id, delta)?;
        }
        Ok(record)
    }

    fn ranked(&self) -> Vec<&Combatant> {
        let mut ranked: Vec<&Combatant> = self.combatants.values().collect();
        ranked.sort_by(|a, b| compare_rank(a, b));
        ranked
    }

    pub fn top_ranked(&self, limit: usize) -> Vec<RankingEntry> {
        self.ranked()
            .into_iter()
            .take(limit)
            .map(Combatant::ranking_entry)
            .collect()
    }

    pub fn list_combatants(&self) -> Vec<Combatant> {
        self.ranked().into_iter().cloned().collect()
    }

    fn name_of(&self, id: CombatantId) -> String {
        self.combatants
            .get(&id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn recent_battles(&self, limit: usize) -> Vec<BattleSummary> {
        self.battles
            .iter()
            .rev()
            .take(limit)
            .map(|battle| BattleSummary {
                id: battle.id,
                rounds: battle.rounds,
                created_at: battle.created_at,
                hero1_name: self.name_of(battle.hero1_id),
                hero2_name: self.name_of(battle.hero2_id),
                winner_name: battle.winner_id.map(|id| self.name_of(id)),
                hero1_damage_dealt: battle.hero1_damage_dealt,
                hero2_damage_dealt: battle.hero2_damage_dealt,
            })
            .collect()
    }

    pub fn totals(&self) -> ArenaTotals {
        let most_victorious = self
            .combatants
            .values()
            .filter(|c| c.wins > 0)
            .max_by(|a, b| a.wins.cmp(&b.wins).then_with(|| b.id.cmp(&a.id)))
            .map(|c| MostVictorious {
                name: c.name.clone(),
                wins: c.wins,
            });

        ArenaTotals {
            total_combatants: self.combatants.len(),
            total_battles: self.battles.len(),
            most_victorious,
        }
    }

    /// Enrols specs whose names are not present yet; returns the new entries.
    pub fn seed(&mut self, roster: Vec<CombatantSpec>) -> Vec<Combatant> {
        let mut created = Vec::new();
        for spec in roster {
            if self.combatants.values().any(|c| c.name == spec.name) {
                continue;
            }
            let id = self.next_combatant_id;
            self.next_combatant_id = CombatantId(id.0 + 1);
            let combatant = Combatant::from_spec(id, spec);
            self.combatants.insert(id, combatant.clone());
            created.push(combatant);
        }
        created
    }
}
