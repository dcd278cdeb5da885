//! Round-based battle simulation.
//!
//! # Turn order
//!
//! Each round the first combatant attacks, then the second counter-attacks. A
//! defender felled by the first blow never retaliates, so in a perfectly even
//! matchup the first combatant wins.
//!
//! # Termination
//!
//! The loop ends when either HP reaches zero or the round cap is hit. The
//! verdict then compares remaining HP: strictly more wins, equal is a draw. The
//! cap alone never forces a draw.

use super::damage::{apply_damage, calculate_damage};
use super::jitter::JitterSource;
use super::log::{AttackEntry, BattleLog, LogEntry};
use crate::config::BattleRules;
use crate::state::{Combatant, CombatantId, StatsDelta};

/// Result of a simulated battle. Carries no side effects.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleOutcome {
    pub hero1_id: CombatantId,
    pub hero2_id: CombatantId,
    /// `None` for a draw.
    pub winner_id: Option<CombatantId>,
    pub hero1_damage: u64,
    pub hero2_damage: u64,
    pub rounds: u32,
    pub hero1_remaining_hp: i64,
    pub hero2_remaining_hp: i64,
    pub log: BattleLog,
}

/// Tagged verdict, dispatched once to the stat update routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Win {
        winner: CombatantId,
        loser: CombatantId,
    },
    Draw {
        first: CombatantId,
        second: CombatantId,
    },
}

impl Verdict {
    pub fn participants(&self) -> [CombatantId; 2] {
        match *self {
            Self::Win { winner, loser } => [winner, loser],
            Self::Draw { first, second } => [first, second],
        }
    }
}

impl BattleOutcome {
    pub fn verdict(&self) -> Verdict {
        match self.winner_id {
            Some(winner) if winner == self.hero1_id => Verdict::Win {
                winner,
                loser: self.hero2_id,
            },
            Some(winner) => Verdict::Win {
                winner,
                loser: self.hero1_id,
            },
            None => Verdict::Draw {
                first: self.hero1_id,
                second: self.hero2_id,
            },
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner_id.is_none()
    }

    /// Damage dealt and received by `id` in this battle.
    fn damage_of(&self, id: CombatantId) -> (u64, u64) {
        if id == self.hero1_id {
            (self.hero1_damage, self.hero2_damage)
        } else {
            (self.hero2_damage, self.hero1_damage)
        }
    }

    /// Per-participant increments. Exactly one outcome counter per combatant.
    pub fn stat_deltas(&self) -> [(CombatantId, StatsDelta); 2] {
        match self.verdict() {
            Verdict::Win { winner, loser } => {
                let (dealt, received) = self.damage_of(winner);
                [
                    (winner, StatsDelta::win(dealt, received)),
                    (loser, StatsDelta::loss(received, dealt)),
                ]
            }
            Verdict::Draw { first, second } => {
                [(first, StatsDelta::draw()), (second, StatsDelta::draw())]
            }
        }
    }
}

/// Running state of one side during the simulation.
struct Side<'a> {
    combatant: &'a Combatant,
    hp: i64,
    damage_dealt: u64,
}

impl<'a> Side<'a> {
    fn new(combatant: &'a Combatant) -> Self {
        Self {
            combatant,
            hp: i64::from(combatant.health_points),
            damage_dealt: 0,
        }
    }

    fn alive(&self) -> bool {
        self.hp > 0
    }
}

/// One attack from `attacker` onto `defender`, logged.
fn strike(
    attacker: &mut Side<'_>,
    defender: &mut Side<'_>,
    round: u32,
    counter: bool,
    rules: &BattleRules,
    jitter: &mut impl JitterSource,
    log: &mut BattleLog,
) {
    let roll = jitter.roll(rules.jitter_min, rules.jitter_max);
    let damage = calculate_damage(
        attacker.combatant.attack_power,
        defender.combatant.defense_power,
        roll,
        rules,
    );
    defender.hp = apply_damage(defender.hp, damage);
    attacker.damage_dealt += u64::from(damage);

    log.push(LogEntry::Attack(AttackEntry {
        round,
        attacker: attacker.combatant.id,
        attacker_name: attacker.combatant.name.clone(),
        damage,
        defender_hp: u32::try_from(defender.hp.max(0)).unwrap_or(u32::MAX),
        counter,
    }));
}

/// Simulate a battle between `hero1` (attacks first) and `hero2`.
///
/// Both combatants must have positive `health_points`; rejecting those that
/// don't is the caller's job.
pub fn simulate(
    hero1: &Combatant,
    hero2: &Combatant,
    rules: &BattleRules,
    jitter: &mut impl JitterSource,
) -> BattleOutcome {
    debug_assert!(hero1.can_fight() && hero2.can_fight());

    let mut first = Side::new(hero1);
    let mut second = Side::new(hero2);
    let mut log = BattleLog::new();
    let mut rounds = 0;

    log.push(LogEntry::Header {
        hero1: hero1.name.clone(),
        hero2: hero2.name.clone(),
    });

    while first.alive() && second.alive() && rounds < rules.max_rounds {
        rounds += 1;
        log.push(LogEntry::Round(rounds));

        strike(&mut first, &mut second, rounds, false, rules, jitter, &mut log);
        if !second.alive() {
            break;
        }
        strike(&mut second, &mut first, rounds, true, rules, jitter, &mut log);
    }

    let winner = match first.hp.cmp(&second.hp) {
        std::cmp::Ordering::Greater => Some(hero1),
        std::cmp::Ordering::Less => Some(hero2),
        std::cmp::Ordering::Equal => None,
    };

    log.push(LogEntry::Verdict {
        winner: winner.map(|w| w.name.clone()),
    });

    BattleOutcome {
        hero1_id: hero1.id,
        hero2_id: hero2.id,
        winner_id: winner.map(|w| w.id),
        hero1_damage: first.damage_dealt,
        hero2_damage: second.damage_dealt,
        rounds,
        hero1_remaining_hp: first.hp,
        hero2_remaining_hp: second.hp,
        log,
    }
}
