//! Chronological battle log.
//!
//! The engine records structured entries; [`BattleLog::render`] turns them into
//! the human-readable text stored on the battle record.

use std::fmt;

use crate::state::CombatantId;

const RULE_WIDTH: usize = 50;

/// A single attack as seen by a spectator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackEntry {
    pub round: u32,
    pub attacker: CombatantId,
    pub attacker_name: String,
    pub damage: u32,
    /// Defender HP after the hit, clamped at zero.
    pub defender_hp: u32,
    /// True for the second attack of a round.
    pub counter: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogEntry {
    Header { hero1: String, hero2: String },
    Round(u32),
    Attack(AttackEntry),
    /// `None` for a draw.
    Verdict { winner: Option<String> },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    entries: Vec<LogEntry>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Every attack in the order it happened.
    pub fn attacks(&self) -> impl Iterator<Item = &AttackEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            LogEntry::Attack(attack) => Some(attack),
            _ => None,
        })
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BattleLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let mut first = true;
        for entry in &self.entries {
            if !first {
                writeln!(f)?;
            }
            first = false;

            match entry {
                LogEntry::Header { hero1, hero2 } => {
                    write!(f, "⚔️ {hero1} VS {hero2}\n{rule}")?;
                }
                LogEntry::Round(round) => write!(f, "\nRound {round}:")?,
                LogEntry::Attack(attack) => {
                    let verb = if attack.counter {
                        "counter-attacks"
                    } else {
                        "attacks"
                    };
                    write!(
                        f,
                        "  {} {verb}! Damage: {} (HP: {})",
                        attack.attacker_name, attack.damage, attack.defender_hp
                    )?;
                }
                LogEntry::Verdict { winner } => {
                    write!(f, "\n{rule}\n")?;
                    match winner {
                        Some(name) => write!(f, "🏆 WINNER: {name}!")?,
                        None => write!(f, "🤝 DRAW!")?,
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let mut log = BattleLog::new();
        log.push(LogEntry::Header {
            hero1: "Aria".into(),
            hero2: "Brom".into(),
        });
        log.push(LogEntry::Round(1));
        log.push(LogEntry::Attack(AttackEntry {
            round: 1,
            attacker: CombatantId(1),
            attacker_name: "Aria".into(),
            damage: 35,
            defender_hp: 0,
            counter: false,
        }));
        log.push(LogEntry::Verdict {
            winner: Some("Aria".into()),
        });

        let rule = "=".repeat(50);
        let expected = format!(
            "⚔️ Aria VS Brom\n{rule}\n\nRound 1:\n  Aria attacks! Damage: 35 (HP: 0)\n\n{rule}\n🏆 WINNER: Aria!"
        );
        assert_eq!(log.render(), expected);
        assert_eq!(log.attacks().count(), 1);
    }

    #[test]
    fn test_render_draw() {
        let mut log = BattleLog::new();
        log.push(LogEntry::Verdict { winner: None });
        assert!(log.render().ends_with("🤝 DRAW!"));
    }
}
