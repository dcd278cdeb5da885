//! Roster loading from RON.
//!
//! RON format: `Vec<CombatantSpec>`, one `(name: .., class: .., level: ..,
//! attack_power: .., defense_power: .., health_points: ..)` tuple per entry.

use std::path::Path;

use anyhow::{Context, Result};

use arena_core::CombatantSpec;

const BUILTIN: &str = include_str!("../assets/roster.ron");

/// The eight combatants shipped with the binary.
pub fn builtin() -> Result<Vec<CombatantSpec>> {
    parse(BUILTIN).context("Failed to parse built-in roster")
}

/// Loads a roster file.
pub fn load(path: &Path) -> Result<Vec<CombatantSpec>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster: {}", path.display()))?;
    parse(&content).with_context(|| format!("Failed to parse roster: {}", path.display()))
}

fn parse(content: &str) -> Result<Vec<CombatantSpec>> {
    let roster: Vec<CombatantSpec> = ron::from_str(content)?;
    for spec in &roster {
        spec.validate()?;
    }
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_roster_has_eight_fighters() {
        let roster = builtin().unwrap();
        assert_eq!(roster.len(), 8);
        assert!(roster.iter().all(|spec| spec.health_points > 0));
    }

    #[test]
    fn test_level_defaults_to_one() {
        let roster = parse(
            r#"[(name: "Pip", class: "Bard", attack_power: 10, defense_power: 5, health_points: 40)]"#,
        )
        .unwrap();
        assert_eq!(roster[0].level, 1);
    }

    #[test]
    fn test_invalid_entries_are_rejected() {
        let err = parse(
            r#"[(name: "", class: "Bard", attack_power: 10, defense_power: 5, health_points: 40)]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.ron");
        std::fs::write(
            &path,
            r#"[(name: "Pip", class: "Bard", level: 2, attack_power: 10, defense_power: 5, health_points: 40)]"#,
        )
        .unwrap();

        let roster = load(&path).unwrap();
        assert_eq!(roster[0].name, "Pip");
        assert!(load(&dir.path().join("missing.ron")).is_err());
    }
}
