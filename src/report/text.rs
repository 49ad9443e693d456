//! Plain-text assignment list a player can paste into game chat

use crate::core::types::Character;

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Who `character` reinforces, one numbered line per target
pub fn assignment_text(character: &Character, roster: &[Character]) -> String {
    let mut lines = vec![format!("Player {} reinforces (Player, Power):", character.name)];

    if character.reinforce.is_empty() {
        lines.push("No assignments.".to_string());
    }

    for (n, edge) in character.reinforce.iter().enumerate() {
        let line = match roster.iter().find(|c| c.id == edge.target_id) {
            Some(target) => format!(
                "{}. {}: {}",
                n + 1,
                target.name,
                group_thousands(target.power_level)
            ),
            None => format!("{}. Unknown", n + 1),
        };
        lines.push(line);
    }

    lines.join("\n")
}
