//! Display text cleanup
//!
//! Engine strings carry inline markup (`<IC_ITEM>` icon tags, `<color=#ff0000>`
//! spans) and hard line breaks sized for the on-screen window. Neither is useful
//! to a listener.

/// Strip `<...>` markup tokens and collapse whitespace
pub fn strip_markup(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '<' => depth += 1,
            '>' if depth > 0 => depth -= 1,
            _ if depth > 0 => {}
            _ => cleaned.push(c),
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build `"Name: Description"`, or just `"Name"` when there is no description.
/// Returns `None` for an empty slot.
pub fn format_entry(name: &str, description: &str) -> Option<String> {
    let name = strip_markup(name);
    if name.is_empty() {
        return None;
    }
    let description = strip_markup(description);
    if description.is_empty() {
        Some(name)
    } else {
        Some(format!("{}: {}", name, description))
    }
}

/// `"Name, 120/300 HP"`
pub fn format_hp(name: &str, hp: i32, max_hp: i32) -> String {
    format!("{}, {}/{} HP", name, hp, max_hp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup_removes_tags() {
        assert_eq!(strip_markup("<IC_ITEM>Potion"), "Potion");
        assert_eq!(
            strip_markup("Restores <color=#ff0000>HP</color>\nto one ally"),
            "Restores HP to one ally"
        );
        assert_eq!(strip_markup("  <IC_ITEM>  "), "");
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(
            format_entry("Potion", "Restores 100 HP").as_deref(),
            Some("Potion: Restores 100 HP")
        );
        assert_eq!(format_entry("Tent", "").as_deref(), Some("Tent"));
        assert_eq!(format_entry("<IC_ITEM>", "Orphan description"), None);
        assert_eq!(format_entry("", ""), None);
    }
}
