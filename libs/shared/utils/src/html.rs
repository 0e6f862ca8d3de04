/// Escapes text for use in HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Joins CSS class names, skipping the ones whose flag is off.
pub fn class_list(base: &str, modifiers: &[(&str, bool)]) -> String {
    let mut classes = base.to_string();
    for (name, enabled) in modifiers {
        if *enabled {
            classes.push(' ');
            classes.push_str(name);
        }
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("Dr. O'Neil <Cardiology> & \"Co\""), "Dr. O&#39;Neil &lt;Cardiology&gt; &amp; &quot;Co&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_class_list() {
        assert_eq!(class_list("calendar-day", &[("today", true), ("past", false), ("selected", true)]), "calendar-day today selected");
        assert_eq!(class_list("time-slot", &[]), "time-slot");
    }
}
