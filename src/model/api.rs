use once_cell::sync::Lazy;
use regex::Regex;

//language=RegExp
static BANNED_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/\\<>|:&;#?*]").unwrap());

/// returns a sanitized copy of a client-supplied entry name, or `None` if the
/// name is empty or is a path-traversal attempt. Extensions and inner dots are
/// kept as-is since file names routinely carry them
pub fn entry_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("..") || trimmed.contains("./") {
        return None;
    }
    let cleaned = BANNED_CHARS.replace_all(trimmed, "").to_string();
    if cleaned.is_empty() {
        return None;
    }
    Some(cleaned)
}

#[cfg(test)]
mod entry_name_tests {
    use super::entry_name;

    #[test]
    fn keeps_ordinary_file_names() {
        assert_eq!(Some("chapter 1.docx".to_string()), entry_name("chapter 1.docx"));
        assert_eq!(Some(".gitignore".to_string()), entry_name(".gitignore"));
    }

    #[test]
    fn rejects_empty_and_whitespace_names() {
        assert_eq!(None, entry_name(""));
        assert_eq!(None, entry_name("   "));
    }

    #[test]
    fn rejects_traversal_attempts() {
        assert_eq!(None, entry_name("../secrets.txt"));
        assert_eq!(None, entry_name("./nested/name.txt"));
    }

    #[test]
    fn strips_banned_characters() {
        assert_eq!(Some("notes.md".to_string()), entry_name("no<te>s.md"));
        assert_eq!(None, entry_name("///"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(Some("cover.png".to_string()), entry_name("  cover.png  "));
    }
}
