//! Lint: detect key-hint text (`[x]`) rendered without click registration.
//!
//! Any `[x]`-style hint shown in a `render.rs` must be registered as a tap
//! target via `push_clickable()`. A plain `cl.push(...)` renders the hint
//! but leaves it dead on touch screens.
//!
//! Scans every `render.rs` under `src/` and flags `push(` calls whose
//! arguments contain a key-hint pattern on the same line.

use std::fs;
use std::path::Path;

/// Whether a line contains a key-hint pattern like `[r]`, `[Y]` or `[1]`.
fn contains_key_hint(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 3 {
        return false;
    }
    for i in 0..bytes.len() - 2 {
        if bytes[i] == b'[' && bytes[i + 2] == b']' {
            let ch = bytes[i + 1];
            if ch.is_ascii_alphanumeric() || b"-=!~".contains(&ch) {
                return true;
            }
        }
    }
    false
}

fn find_key_hint_in_push(source: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            continue;
        }
        if !contains_key_hint(line) {
            continue;
        }

        let has_push = line.contains(".push(");
        let has_clickable = line.contains("push_clickable(");
        if has_push && !has_clickable {
            violations.push((idx + 1, trimmed.to_string()));
        }
    }

    violations
}

#[test]
fn no_key_hints_in_non_clickable_push() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut all_violations = Vec::new();
    let mut scanned = 0;

    visit_render_files(&src_dir, &mut all_violations, &mut scanned);
    assert!(scanned > 0, "no render.rs found under src/");

    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Found key-hint text [x] in non-clickable push() calls.\n\
             Register these with push_clickable() so taps reach them.\n\n",
        );
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>, scanned: &mut usize) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations, scanned);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            *scanned += 1;
            let display_path = path.display().to_string();
            for (line_num, line) in find_key_hint_in_push(&source) {
                violations.push((display_path.clone(), line_num, line));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_key_hint_in_push() {
        let source = r#"cl.push(Line::from(" [r] Reset progress"));"#;
        assert_eq!(find_key_hint_in_push(source).len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from(" [r] Reset progress"), REQUEST_RESET);"#;
        assert!(find_key_hint_in_push(source).is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = r#"// cl.push(Line::from(" [y] Yes"));"#;
        assert!(find_key_hint_in_push(source).is_empty());
    }

    #[test]
    fn ignores_plain_push_without_hint() {
        let source = r#"cl.push(Line::from(" Player  Yogini"));"#;
        assert!(find_key_hint_in_push(source).is_empty());
    }

    #[test]
    fn key_hint_detection() {
        assert!(contains_key_hint("[a]"));
        assert!(contains_key_hint("[Y]"));
        assert!(contains_key_hint("[1]"));
        assert!(contains_key_hint("[-]"));
        assert!(!contains_key_hint("[]"));
        assert!(!contains_key_hint("[ab]"));
        assert!(!contains_key_hint("abc"));
    }
}
