/*
 * Responsibility
 * - prefix と相対 path を結合して auth 配下の URL を作る
 * - 区切り文字の重複除去、"." / ".." の字句的解決 (escape はしない)
 */

/// Join path elements, ignoring empty ones, then clean the result.
///
/// Returns an empty string when every element is empty.
pub fn join(elems: &[&str]) -> String {
    let parts: Vec<&str> = elems.iter().copied().filter(|e| !e.is_empty()).collect();
    if parts.is_empty() {
        return String::new();
    }
    clean(&parts.join("/"))
}

/// Lexically normalize a slash-separated path.
///
/// - repeated separators collapse into one
/// - `.` elements are dropped
/// - `..` removes the previous element (and is dropped at the root)
/// - no trailing slash, except for the root itself
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();

    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                if out.last().is_some_and(|last| *last != "..") {
                    out.pop();
                } else if !rooted {
                    out.push("..");
                }
            }
            s => out.push(s),
        }
    }

    let joined = out.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
