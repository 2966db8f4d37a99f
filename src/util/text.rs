// src/util/text.rs

/// First non-empty line of `text`, cut to at most `max_chars` characters.
///
/// Truncated output ends with `…` (counted in `max_chars`).
///
/// # Examples
///
/// ```
/// use stickynotes::util::text::summarize;
///
/// assert_eq!(summarize("\n  milk, eggs\nbread", 40), "milk, eggs");
/// assert_eq!(summarize("packing list for the beach", 8), "packing…");
/// ```
pub fn summarize(text: &str, max_chars: usize) -> String {
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = line.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
