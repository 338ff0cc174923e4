//! Natural break search.

/// Find the least disruptive place to cut `text` within `search_start..=search_end`.
///
/// Searches backward from `search_end`, trying in order:
/// 1. a paragraph break (`"\n\n"`)
/// 2. a line break
/// 3. a sentence terminator (`.`, `?`, `!`)
///
/// and returns the byte offset just past the first match. With no match the
/// (clamped) `search_end` is returned, a hard cut.
///
/// Offsets are byte offsets. Every offset returned after a match follows an
/// ASCII byte and is therefore a char boundary; the fallback is a boundary
/// whenever `search_end` is.
///
/// # Examples
///
/// ```
/// use scenecut_segment::find_break;
///
/// let text = "One. Two.\n\nThree four. Five";
/// assert_eq!(find_break(text, 0, text.len()), 11);
/// assert_eq!(find_break(text, 12, text.len()), 22);
/// assert_eq!(find_break("no breaks here", 0, 8), 8);
/// ```
pub fn find_break(text: &str, search_start: usize, search_end: usize) -> usize {
    let bytes = text.as_bytes();
    let end = search_end.min(bytes.len());
    let start = search_start.min(end).max(1);

    if let Some(i) = (start.max(2)..=end)
        .rev()
        .find(|&i| &bytes[i - 2..i] == b"\n\n")
    {
        return i;
    }

    if let Some(i) = (start..=end).rev().find(|&i| bytes[i - 1] == b'\n') {
        return i;
    }

    if let Some(i) = (start..=end)
        .rev()
        .find(|&i| matches!(bytes[i - 1], b'.' | b'?' | b'!'))
    {
        return i;
    }

    end
}

/// Largest char boundary at or below `index`.
pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    (0..=index)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0)
}
