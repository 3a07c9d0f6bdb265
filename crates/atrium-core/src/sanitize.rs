//! Free-text sanitization.

/// Trim surrounding whitespace and drop every `<` and `>`.
///
/// The result is trimmed again after removal so that a bracket sitting next
/// to whitespace cannot leave a new untrimmed edge. This keeps the function
/// idempotent.
pub fn sanitize(text: &str) -> String {
  let stripped: String = text
    .trim()
    .chars()
    .filter(|c| !matches!(c, '<' | '>'))
    .collect();
  stripped.trim().to_owned()
}
