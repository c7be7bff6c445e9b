/// Truncate `s` to at most `width` display columns, appending an ellipsis
/// when truncated so column-constrained cells never wrap.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= width {
        return s.to_string();
    }
    if width == 1 {
        return "…".to_string();
    }
    let head: String = s.chars().take(width - 1).collect();
    format!("{head}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_to_width("pods", 10), "pods");
    }

    #[test]
    fn long_strings_get_ellipsis() {
        assert_eq!(truncate_to_width("configmaps-and-secrets", 8), "configm…");
    }

    #[test]
    fn zero_width_is_empty() {
        assert_eq!(truncate_to_width("anything", 0), "");
    }
}
