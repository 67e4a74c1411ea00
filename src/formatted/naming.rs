use std::sync::Arc;

pub const DEFAULT_SUFFIX: &str = "Formatted";

/// Maps an inflected column name to the formatted field's name
pub type NameFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

pub fn suffix_name_fn(suffix: impl Into<String>) -> NameFn {
    let suffix = suffix.into();
    Arc::new(move |name: &str| format!("{}{}", name, suffix))
}

pub fn default_name_fn() -> NameFn {
    suffix_name_fn(DEFAULT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_suffix() {
        let name_fn = default_name_fn();
        assert_eq!(name_fn("createdAt"), "createdAtFormatted");
    }

    #[test]
    fn test_custom_suffix() {
        let name_fn = suffix_name_fn("Text");
        assert_eq!(name_fn("updatedAt"), "updatedAtText");
        assert_eq!(name_fn("updatedAt"), name_fn("updatedAt"));
    }
}
