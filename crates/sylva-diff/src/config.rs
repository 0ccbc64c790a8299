use serde::{Deserialize, Serialize};

/// Configuration for a [`Differ`](crate::Differ).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Report reordered children as `order` operations. When `false`,
    /// children are still aligned by key but moves are not reported.
    pub detect_moves: bool,
    /// Recurse into properties whose values are records on both sides.
    /// When `false`, a changed record is replaced as a whole.
    pub nested_props: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            detect_moves: true,
            nested_props: true,
        }
    }
}

impl DiffConfig {
    /// Align children by key but never emit `order` operations.
    pub fn positional() -> Self {
        Self {
            detect_moves: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_everything() {
        let config = DiffConfig::default();
        assert!(config.detect_moves);
        assert!(config.nested_props);
    }

    #[test]
    fn positional_disables_moves_only() {
        let config = DiffConfig::positional();
        assert!(!config.detect_moves);
        assert!(config.nested_props);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: DiffConfig = serde_json::from_str(r#"{"nested_props": false}"#).unwrap();
        assert!(config.detect_moves);
        assert!(!config.nested_props);
    }

    #[test]
    fn serde_roundtrip() {
        let config = DiffConfig::positional();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: DiffConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
