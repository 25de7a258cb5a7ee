use serde::Serialize;

/// Text removed from every file's content and, where present, its name.
///
/// Changing it requires a rebuild.
pub const TARGET_SUBSTRING: &str = "DRAFT";

/// Built-in settings for a sanitize run.
#[derive(Debug, Clone, Serialize)]
pub struct Defaults {
    pub target: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            target: default_target(),
        }
    }
}

fn default_target() -> String {
    TARGET_SUBSTRING.to_string()
}

pub fn load_defaults() -> Defaults {
    Defaults::default()
}
