//! Canonical paths for skoolify data.
//!
//! Single source of truth - import this instead of hardcoding paths.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use skoolify::config::paths;
//!
//! let notes = paths::collection_file(&store, ContentKind::Note.storage_key());
//! ```

use std::path::{Path, PathBuf};

/// Directory name searched for in the current directory and its parents
pub const CONFIG_DIR: &str = ".skoolify";

/// Config file name inside `CONFIG_DIR`
pub const CONFIG_FILE: &str = "config.yaml";

/// Storage key of the research conversation
pub const RESEARCH_CHAT_KEY: &str = "skoolify_research_chat";

/// File backing a storage key inside a store directory
pub fn collection_file(store: &Path, key: &str) -> PathBuf {
    store.join(format!("{}.json", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_file() {
        let path = collection_file(Path::new("/data/store"), RESEARCH_CHAT_KEY);
        assert_eq!(
            path,
            PathBuf::from("/data/store/skoolify_research_chat.json")
        );
    }

    #[test]
    fn test_config_location_names() {
        assert_eq!(CONFIG_DIR, ".skoolify");
        assert!(CONFIG_FILE.ends_with(".yaml"));
    }
}
