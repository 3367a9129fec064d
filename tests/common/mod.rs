#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Fresh document root under the system temp dir, unique per test.
pub fn temp_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "plainserve-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(&root).unwrap();
    root
}

pub fn write_file(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
