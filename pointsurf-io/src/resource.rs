//! Resource directory resolution for bundled demo data

use std::path::PathBuf;

/// Environment variable overriding the resource directory
pub const RESOURCE_DIR_ENV: &str = "POINTSURF_RESOURCE_DIR";

/// Locate the `resources` directory.
///
/// Resolution order: the `POINTSURF_RESOURCE_DIR` environment variable, a
/// `resources` directory next to the running executable, then a `resources`
/// directory found by walking up from the current directory (covers
/// `cargo run` from anywhere inside the workspace). Falls back to
/// `./resources` when nothing exists yet.
pub fn resource_dir() -> PathBuf {
    resolve(std::env::var(RESOURCE_DIR_ENV).ok())
}

fn resolve(override_dir: Option<String>) -> PathBuf {
    if let Some(dir) = override_dir {
        return PathBuf::from(dir);
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join("resources");
            if candidate.is_dir() {
                return candidate;
            }
        }
    }

    if let Ok(mut dir) = std::env::current_dir() {
        loop {
            let candidate = dir.join("resources");
            if candidate.is_dir() {
                return candidate;
            }
            if !dir.pop() {
                break;
            }
        }
    }

    PathBuf::from("resources")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_takes_precedence() {
        let dir = resolve(Some("/tmp/pointsurf-res".to_string()));
        assert_eq!(dir, PathBuf::from("/tmp/pointsurf-res"));
    }

    #[test]
    fn without_override_a_resources_directory_is_picked() {
        let dir = resolve(None);
        assert_eq!(dir.file_name().unwrap(), "resources");
    }
}
