//! High-level scene file loading.

use std::path::Path;

use thiserror::Error;

use crate::format::parser::{parse_scene, ParseError};
use crate::scene::Scene;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file and name the scene after the file stem.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let mut scene = parse_scene(&content)?;
    scene.name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed")
        .to_string();

    log::info!(
        "Loaded scene {}: {} models, {} faces, {} lights",
        scene.name,
        scene.model_count(),
        scene.face_count(),
        scene.light_count()
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_scene_from_file() {
        let path = std::env::temp_dir().join(format!("lumen_loader_{}.txt", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "WORLD").unwrap();
            writeln!(file, "LIGHT").unwrap();
            writeln!(file, "[0.0,5.0,0.0],[1.0,1.0,1.0],10.0;").unwrap();
            writeln!(file, "END_LIGHT").unwrap();
            writeln!(file, "END_WORLD").unwrap();
        }

        let scene = load_scene(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(scene.name.starts_with("lumen_loader_"));
        assert_eq!(scene.light_count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_scene("no/such/scene.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_load_error_wraps_parse_error() {
        let err: LoadError = ParseError::UnexpectedEof { expected: "WORLD" }.into();
        assert_eq!(err.to_string(), "Unexpected end of file, expected WORLD");
    }
}
