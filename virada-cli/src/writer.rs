use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("impossible d'écrire le rapport {path:?} : {source}")]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Écrit le rapport via un fichier temporaire puis un rename : une
/// interruption en cours d'écriture ne corrompt jamais un rapport déjà
/// présent. Les répertoires parents sont créés au besoin.
pub fn write_report(path: &Path, contents: &str) -> Result<(), WriteError> {
    let wrap = |source: std::io::Error| WriteError {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(wrap)?;
            parent
        }
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(wrap)?;
    tmp.write_all(contents.as_bytes()).map_err(wrap)?;
    tmp.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rapport.txt");
        let contents = "MEGA-SENA\n======\nDezena  7 :      3.00\n";

        write_report(&path, contents).unwrap();

        let read_back = std::fs::read_to_string(&path).unwrap();
        assert_eq!(read_back, contents);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sortie").join("2025").join("rapport.txt");

        write_report(&path, "contenu").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rapport.txt");

        write_report(&path, "ancien").unwrap();
        write_report(&path, "nouveau").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "nouveau");
    }

    #[test]
    fn test_write_failure_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        // Un répertoire existant au nom du fichier cible fait échouer le rename
        let path = dir.path().join("rapport.txt");
        std::fs::create_dir(&path).unwrap();

        let err = write_report(&path, "contenu").unwrap_err();
        assert_eq!(err.path, path);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rapport.txt");

        write_report(&path, "contenu").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
