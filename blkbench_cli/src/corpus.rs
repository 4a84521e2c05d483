use std::fs;
use std::path::{Path, PathBuf};

use blkbench_core::{BenchError, Result};

/// Default cap on files taken from one corpus directory.
pub const DEFAULT_MAX_FILES: usize = 1024;

/// List the regular files directly inside `dir`, sorted by path.
///
/// Subdirectories and other non-regular entries are skipped. More than
/// `max_files` regular files is a resource error rather than a silent
/// truncation, so a report always covers the whole corpus.
pub fn scan(dir: &Path, max_files: usize) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(dir).map_err(|e| BenchError::io(dir, e))?;
    if !meta.is_dir() {
        return Err(BenchError::config(format!("{} is not a directory", dir.display())));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| BenchError::io(dir, e))? {
        let entry = entry.map_err(|e| BenchError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| BenchError::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }
        if files.len() == max_files {
            return Err(BenchError::exhausted(
                "corpus files",
                format!("{} holds more than {max_files} regular files", dir.display()),
            ));
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_regular_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), b"bb").unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), b"c").unwrap();

        let files = scan(dir.path(), DEFAULT_MAX_FILES).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn file_limit_is_enforced() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..3 {
            fs::write(dir.path().join(format!("{i}.bin")), [i as u8]).unwrap();
        }
        assert!(scan(dir.path(), 3).is_ok());
        let err = scan(dir.path(), 2).unwrap_err();
        assert!(matches!(err, BenchError::ResourceExhaustion { .. }));
    }

    #[test]
    fn file_path_is_not_a_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("single.bin");
        fs::write(&file, b"x").unwrap();
        assert!(scan(&file, DEFAULT_MAX_FILES).unwrap_err().is_configuration());
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan(&dir.path().join("absent"), DEFAULT_MAX_FILES).unwrap_err();
        assert!(matches!(err, BenchError::Io { .. }));
    }
}
