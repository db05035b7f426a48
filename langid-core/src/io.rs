use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Lists all regular files directly contained in `dir`.
///
/// Returns full paths sorted by name so that loading order does not depend
/// on the file system. Subdirectories are ignored.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lists_files_sorted_without_directories() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("b.lm"), b"").unwrap();
		fs::write(dir.path().join("a"), b"").unwrap();
		fs::create_dir(dir.path().join("c")).unwrap();

		let files = list_files(dir.path()).unwrap();
		assert_eq!(files, vec![dir.path().join("a"), dir.path().join("b.lm")]);
	}

	#[test]
	fn missing_directory_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		assert!(list_files(dir.path().join("missing")).is_err());
	}
}
