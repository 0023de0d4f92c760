use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Find CSV files in a directory. If recursive is true, use walkdir; otherwise list files.
pub fn find_csv_files(dir: &PathBuf, recursive: bool) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut csv_files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            let path = entry.path();
            if crate::parser::filter::is_csv_file(path) {
                csv_files.push(path.to_path_buf());
            }
        }
    } else {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if crate::parser::filter::is_csv_file(&path) {
                csv_files.push(path);
            }
        }
    }

    csv_files.sort();
    Ok(csv_files)
}
