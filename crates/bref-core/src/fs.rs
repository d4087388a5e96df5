//! Recursive project copy used to populate the build output directory.
//!
//! Symlinks are dereferenced: the target content is copied as real files,
//! never the link itself, so the output directory is self-contained.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Copy every top-level entry of `src` into `dst`, including hidden files,
/// skipping entries whose name appears in `exclude`.
pub fn copy_project(src: &Path, dst: &Path, exclude: &[&str]) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let name = entry.file_name();
        if exclude.iter().any(|e| name == OsStr::new(e)) {
            continue;
        }
        copy_entry(&entry.path(), &dst.join(&name))?;
    }
    Ok(())
}

fn copy_entry(src: &Path, dst: &Path) -> std::io::Result<()> {
    // metadata() follows symlinks, so a link to a directory mirrors the
    // directory and a link to a file copies the file content.
    let meta = fs::metadata(src)?;
    if meta.is_dir() {
        fs::create_dir_all(dst)?;
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            copy_entry(&entry.path(), &dst.join(entry.file_name()))?;
        }
    } else {
        fs::copy(src, dst)?;
    }
    Ok(())
}
