//! Capability-scoped file access for isowalk artefacts.
//!
//! Paths arrive as ambient UTF-8 paths from the command line or a library
//! caller. Each helper resolves the nearest ambient directory once and does
//! all further work relative to that handle via `cap-std`.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use std::io;
use std::path::Component;

/// Read a UTF-8 text file, such as a JSON list of points of interest.
///
/// # Errors
///
/// Propagates any I/O error, including invalid UTF-8 content.
pub fn read_text(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_parent(path)?;
    dir.read_to_string(name)
}

/// Write `bytes` to `path`, creating missing parent directories first.
///
/// An existing file at `path` is replaced.
///
/// # Errors
///
/// Propagates any I/O error; fails when `path` has no file name.
pub fn write_bytes(path: &Utf8Path, bytes: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent(path)?;
    dir.write(name, bytes)
}

/// Create the parent directory chain of `path` if it does not exist.
///
/// # Errors
///
/// Propagates any I/O error from opening the base directory or creating
/// the chain.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) else {
        return Ok(());
    };
    let (base, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(relative)
}

/// Open the directory holding `path` and return it with the bare file name.
fn open_parent(path: &Utf8Path) -> io::Result<(Dir, &str)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?;
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split a directory path into an opened anchor directory and the remaining
/// relative components.
///
/// Absolute paths anchor at their root (or drive prefix on Windows);
/// relative paths anchor at the current directory.
fn split_anchor(path: &Utf8Path) -> io::Result<(Dir, Utf8PathBuf)> {
    let anchor: Utf8PathBuf = path
        .as_std_path()
        .components()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<String>()
        .into();
    let (anchor, relative) = if anchor.as_str().is_empty() {
        (Utf8PathBuf::from("."), path.to_path_buf())
    } else {
        let relative = path
            .strip_prefix(&anchor)
            .map_err(|_| io::Error::other(format!("cannot strip {anchor} from {path}")))?
            .to_path_buf();
        (anchor, relative)
    };
    let dir = Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((dir, relative))
}
