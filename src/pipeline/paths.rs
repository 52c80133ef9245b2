//! Output path conventions.

use crate::constants::{OUTPUT_SUFFIX, PREVIEW_SUFFIX};
use crate::error::{Error, Result};
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// Input path with its extension stripped, relative to the output directory.
///
/// Relative inputs keep their directory components so `clips/a.mp4` and
/// `talks/a.mp4` do not collide. `.` and `..` are dropped so the result
/// never leaves the output directory. Absolute inputs keep only the file
/// name.
fn relative_stem(input: &Path) -> (PathBuf, Cow<'_, str>) {
    let parent = if input.is_absolute() {
        PathBuf::new()
    } else {
        input
            .parent()
            .map(|p| {
                p.components()
                    .filter(|c| matches!(c, Component::Normal(_)))
                    .collect()
            })
            .unwrap_or_default()
    };

    let stem = input.file_stem().map_or_else(
        || Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    );

    (parent, stem)
}

/// Path of the trimmed video for `input`.
#[must_use]
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let (parent, stem) = relative_stem(input);
    output_dir.join(parent).join(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// Path of the preview plot for `input`.
#[must_use]
pub fn preview_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let (parent, stem) = relative_stem(input);
    output_dir.join(parent).join(format!("{stem}{PREVIEW_SUFFIX}"))
}

/// Make sure `output` may be written: refuse to clobber an existing file
/// unless `force` is set, and create its parent directory.
pub fn prepare_output(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        return Err(Error::OutputExists {
            path: output.to_path_buf(),
        });
    }

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    Ok(())
}
