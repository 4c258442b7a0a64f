use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use http_outcome::RequestOptions;
use temp_dir::TempDir;

pub fn write_test_file<S: AsRef<str>>(
    workdir: &TempDir,
    filename: S,
    content: S,
) -> Result<PathBuf> {
    let file = workdir.child(filename.as_ref());
    std::fs::write(&file, content.as_ref().as_bytes())?;
    Ok(file)
}

/// Freezes freshly built options so several outcomes can share them.
pub fn shared_options(options: Result<RequestOptions>) -> Arc<RequestOptions> {
    Arc::new(options.expect("valid request options"))
}
