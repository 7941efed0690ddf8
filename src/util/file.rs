use std::fs::File;
use std::io::{Error, ErrorKind, Result};
use std::path::Path;

pub fn sanity_check<P: AsRef<Path>>(path: P) -> Result<(u64, String)> {
    let metadata = std::fs::metadata(&path)?;
    let file_name = metadata
        .is_file()
        .then_some(path.as_ref().file_name())
        .flatten()
        .ok_or(Error::new(
            ErrorKind::IsADirectory,
            "A normal file is expected.",
        ))?
        .to_string_lossy()
        .into_owned();

    Ok((metadata.len(), file_name))
}

pub fn open_checked<P: AsRef<Path>>(path: P) -> Result<(File, u64, String)> {
    let (length, file_name) = sanity_check(&path)?;
    Ok((File::open(path)?, length, file_name))
}
