use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read a UTF-8 file of at most `limit` bytes.
///
/// The cap is enforced on the bytes actually read, so a file that grows
/// between open and read cannot slip past it.
pub(crate) fn read_bounded(path: &Path, limit: u64) -> io::Result<String> {
    let mut content = String::new();
    File::open(path)?
        .take(limit + 1)
        .read_to_string(&mut content)?;

    if content.len() as u64 > limit {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("file exceeds {limit} byte limit"),
        ));
    }
    Ok(content)
}
