use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Writes an orders CSV with one row per username.
pub fn orders_csv(usernames: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "username")?;
    for username in usernames {
        writeln!(file, "{}", username)?;
    }
    file.flush()?;
    Ok(file)
}
