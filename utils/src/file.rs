use std::fs::OpenOptions;
use std::path::Path;

/// Path of the database file behind a `sqlite:` url, if it names one.
fn sqlite_file(db_url: &str) -> Option<&str> {
    let rest = db_url.strip_prefix("sqlite:")?;
    let rest = rest.trim_start_matches("//");
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(':') {
        // `sqlite::memory:` and friends
        return None;
    }
    Some(path)
}

/// SQLite refuses to open a missing file unless `mode=rwc` is given, so make
/// sure it exists before connecting. Other backends are left alone.
pub fn create_dev_db(db_url: &str) {
    let Some(path) = sqlite_file(db_url) else {
        return;
    };
    if Path::new(path).exists() {
        return;
    }
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(_) => tracing::info!("created sqlite database file {}", path),
        Err(e) => tracing::warn!("could not create sqlite database file {}: {}", path, e),
    }
}
