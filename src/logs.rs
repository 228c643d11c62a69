use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Finds `console.log` inside the newest `logs_*` directory. The server
/// names its log directories by timestamp, so the lexicographically largest
/// one is the current run.
pub async fn latest_console_log(log_dir: &Path) -> Option<PathBuf> {
    let mut entries = tokio::fs::read_dir(log_dir).await.ok()?;
    let mut newest: Option<PathBuf> = None;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with("logs_") {
            continue;
        }
        let path = entry.path();
        if newest.as_ref().map(|current| &path > current).unwrap_or(true) {
            newest = Some(path);
        }
    }

    let candidate = newest?.join("console.log");
    if tokio::fs::metadata(&candidate).await.is_ok() {
        Some(candidate)
    } else {
        None
    }
}

/// Reads the last `limit` lines of a log file by scanning backwards in
/// chunks, so large console logs are never loaded whole.
pub async fn read_log_tail(path: PathBuf, limit: usize) -> Result<Vec<String>, String> {
    tokio::task::spawn_blocking(move || {
        let mut file = std::fs::File::open(&path)
            .map_err(|err| format!("failed to open log file: {err}"))?;
        let mut position = file
            .metadata()
            .map_err(|err| format!("failed to read log metadata: {err}"))?
            .len();
        if position == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = Vec::new();
        let mut newline_count = 0usize;
        let chunk_size: u64 = 8192;

        while position > 0 && newline_count <= limit {
            let read_size = chunk_size.min(position);
            position -= read_size;
            file.seek(SeekFrom::Start(position))
                .map_err(|err| format!("failed to seek log file: {err}"))?;

            let mut chunk = vec![0u8; read_size as usize];
            file.read_exact(&mut chunk)
                .map_err(|err| format!("failed to read log file: {err}"))?;
            newline_count += chunk.iter().filter(|&&byte| byte == b'\n').count();
            buffer.splice(0..0, chunk);
        }

        let text = String::from_utf8_lossy(&buffer);
        let lines: Vec<&str> = text.lines().collect();
        let start = lines.len().saturating_sub(limit);
        Ok(lines[start..].iter().map(|line| (*line).to_string()).collect())
    })
    .await
    .map_err(|err| format!("failed to read log tail: {err}"))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn picks_console_log_from_newest_run_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        for (name, line) in [
            ("logs_2024-01-01_00-00-00", "old"),
            ("logs_2024-06-15_12-30-00", "new"),
        ] {
            let run = dir.path().join(name);
            std::fs::create_dir(&run).expect("mkdir");
            std::fs::write(run.join("console.log"), line).expect("write");
        }
        std::fs::create_dir(dir.path().join("crash-dumps")).expect("mkdir");

        let found = latest_console_log(dir.path()).await.expect("log path");
        assert!(found.ends_with("logs_2024-06-15_12-30-00/console.log"));
    }

    #[tokio::test]
    async fn missing_console_log_yields_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("logs_2024-01-01_00-00-00")).expect("mkdir");
        assert!(latest_console_log(dir.path()).await.is_none());
    }

    #[tokio::test]
    async fn tail_returns_the_last_lines_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("console.log");
        let contents: String = (0..50).map(|idx| format!("line-{idx}\n")).collect();
        std::fs::write(&path, contents).expect("write");

        let tail = read_log_tail(path, 3).await.expect("tail");
        assert_eq!(tail, vec!["line-47", "line-48", "line-49"]);
    }

    #[tokio::test]
    async fn tail_of_empty_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("console.log");
        std::fs::write(&path, "").expect("write");

        let tail = read_log_tail(path, 10).await.expect("tail");
        assert!(tail.is_empty());
    }
}
