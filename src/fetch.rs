//! Dataset download.
//! One GET with a timeout, no retries; the body goes through a CSV
//! parse/write round trip before landing on disk.

use polars::prelude::*;
use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Rows kept in the report preview.
const PREVIEW_ROWS: usize = 5;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Malformed CSV payload: {0}")]
    MalformedData(#[source] PolarsError),
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the download went and what it looked like.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub url: String,
    pub output: PathBuf,
    pub rows: usize,
    pub columns: Vec<String>,
    pub preview: DataFrame,
}

/// GET `url` and return the body. Non-2xx status is an error.
pub fn download(url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;

    info!("Downloading CSV from {}", url);
    let response = client.get(url).send()?.error_for_status()?;
    let body = response.bytes()?;
    debug!(bytes = body.len(), "Download complete");

    Ok(body.to_vec())
}

/// Parse `body` as CSV and write it to `output`, replacing any existing file.
pub fn persist_csv(
    url: &str,
    body: Vec<u8>,
    output: &Path,
) -> Result<FetchReport, FetchError> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(body))
        .finish()
        .map_err(FetchError::MalformedData)?;

    let mut file = File::create(output)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|source| FetchError::Write {
            path: output.to_path_buf(),
            source,
        })?;
    info!("OK, saved to: {}", output.display());

    Ok(FetchReport {
        url: url.to_string(),
        output: output.to_path_buf(),
        rows: df.height(),
        columns: df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect(),
        preview: df.head(Some(PREVIEW_ROWS)),
    })
}

/// Download `url` and save it as CSV at `output`.
pub fn fetch_dataset(
    url: &str,
    output: &Path,
    timeout: Duration,
) -> Result<FetchReport, FetchError> {
    let body = download(url, timeout)?;
    persist_csv(url, body, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataLoader;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    const URL: &str = "https://example.invalid/gdp.csv";

    #[test]
    fn persists_parsed_csv() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("gdp_per_capita.csv");
        std::fs::write(&out, "stale").unwrap();

        let body = b"Entity,Year,GDP per capita\nA,1999,1.5\nB,2000,\nC,2001,3.25\n".to_vec();
        let report = persist_csv(URL, body, &out).unwrap();

        assert_eq!(report.rows, 3);
        assert_eq!(report.columns, vec!["Entity", "Year", "GDP per capita"]);
        assert_eq!(report.preview.height(), 3);

        let reloaded = DataLoader::load_csv(&out).unwrap();
        assert_eq!(reloaded.height(), 3);
        assert_eq!(reloaded.width(), 3);
        let gdp = reloaded.column("GDP per capita").unwrap();
        assert_eq!(gdp.null_count(), 1);
    }

    #[test]
    fn ragged_payload_is_malformed() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out.csv");
        let body = b"a,b\n1,2\n3,4,5,6\n".to_vec();
        let err = persist_csv(URL, body, &out).unwrap_err();
        assert!(matches!(err, FetchError::MalformedData(_)));
        assert!(!out.exists());
    }

    #[test]
    fn late_decimal_payload_is_saved() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("gdp_per_capita.csv");
        let mut body = String::from("Entity,GDP per capita\n");
        for i in 0..10_050 {
            body.push_str(&format!("A,{}\n", 1000 + i));
        }
        body.push_str("B,11010.5\n");

        let report = persist_csv(URL, body.into_bytes(), &out).unwrap();
        assert_eq!(report.rows, 10_051);

        let reloaded = DataLoader::load_csv(&out).unwrap();
        let gdp = reloaded.column("GDP per capita").unwrap();
        assert_eq!(gdp.f64().unwrap().get(10_050), Some(11010.5));
    }

    #[test]
    fn error_status_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            stream
                .write_all(
                    b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                )
                .unwrap();
        });

        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("gdp_per_capita.csv");
        let url = format!("http://{addr}/gdp_per_capita.csv");
        let err = fetch_dataset(&url, &out, Duration::from_secs(5)).unwrap_err();
        server.join().unwrap();

        match err {
            FetchError::Network(e) => {
                assert_eq!(e.status(), Some(reqwest::StatusCode::NOT_FOUND));
            }
            other => panic!("expected network error, got {other:?}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn unreachable_host_is_network_error() {
        // Port 9 on localhost: nothing listens, connection is refused.
        let err = download("http://127.0.0.1:9/data.csv", Duration::from_secs(2)).unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
