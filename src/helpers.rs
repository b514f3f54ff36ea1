use crate::error::Error;
use crate::types::HttpClient;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;
use lazy_regex::regex_captures;
use reqwest::header;
use reqwest_middleware::ClientBuilder;
use serde::de::DeserializeOwned;

pub const USER_AGENT_STRING: &str = concat!("dupe-alert/", env!("CARGO_PKG_VERSION"));

/// The directory state is kept in when no other location is given.
pub fn default_data_directory() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dupe-alert")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Formats whole numbers without a fractional part, e.g. `250000` rather than `250000.0`.
pub fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e21 {
        format!("{number:.0}")
    } else {
        number.to_string()
    }
}

/// Builds the default client. Requests time out after `timeout`.
pub fn get_default_client(
    user_agent_string: &'static str,
    timeout: Duration,
) -> Result<HttpClient, Error> {
    let mut headers = header::HeaderMap::new();
    
    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent_string));
    
    let client = reqwest::ClientBuilder::new()
        .default_headers(headers)
        .timeout(timeout)
        .build()?;
    
    Ok(ClientBuilder::new(client).build())
}

/// Writes a file atomically. The data is written to a temporary file next to `filepath` which
/// then replaces it, so a crash never leaves a half-written file behind.
pub fn write_file_atomic(
    filepath: &Path,
    bytes: &[u8],
) -> io::Result<()> {
    let temp_filepath = filepath.with_extension("tmp");
    let result = fs::File::create(&temp_filepath)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&temp_filepath, filepath));
    
    if result.is_err() {
        // something went wrong writing to this file...
        let _ = fs::remove_file(&temp_filepath);
    }
    
    result
}

pub async fn check_response(response: reqwest::Response) -> Result<bytes::Bytes, Error> {
    let status = response.status();
    
    match status.as_u16() {
        400..=599 => Err(Error::Http(status)),
        _ => Ok(response.bytes().await?),
    }
}

pub async fn parses_response<D>(response: reqwest::Response) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    let body = check_response(response).await?;
    
    match serde_json::from_slice::<D>(&body) {
        Ok(body) => Ok(body),
        Err(parse_error) => {
            // unexpected response
            let html = String::from_utf8_lossy(&body);
            
            if let Some((_, title)) = regex_captures!(r#"(?i)<title>\s*([^<]+?)\s*</title>"#, &html) {
                Err(Error::Response(title.into()))
            } else {
                log::debug!("Unparseable response body: {html}");
                Err(Error::Parse(parse_error))
            }
        },
    }
}
