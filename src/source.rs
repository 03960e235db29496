use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Turns a fetched or read payload into JSON text, decompressing zstd when
/// hinted or when the payload carries the zstd frame magic
pub fn decode_payload(bytes: &[u8], zstd_hint: bool) -> Result<String> {
    let decoded = if zstd_hint || bytes.starts_with(&ZSTD_MAGIC) {
        zstd::stream::decode_all(bytes).context("failed to decompress zstd payload")?
    } else {
        bytes.to_vec()
    };
    String::from_utf8(decoded).context("hierarchy model is not valid UTF-8")
}

/// File name under the cache directory for a downloaded URL.
///
/// ASCII alphanumerics, `.` and `-` are kept; every other byte, `_` included,
/// becomes `_XX` in hex, so distinct URLs never share a file.
pub fn cache_key(url: &str) -> String {
    let mut key = String::with_capacity(url.len());
    for byte in url.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'.' || byte == b'-' {
            key.push(char::from(byte));
        } else {
            key.push_str(&format!("_{:02X}", byte));
        }
    }
    key
}

/// Loads a serialized class hierarchy from a local path or an HTTP(S) URL
#[derive(Debug, Clone)]
pub struct SourceLoader {
    cache_dir: Option<PathBuf>,
    /// Download again even when a cached copy exists
    refresh: bool,
}

impl SourceLoader {
    /// Downloads are cached in the user cache directory unless `cache` is off
    pub fn new(cache: bool) -> Self {
        let cache_dir = if cache {
            dirs::cache_dir().map(|dir| dir.join("hierdoc"))
        } else {
            None
        };
        Self {
            cache_dir,
            refresh: false,
        }
    }

    pub fn with_cache_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir: Some(cache_dir),
            refresh: false,
        }
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn load(&self, input: &str) -> Result<String> {
        if is_url(input) {
            self.fetch(input)
        } else {
            self.read_file(Path::new(input))
        }
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read hierarchy model {}", path.display()))?;
        let zstd_hint = path.extension().is_some_and(|ext| ext == "zst");
        debug!(path = %path.display(), bytes = bytes.len(), "read hierarchy model");
        decode_payload(&bytes, zstd_hint)
    }

    fn cached_path(&self, url: &str) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(|dir| dir.join(cache_key(url)))
    }

    /// The cached copy of `url`, unless caching is off or a refresh was asked for
    fn cached_payload(&self, url: &str) -> Result<Option<String>> {
        if self.refresh {
            return Ok(None);
        }
        let path = match self.cached_path(url) {
            Some(path) if path.is_file() => path,
            _ => return Ok(None),
        };
        info!(url, path = %path.display(), "using cached hierarchy model");
        let bytes = fs::read(&path)
            .with_context(|| format!("failed to read cache file {}", path.display()))?;
        decode_payload(&bytes, url.ends_with(".zst")).map(Some)
    }

    fn fetch(&self, url: &str) -> Result<String> {
        let zstd_hint = url.ends_with(".zst");

        if let Some(json) = self.cached_payload(url)? {
            return Ok(json);
        }

        info!(url, "fetching hierarchy model");
        let client = Client::builder()
            .user_agent(concat!("hierdoc/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let response = client
            .get(url)
            .send()
            .with_context(|| format!("failed to fetch {}", url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            bail!("hierarchy model not found at {}", url);
        }
        if !status.is_success() {
            bail!("failed to fetch {}: HTTP {}", url, status);
        }

        let is_zstd = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("zstd"));
        let bytes = response.bytes()?;

        if let Some(path) = self.cached_path(url) {
            if let Err(err) = store(&path, &bytes) {
                warn!(path = %path.display(), error = %err, "failed to cache hierarchy model");
            }
        }

        decode_payload(&bytes, zstd_hint || is_zstd)
    }
}

fn store(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}
