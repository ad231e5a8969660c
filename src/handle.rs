//! Filter list handle: loads raw list bytes from a file or URL.
//!
//! The handle only owns the fetched bytes. Decoding and classification
//! happen in [`Handle::read_items`], so one handle can be parsed any number
//! of times.

use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::collector::{collect_with_sink, LineSink, LogSink};
use crate::config::FetchConfig;
use crate::{envelope, Error, Item, Result};

/// Public gfwlist subscription.
pub const DEFAULT_LIST_URL: &str =
    "https://raw.githubusercontent.com/gfwlist/gfwlist/master/gfwlist.txt";

/// Raw, still-encoded filter list.
///
/// # Example
///
/// ```ignore
/// use gfwrule::Handle;
///
/// let handle = Handle::open_online(gfwrule::DEFAULT_LIST_URL)?;
/// for item in handle.read_items()? {
///     println!("{}", item);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Handle {
    data: Vec<u8>,
}

impl Handle {
    /// Wrap bytes that were fetched elsewhere.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Read a list from a local file.
    pub fn open_offline(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = inflate_if_gzip(raw)?;

        log::info!("Loaded list from {:?}: {} bytes", path, data.len());
        Ok(Self { data })
    }

    /// Download a list with the default fetch configuration.
    pub fn open_online(url: &str) -> Result<Self> {
        Self::open_online_with_config(url, &FetchConfig::default())
    }

    /// Download a list with a blocking GET.
    ///
    /// Any status other than 200 is an error.
    pub fn open_online_with_config(url: &str, config: &FetchConfig) -> Result<Self> {
        let download_err = |source: reqwest::Error| Error::Download {
            url: url.to_string(),
            source,
        };

        let mut builder = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(download_err)?;

        let response = client.get(url).send().map_err(download_err)?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let raw = response.bytes().map_err(download_err)?.to_vec();
        let raw_len = raw.len();
        let data = inflate_if_gzip(raw)?;

        if data.len() != raw_len {
            log::info!(
                "Downloaded list from {}: {} bytes (compressed: {} bytes)",
                url,
                data.len(),
                raw_len
            );
        } else {
            log::info!("Downloaded list from {}: {} bytes", url, data.len());
        }
        Ok(Self { data })
    }

    /// The raw envelope bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decode the envelope and classify every line, logging lines that yield nothing.
    pub fn read_items(&self) -> Result<Vec<Item>> {
        self.read_items_with_sink(&mut LogSink)
    }

    /// Decode the envelope and classify every line, reporting lines that yield nothing to `sink`.
    pub fn read_items_with_sink(&self, sink: &mut dyn LineSink) -> Result<Vec<Item>> {
        let text = envelope::decode(&self.data)?;
        Ok(collect_with_sink(&text, sink))
    }
}

/// Check if data is gzip compressed.
fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b
}

/// Inflate gzip data; anything else passes through.
fn inflate_if_gzip(data: Vec<u8>) -> Result<Vec<u8>> {
    if !is_gzip(&data) {
        return Ok(data);
    }

    let mut decoder = GzDecoder::new(&data[..]);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(Error::Gzip)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemType;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn envelope_of(text: &str) -> Vec<u8> {
        envelope::encode(text.as_bytes()).into_bytes()
    }

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_is_gzip() {
        assert!(is_gzip(&gzip(b"hello")));
        assert!(!is_gzip(b"W0F1dG9Qcm94eSAwLjIuOV0="));
        assert!(!is_gzip(&[0x1f]));
    }

    #[test]
    fn test_inflate_passthrough() {
        let data = b"plain".to_vec();
        assert_eq!(inflate_if_gzip(data.clone()).unwrap(), data);
    }

    #[test]
    fn test_inflate_corrupt_gzip() {
        let err = inflate_if_gzip(vec![0x1f, 0x8b, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, Error::Gzip(_)));
    }

    #[test]
    fn test_read_items_from_bytes() {
        let handle = Handle::from_bytes(envelope_of("[AutoProxy 0.2.9]\n||google.com\n"));
        let items = handle.read_items().unwrap();
        assert_eq!(items, vec![Item::new(ItemType::DomainSuffix, "google.com")]);
    }

    #[test]
    fn test_open_offline_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gfwlist.txt.gz");
        fs::write(&path, gzip(&envelope_of("[AutoProxy 0.2.9]\n1.2.3.4\n"))).unwrap();

        let handle = Handle::open_offline(&path).unwrap();
        let items = handle.read_items().unwrap();
        assert_eq!(items, vec![Item::new(ItemType::Ip, "1.2.3.4")]);
    }

    #[test]
    fn test_open_offline_missing() {
        let err = Handle::open_offline("/nonexistent/gfwlist.txt").unwrap_err();
        assert!(err.is_fetch());
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_read_items_is_repeatable() {
        let handle = Handle::from_bytes(envelope_of("[AutoProxy 0.2.9]\n*share*\n"));
        assert_eq!(handle.read_items().unwrap(), handle.read_items().unwrap());
    }
}
