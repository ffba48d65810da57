use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::constants::USER_AGENT;
use crate::error::SourceError;

/// Ordered, immutable list of image URLs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageList(Arc<[String]>);

impl ImageList {
    pub fn new(urls: Vec<String>) -> Self {
        Self(urls.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl Deref for ImageList {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for ImageList {
    fn from(urls: Vec<String>) -> Self {
        Self::new(urls)
    }
}

pub trait ImageSource: Send {
    /// Fetch the full list. An empty listing is an error ([`SourceError::Empty`]).
    fn fetch_image_list(&self) -> Result<ImageList, SourceError>;

    /// Short human-readable name for logs.
    fn describe(&self) -> String;
}

impl<S: ImageSource + ?Sized> ImageSource for Box<S> {
    fn fetch_image_list(&self) -> Result<ImageList, SourceError> {
        (**self).fetch_image_list()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[derive(Deserialize)]
struct Listing {
    data: Vec<Pet>,
}

#[derive(Deserialize)]
struct Pet {
    #[serde(default)]
    images: Vec<PetImage>,
}

#[derive(Deserialize)]
struct PetImage {
    url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Bundle {
    Listing(Listing),
    Urls(Vec<String>),
}

/// Parse a pet listing (`{"data": [{"images": [{"url": ..}]}]}`) or a bare
/// array of URL strings. Each pet contributes its first image; pets without
/// images are skipped.
pub fn parse_listing(bytes: &[u8]) -> Result<ImageList, SourceError> {
    let urls = match serde_json::from_slice::<Bundle>(bytes)? {
        Bundle::Listing(listing) => {
            let total = listing.data.len();
            let urls: Vec<String> = listing
                .data
                .into_iter()
                .filter_map(|pet| pet.images.into_iter().next().map(|image| image.url))
                .collect();
            if urls.len() < total {
                log::debug!("Skipped {} pets without images", total - urls.len());
            }
            urls
        }
        Bundle::Urls(urls) => urls,
    };

    let urls: Vec<String> = urls.into_iter().filter(|url| !url.trim().is_empty()).collect();
    if urls.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(ImageList::new(urls))
}

/// Fetches the listing from a remote JSON API.
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ImageSource for HttpSource {
    fn fetch_image_list(&self) -> Result<ImageList, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        let response = client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes()?;
        parse_listing(&body)
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}

/// Listing bundled with the application, handed over explicitly.
pub struct BundledSource {
    document: Vec<u8>,
    origin: String,
}

impl BundledSource {
    pub fn new(document: impl Into<Vec<u8>>) -> Self {
        Self {
            document: document.into(),
            origin: "inline".to_string(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let document = fs::read(path).map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            document,
            origin: path.display().to_string(),
        })
    }
}

impl ImageSource for BundledSource {
    fn fetch_image_list(&self) -> Result<ImageList, SourceError> {
        parse_listing(&self.document)
    }

    fn describe(&self) -> String {
        format!("bundle {}", self.origin)
    }
}

/// Fixed in-memory list.
pub struct StaticSource {
    urls: Vec<String>,
}

impl StaticSource {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }
}

impl ImageSource for StaticSource {
    fn fetch_image_list(&self) -> Result<ImageList, SourceError> {
        if self.urls.is_empty() {
            return Err(SourceError::Empty);
        }
        Ok(ImageList::new(self.urls.clone()))
    }

    fn describe(&self) -> String {
        format!("static ({} urls)", self.urls.len())
    }
}

/// Shuffles whatever the inner source returns.
pub struct Shuffled<S> {
    inner: S,
    seed: Option<u64>,
}

impl<S: ImageSource> Shuffled<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, seed: None }
    }

    /// Same seed, same order. Used by tests.
    pub fn with_seed(inner: S, seed: u64) -> Self {
        Self {
            inner,
            seed: Some(seed),
        }
    }
}

impl<S: ImageSource> ImageSource for Shuffled<S> {
    fn fetch_image_list(&self) -> Result<ImageList, SourceError> {
        let mut urls = self.inner.fetch_image_list()?.to_vec();
        match self.seed {
            Some(seed) => urls.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => urls.shuffle(&mut rand::rng()),
        }
        Ok(ImageList::new(urls))
    }

    fn describe(&self) -> String {
        format!("shuffled {}", self.inner.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "data": [
            {"name": "Rex", "images": [{"url": "https://pets.test/rex-1.jpg"}, {"url": "https://pets.test/rex-2.jpg"}]},
            {"name": "Tom", "images": []},
            {"name": "Kit", "images": [{"url": "https://pets.test/kit.jpg"}]}
        ],
        "meta": {"total": 3}
    }"#;

    #[test]
    fn test_parse_listing_takes_first_image() {
        let list = parse_listing(LISTING.as_bytes()).unwrap();
        assert_eq!(
            list.to_vec(),
            vec!["https://pets.test/rex-1.jpg", "https://pets.test/kit.jpg"]
        );
    }

    #[test]
    fn test_parse_listing_accepts_bare_urls() {
        let list = parse_listing(br#"["a.png", " ", "b.png"]"#).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1], "b.png");
    }

    #[test]
    fn test_parse_listing_empty() {
        let err = parse_listing(br#"{"data": []}"#).unwrap_err();
        assert!(err.is_empty());

        let err = parse_listing(br#"{"data": [{"images": []}]}"#).unwrap_err();
        assert!(err.is_empty());
    }

    #[test]
    fn test_parse_listing_garbage() {
        let err = parse_listing(b"<html>busy</html>").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_bundled_source_is_explicit() {
        let source = BundledSource::new(LISTING);
        assert_eq!(source.fetch_image_list().unwrap().len(), 2);
        assert_eq!(source.describe(), "bundle inline");
    }

    #[test]
    fn test_bundled_source_missing_file() {
        let err = BundledSource::from_path(Path::new("/nonexistent/pets.json"))
            .err()
            .unwrap();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_static_source_empty() {
        let source = StaticSource::new(Vec::<String>::new());
        assert!(source.fetch_image_list().unwrap_err().is_empty());
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let urls: Vec<String> = (0..20).map(|i| format!("{i}.jpg")).collect();
        let source = Shuffled::with_seed(StaticSource::new(urls.clone()), 7);

        let mut shuffled = source.fetch_image_list().unwrap().to_vec();
        assert_eq!(shuffled.len(), urls.len());

        let again = source.fetch_image_list().unwrap().to_vec();
        assert_eq!(shuffled, again);

        shuffled.sort_by_key(|s| s.trim_end_matches(".jpg").parse::<u32>().unwrap());
        assert_eq!(shuffled, urls);
    }

    #[test]
    fn test_shuffled_propagates_errors() {
        let source = Shuffled::new(StaticSource::new(Vec::<String>::new()));
        assert!(source.fetch_image_list().unwrap_err().is_empty());
    }
}
