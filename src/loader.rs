use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::constants::USER_AGENT;
use crate::error::{ImageError, SourceError};
use crate::source::{ImageList, ImageSource};

/// Fetches one listing in the background.
pub struct ListingLoader {
    receiver: Option<Receiver<Result<ImageList, SourceError>>>,
}

impl ListingLoader {
    pub fn spawn<S: ImageSource + 'static>(source: S) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            log::info!("Fetching image list from {}", source.describe());
            let result = source.fetch_image_list();
            // The receiver may already be gone if the viewer closed early.
            let _ = sender.send(result);
        });
        Self {
            receiver: Some(receiver),
        }
    }

    /// Returns the result exactly once, then `None` forever.
    pub fn poll(&mut self) -> Option<Result<ImageList, SourceError>> {
        let receiver = self.receiver.as_ref()?;
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(SourceError::Disconnected),
        };
        self.receiver = None;
        Some(result)
    }
}

pub type Download = (String, Result<Vec<u8>, ImageError>);

/// Downloads image bytes by URL on a single worker thread.
pub struct ImageFetcher {
    requests: Sender<String>,
    results: Receiver<Download>,
    requested: HashSet<String>,
    worker_gone: bool,
}

impl ImageFetcher {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<String>();
        let (result_tx, result_rx) = mpsc::channel();

        thread::spawn(move || {
            let client = match reqwest::blocking::Client::builder()
                .user_agent(USER_AGENT)
                .build()
            {
                Ok(client) => client,
                Err(e) => {
                    log::error!("Could not build image download client: {}", e);
                    return;
                }
            };

            for url in request_rx {
                let result = download(&client, &url);
                if result_tx.send((url, result)).is_err() {
                    break;
                }
            }
        });

        Self::from_channels(request_tx, result_rx)
    }

    fn from_channels(requests: Sender<String>, results: Receiver<Download>) -> Self {
        Self {
            requests,
            results,
            requested: HashSet::new(),
            worker_gone: false,
        }
    }

    /// Queue `url` unless it was requested before. A URL that cannot be
    /// queued because the worker has stopped comes back as a download error,
    /// once.
    pub fn request(&mut self, url: &str) -> Result<(), ImageError> {
        if !self.requested.insert(url.to_string()) {
            return Ok(());
        }
        if self.requests.send(url.to_string()).is_err() {
            if !self.worker_gone {
                log::warn!("Image download worker is gone; remaining images will not load");
                self.worker_gone = true;
            }
            return Err(ImageError::Download {
                url: url.to_string(),
                reason: "download worker stopped".to_string(),
            });
        }
        Ok(())
    }

    /// Drain finished downloads without blocking.
    pub fn poll(&mut self) -> Vec<Download> {
        self.results.try_iter().collect()
    }
}

fn download(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>, ImageError> {
    let failed = |reason: String| ImageError::Download {
        url: url.to_string(),
        reason,
    };

    let response = client.get(url).send().map_err(|e| failed(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(failed(format!("status {}", status)));
    }
    let bytes = response.bytes().map_err(|e| failed(e.to_string()))?;
    Ok(bytes.to_vec())
}
