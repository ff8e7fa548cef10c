use std::borrow::Cow;
use std::fmt;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use base64::Engine as _;
use rayon::prelude::*;

use crate::assets::decode::{DecodedImage, decode_image};
use crate::assets::reference::ImageReference;
use crate::foundation::core::CancelToken;
use crate::foundation::error::{KeepsakeError, KeepsakeResult};

/// Loader configuration.
#[derive(Clone, Debug)]
pub struct LoaderOpts {
    /// Worker threads for one batch. `None` sizes the pool to the batch (at most 16).
    pub threads: Option<usize>,
    /// Encoded inputs larger than this are rejected as [`LoadFailureReason::TooLarge`].
    pub max_source_bytes: usize,
    /// Decoded images larger than this on either side are downscaled before compositing.
    pub max_source_dim: Option<u32>,
    /// Request timeout for remote references (only used with the `remote` feature).
    pub http_timeout_ms: u64,
}

impl Default for LoaderOpts {
    fn default() -> Self {
        Self {
            threads: None,
            max_source_bytes: 64 * 1024 * 1024,
            max_source_dim: Some(4096),
            http_timeout_ms: 15_000,
        }
    }
}

impl LoaderOpts {
    /// Defaults overridden by `KEEPSAKE_LOADER_THREADS`, `KEEPSAKE_MAX_SOURCE_BYTES`,
    /// `KEEPSAKE_MAX_SOURCE_DIM` (`0` disables downscaling) and `KEEPSAKE_HTTP_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        fn var<T: std::str::FromStr>(name: &str) -> Option<T> {
            std::env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
        }

        let mut opts = Self::default();
        if let Some(n) = var::<usize>("KEEPSAKE_LOADER_THREADS").filter(|&n| n > 0) {
            opts.threads = Some(n);
        }
        if let Some(n) = var::<usize>("KEEPSAKE_MAX_SOURCE_BYTES").filter(|&n| n > 0) {
            opts.max_source_bytes = n;
        }
        if let Some(n) = var::<u32>("KEEPSAKE_MAX_SOURCE_DIM") {
            opts.max_source_dim = (n > 0).then_some(n);
        }
        if let Some(n) = var::<u64>("KEEPSAKE_HTTP_TIMEOUT_MS").filter(|&n| n > 0) {
            opts.http_timeout_ms = n;
        }
        opts
    }
}

/// Why a single reference could not be turned into a bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadFailureReason {
    /// The resource could not be read or fetched.
    Unreachable,
    /// The bytes were read but are not a valid image.
    Corrupt,
    /// Unknown image format or unsupported locator scheme.
    Unsupported,
    /// The resource exceeds the configured size limits.
    TooLarge,
}

impl fmt::Display for LoadFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unreachable => "unreachable",
            Self::Corrupt => "corrupt",
            Self::Unsupported => "unsupported",
            Self::TooLarge => "too large",
        };
        f.write_str(s)
    }
}

/// Per-item failure, kept next to the successful images of a batch.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LoadFailure {
    /// Position of the reference in the input list.
    pub index: usize,
    /// Log-safe label of the reference.
    pub reference_label: String,
    /// Failure class.
    pub reason: LoadFailureReason,
    /// Human-readable detail.
    pub detail: String,
}

/// A decoded image together with its position in the input list.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    /// Position of the reference in the input list.
    pub index: usize,
    /// Decoded bitmap.
    pub image: DecodedImage,
}

/// Aggregate counts for one batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoadStats {
    /// References attempted.
    pub attempted: usize,
    /// References decoded.
    pub succeeded: usize,
    /// References dropped.
    pub failed: usize,
}

/// Structured partial result of one batch. Both lists are in input order.
#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    /// Successfully decoded images.
    pub succeeded: Vec<LoadedImage>,
    /// Failed references.
    pub failed: Vec<LoadFailure>,
}

impl LoadReport {
    /// Aggregate counts.
    pub fn stats(&self) -> LoadStats {
        LoadStats {
            attempted: self.succeeded.len() + self.failed.len(),
            succeeded: self.succeeded.len(),
            failed: self.failed.len(),
        }
    }

    /// Decoded images in input order.
    pub fn images(&self) -> impl Iterator<Item = &DecodedImage> {
        self.succeeded.iter().map(|l| &l.image)
    }

    /// Return the report, or [`KeepsakeError::NoUsableImages`] when nothing decoded.
    pub fn into_usable(self) -> KeepsakeResult<Self> {
        if self.succeeded.is_empty() {
            return Err(KeepsakeError::NoUsableImages {
                attempted: self.failed.len(),
            });
        }
        Ok(self)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ItemError {
    pub(crate) reason: LoadFailureReason,
    pub(crate) detail: String,
}

impl ItemError {
    pub(crate) fn new(reason: LoadFailureReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }

    fn from_anyhow(reason: LoadFailureReason, err: anyhow::Error) -> Self {
        Self::new(reason, format!("{err:#}"))
    }
}

/// Resolves image references into decoded bitmaps, concurrently and without retries.
#[derive(Clone, Debug, Default)]
pub struct ResourceLoader {
    opts: LoaderOpts,
}

impl ResourceLoader {
    /// Create a loader with the given options.
    pub fn new(opts: LoaderOpts) -> Self {
        Self { opts }
    }

    /// Loader options.
    pub fn opts(&self) -> &LoaderOpts {
        &self.opts
    }

    /// Load a batch.
    ///
    /// Per-reference failures are collected in the [`LoadReport`]. The call itself only fails for
    /// `threads: Some(0)` or when the worker pool or HTTP client cannot be built.
    pub fn load(&self, refs: &[ImageReference]) -> KeepsakeResult<LoadReport> {
        self.load_with_cancel(refs, &CancelToken::new())
    }

    /// Load a batch, giving up with [`KeepsakeError::Cancelled`] once `cancel` fires.
    ///
    /// Every reference is fetched and decoded as an independent task; the call returns after all
    /// tasks have joined. Tasks that observe cancellation skip their remaining work.
    #[tracing::instrument(skip_all, fields(count = refs.len()))]
    pub fn load_with_cancel(
        &self,
        refs: &[ImageReference],
        cancel: &CancelToken,
    ) -> KeepsakeResult<LoadReport> {
        cancel.check()?;
        if refs.is_empty() {
            return Ok(LoadReport::default());
        }

        let fetcher = Fetcher::new(&self.opts)?;
        let pool = build_thread_pool(self.opts.threads, refs.len())?;
        let max_dim = self.opts.max_source_dim;

        let results: Vec<Option<Result<DecodedImage, ItemError>>> = pool.install(|| {
            refs.par_iter()
                .map(|reference| {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    let bytes = match fetcher.fetch(reference) {
                        Ok(b) => b,
                        Err(e) => return Some(Err(e)),
                    };
                    if cancel.is_cancelled() {
                        return None;
                    }
                    Some(decode_image(reference, &bytes, max_dim))
                })
                .collect()
        });
        cancel.check()?;

        let mut report = LoadReport::default();
        for (index, (reference, result)) in refs.iter().zip(results).enumerate() {
            match result {
                Some(Ok(image)) => report.succeeded.push(LoadedImage { index, image }),
                Some(Err(e)) => {
                    tracing::warn!(
                        index,
                        reference = %reference,
                        reason = %e.reason,
                        detail = %e.detail,
                        "dropping image that failed to load"
                    );
                    report.failed.push(LoadFailure {
                        index,
                        reference_label: reference.label(),
                        reason: e.reason,
                        detail: e.detail,
                    });
                }
                None => return Err(KeepsakeError::Cancelled),
            }
        }

        let stats = report.stats();
        tracing::debug!(
            attempted = stats.attempted,
            succeeded = stats.succeeded,
            failed = stats.failed,
            "image batch loaded"
        );
        Ok(report)
    }
}

struct Fetcher {
    max_bytes: usize,
    #[cfg(feature = "remote")]
    client: reqwest::blocking::Client,
}

impl Fetcher {
    fn new(opts: &LoaderOpts) -> KeepsakeResult<Self> {
        #[cfg(feature = "remote")]
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_millis(opts.http_timeout_ms))
            .build()
            .context("build http client")?;

        Ok(Self {
            max_bytes: opts.max_source_bytes,
            #[cfg(feature = "remote")]
            client,
        })
    }

    fn fetch<'a>(&self, reference: &'a ImageReference) -> Result<Cow<'a, [u8]>, ItemError> {
        let bytes = match reference {
            ImageReference::Bytes(b) => Cow::Borrowed(&b[..]),
            ImageReference::Path(p) => Cow::Owned(self.read_file(p)?),
            ImageReference::Url(u) => {
                let lower = u.to_ascii_lowercase();
                if lower.starts_with("data:") {
                    Cow::Owned(decode_data_url(u)?)
                } else if lower.starts_with("http://") || lower.starts_with("https://") {
                    Cow::Owned(self.fetch_http(u)?)
                } else {
                    return Err(ItemError::new(
                        LoadFailureReason::Unsupported,
                        "unsupported url scheme",
                    ));
                }
            }
        };
        self.check_len(bytes.len() as u64)?;
        Ok(bytes)
    }

    fn check_len(&self, len: u64) -> Result<(), ItemError> {
        if len > self.max_bytes as u64 {
            return Err(ItemError::new(
                LoadFailureReason::TooLarge,
                format!("{len} bytes exceeds limit of {} bytes", self.max_bytes),
            ));
        }
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ItemError> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("stat '{}'", path.display()))
            .map_err(|e| ItemError::from_anyhow(LoadFailureReason::Unreachable, e))?;
        self.check_len(meta.len())?;
        std::fs::read(path)
            .with_context(|| format!("read '{}'", path.display()))
            .map_err(|e| ItemError::from_anyhow(LoadFailureReason::Unreachable, e))
    }

    #[cfg(feature = "remote")]
    fn fetch_http(&self, url: &str) -> Result<Vec<u8>, ItemError> {
        let resp = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .context("http request")
            .map_err(|e| ItemError::from_anyhow(LoadFailureReason::Unreachable, e))?;
        if let Some(len) = resp.content_length() {
            self.check_len(len)?;
        }
        read_capped(resp, self.max_bytes)
    }

    #[cfg(not(feature = "remote"))]
    fn fetch_http(&self, _url: &str) -> Result<Vec<u8>, ItemError> {
        Err(ItemError::new(
            LoadFailureReason::Unsupported,
            "remote references require the `remote` feature",
        ))
    }
}

/// Decode the payload of a base64 `data:` URL.
/// Read a body of unknown length, stopping one byte past `max_bytes`.
#[cfg_attr(not(feature = "remote"), allow(dead_code))]
fn read_capped(body: impl std::io::Read, max_bytes: usize) -> Result<Vec<u8>, ItemError> {
    let mut out = Vec::new();
    body.take(max_bytes as u64 + 1)
        .read_to_end(&mut out)
        .context("read http body")
        .map_err(|e| ItemError::from_anyhow(LoadFailureReason::Unreachable, e))?;
    if out.len() > max_bytes {
        return Err(ItemError::new(
            LoadFailureReason::TooLarge,
            format!("body exceeds limit of {max_bytes} bytes"),
        ));
    }
    Ok(out)
}

fn decode_data_url(url: &str) -> Result<Vec<u8>, ItemError> {
    let Some((header, payload)) = url.split_once(',') else {
        return Err(ItemError::new(
            LoadFailureReason::Corrupt,
            "data url has no payload",
        ));
    };
    if !header.to_ascii_lowercase().ends_with(";base64") {
        return Err(ItemError::new(
            LoadFailureReason::Unsupported,
            "only base64 data urls are supported",
        ));
    }
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .context("decode base64 payload")
        .map_err(|e| ItemError::from_anyhow(LoadFailureReason::Corrupt, e))
}

fn build_thread_pool(threads: Option<usize>, batch: usize) -> KeepsakeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(KeepsakeError::invalid("loader 'threads' must be >= 1 when set"));
    }

    let n = threads.unwrap_or_else(|| batch.clamp(1, 16));
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .thread_name(|i| format!("keepsake-load-{i}"))
        .build()
        .context("build loader thread pool")
        .map_err(KeepsakeError::from)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
