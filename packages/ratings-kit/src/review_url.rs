//! App Store review links and the capability that opens them.

use url::Url;

use crate::error::{RatingsError, Result};

/// Build the "write a review" page URL for an App Store app id.
///
/// The id is spliced into the link as given; characters that are not valid
/// in a URL are percent-encoded by the parser. Only a link that cannot be
/// parsed at all is an error.
pub fn review_request_url(app_id: &str) -> Result<Url> {
    Url::parse(&format!(
        "https://apps.apple.com/app/id{app_id}?action=write-review"
    ))
    .map_err(|_| RatingsError::InvalidAppId {
        app_id: app_id.to_string(),
    })
}

/// Host capability for opening an external URL.
///
/// Fire-and-forget: the controller never learns whether opening worked.
/// Any `Fn(&Url)` closure is an opener.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &Url);
}

impl<F> UrlOpener for F
where
    F: Fn(&Url) + Send + Sync,
{
    fn open(&self, url: &Url) {
        self(url)
    }
}

/// Opener used when the host supplies none.
///
/// Nothing is opened, so the drop is logged at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyOpener;

impl UrlOpener for LogOnlyOpener {
    fn open(&self, url: &Url) {
        tracing::warn!(%url, "No URL opener configured, dropping review link");
    }
}
