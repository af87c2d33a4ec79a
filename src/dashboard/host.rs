//! Host seams
//!
//! The controller only ever talks to the outside world through these two
//! traits. The browser implements them on top of web-sys and gloo-net, the
//! CLI on top of reqwest and an in-memory page.
//!
//! Futures are `?Send`: browser futures are bound to the page's single
//! thread.

use async_trait::async_trait;
use serde_json::Value;

use super::chart::BarChartSpec;
use super::error::{FetchError, MountError};

/// Something that can GET a URL and hand back its JSON body
#[async_trait(?Send)]
pub trait JsonSource {
    /// Issue one GET request. No retry, no timeout.
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// The document the dashboard renders into
pub trait Page {
    /// Whether an element with this id exists
    fn has_element(&self, id: &str) -> bool;

    /// Replace the text of an element. Returns `false` if it is absent.
    fn set_text(&self, id: &str, text: &str) -> bool;

    /// Bind a bar chart to the element with this id
    fn mount_bar_chart(&self, id: &str, spec: &BarChartSpec) -> Result<(), MountError>;
}

#[async_trait(?Send)]
impl<T: JsonSource + ?Sized> JsonSource for &T {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        (**self).get_json(url).await
    }
}

impl<T: Page + ?Sized> Page for &T {
    fn has_element(&self, id: &str) -> bool {
        (**self).has_element(id)
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        (**self).set_text(id, text)
    }

    fn mount_bar_chart(&self, id: &str, spec: &BarChartSpec) -> Result<(), MountError> {
        (**self).mount_bar_chart(id, spec)
    }
}
