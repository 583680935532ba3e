use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScrapeError;

/// Handle to one matched DOM element.
#[async_trait]
pub trait PageElement: Send + Sync {
    /// Inner text of the first sub-element matching `selector`, if any.
    async fn text(&self, selector: &str) -> Result<Option<String>, ScrapeError>;

    /// Value of the element's own attribute `name`, if present.
    async fn attribute(&self, name: &str) -> Result<Option<String>, ScrapeError>;
}

/// The narrow slice of a rendered browser page the pipeline consumes.
///
/// Exactly the operations the stages need: navigation, bounded
/// existence-polling, element enumeration, a boolean page-side predicate
/// and the rendered source. Components depend on this trait only, never
/// on a concrete automation engine, so unit tests can serve canned DOM
/// snapshots.
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigate to `url` and wait for the document, bounded by `timeout`.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), ScrapeError>;

    /// Poll until an element matching `selector` exists, bounded by
    /// `timeout`. Fails with [`ScrapeError::ElementNotFound`] on expiry.
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScrapeError>;

    /// All elements currently matching `selector`, in document order.
    async fn query_all(
        &self,
        selector: &str,
    ) -> Result<Vec<Box<dyn PageElement>>, ScrapeError>;

    /// Evaluate a JavaScript expression expected to yield a boolean.
    async fn eval_bool(&self, expression: &str) -> Result<bool, ScrapeError>;

    /// Fully rendered page source.
    async fn content(&self) -> Result<String, ScrapeError>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! Canned-DOM [`Page`] implementation for unit tests.

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{Page, PageElement};
    use crate::error::ScrapeError;

    #[derive(Debug, Clone, Default)]
    pub struct FakeElement {
        texts: HashMap<String, String>,
        attrs: HashMap<String, String>,
    }

    impl FakeElement {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_text(mut self, selector: &str, text: &str) -> Self {
            self.texts.insert(selector.to_string(), text.to_string());
            self
        }

        pub fn with_attr(mut self, name: &str, value: &str) -> Self {
            self.attrs.insert(name.to_string(), value.to_string());
            self
        }
    }

    #[async_trait]
    impl PageElement for FakeElement {
        async fn text(&self, selector: &str) -> Result<Option<String>, ScrapeError> {
            Ok(self.texts.get(selector).cloned())
        }

        async fn attribute(&self, name: &str) -> Result<Option<String>, ScrapeError> {
            Ok(self.attrs.get(name).cloned())
        }
    }

    #[derive(Default)]
    pub struct FakePage {
        elements: HashMap<String, Vec<FakeElement>>,
        source: String,
        predicate: bool,
        pub visited: Mutex<Vec<String>>,
    }

    impl FakePage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_elements(mut self, selector: &str, elements: Vec<FakeElement>) -> Self {
            self.elements.insert(selector.to_string(), elements);
            self
        }

        pub fn with_source(mut self, source: &str) -> Self {
            self.source = source.to_string();
            self
        }

        pub fn with_predicate(mut self, value: bool) -> Self {
            self.predicate = value;
            self
        }
    }

    #[async_trait]
    impl Page for FakePage {
        async fn navigate(&self, url: &str, _timeout: Duration) -> Result<(), ScrapeError> {
            self.visited.lock().unwrap().push(url.to_string());
            Ok(())
        }

        async fn wait_for_selector(
            &self,
            selector: &str,
            _timeout: Duration,
        ) -> Result<(), ScrapeError> {
            if self.elements.get(selector).is_some_and(|e| !e.is_empty()) {
                Ok(())
            } else {
                Err(ScrapeError::ElementNotFound {
                    selector: selector.to_string(),
                })
            }
        }

        async fn query_all(
            &self,
            selector: &str,
        ) -> Result<Vec<Box<dyn PageElement>>, ScrapeError> {
            Ok(self
                .elements
                .get(selector)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(|e| Box::new(e) as Box<dyn PageElement>)
                .collect())
        }

        async fn eval_bool(&self, _expression: &str) -> Result<bool, ScrapeError> {
            Ok(self.predicate)
        }

        async fn content(&self) -> Result<String, ScrapeError> {
            Ok(self.source.clone())
        }
    }
}
