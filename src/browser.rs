use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::HeadlessMode;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Element};
use futures::StreamExt;
use tempfile::TempDir;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::page::{Page, PageElement};

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Headless Chromium session owning the browser process and its profile
/// directory. Must be shut down on every exit path so the process does
/// not leak a browser.
pub struct BrowserSession {
    browser: Browser,
    // Dropped (and deleted) together with the session.
    _profile_dir: TempDir,
}

impl BrowserSession {
    /// Launches a headless browser configured with the scrape user agent.
    ///
    /// # Errors
    /// Errors when no Chromium executable is found or the launch fails.
    pub async fn launch(config: &ScrapeConfig) -> Result<Self> {
        let profile_dir = tempfile::tempdir().context("Creating browser profile dir")?;

        let browser_config = BrowserConfig::builder()
            .no_sandbox()
            .headless_mode(HeadlessMode::True)
            .args([
                "--disable-gpu",
                "--disable-dev-shm-usage",
                "--disable-extensions",
                "--mute-audio",
                "--no-first-run",
                "--disable-blink-features=AutomationControlled",
                &format!("--user-data-dir={}", profile_dir.path().display()),
                &format!("--user-agent={}", config.user_agent),
            ])
            .build()
            .map_err(|e| anyhow::anyhow!("Building browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("Launching headless browser")?;

        // The CDP event handler has to be pumped for the whole session.
        tokio::spawn(async move { while handler.next().await.is_some() {} });

        info!("Headless browser launched");
        Ok(Self {
            browser,
            _profile_dir: profile_dir,
        })
    }

    /// Opens a blank tab implementing the [`Page`] capability.
    ///
    /// # Errors
    /// Errors when the browser refuses to open a new target.
    pub async fn new_page(&self) -> Result<ChromiumPage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("Opening browser page")?;
        Ok(ChromiumPage { page })
    }

    /// Closes the browser and reaps the child process.
    pub async fn shutdown(mut self) {
        self.browser.close().await.ok();
        if let Some(status) = self.browser.kill().await {
            debug!("Browser process exited: {status:?}");
        }
    }
}

/// [`Page`] implementation backed by a chromiumoxide tab.
pub struct ChromiumPage {
    page: chromiumoxide::Page,
}

#[async_trait]
impl Page for ChromiumPage {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), ScrapeError> {
        let nav = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation_response().await?;
            Ok::<(), CdpError>(())
        };
        match tokio::time::timeout(timeout, nav).await {
            Ok(result) => result.map_err(ScrapeError::from),
            Err(_) => Err(ScrapeError::NavigationTimeout {
                url: url.to_string(),
            }),
        }
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScrapeError> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::ElementNotFound {
                    selector: selector.to_string(),
                });
            }
            sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn query_all(
        &self,
        selector: &str,
    ) -> Result<Vec<Box<dyn PageElement>>, ScrapeError> {
        // chromiumoxide reports "no match" as an error; an empty match set
        // is a valid answer here.
        let found = self.page.find_elements(selector).await.unwrap_or_default();
        Ok(found
            .into_iter()
            .map(|e| Box::new(ChromiumElement(e)) as Box<dyn PageElement>)
            .collect())
    }

    async fn eval_bool(&self, expression: &str) -> Result<bool, ScrapeError> {
        let result = self.page.evaluate(expression).await?;
        Ok(result.into_value::<bool>().unwrap_or(false))
    }

    async fn content(&self) -> Result<String, ScrapeError> {
        Ok(self.page.content().await?)
    }
}

struct ChromiumElement(Element);

#[async_trait]
impl PageElement for ChromiumElement {
    async fn text(&self, selector: &str) -> Result<Option<String>, ScrapeError> {
        let Ok(child) = self.0.find_element(selector).await else {
            return Ok(None);
        };
        Ok(child.inner_text().await?)
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, ScrapeError> {
        Ok(self.0.attribute(name).await?)
    }
}
