use std::time::Duration;

/// Everything site-specific in one immutable value, passed to each stage
/// at call time instead of living in ambient globals.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Domain root, with trailing slash. Doubles as the playlist referer.
    pub domain: String,
    /// User agent for both the browser session and the playlist header.
    pub user_agent: String,

    /// Frame on the home page whose `src` carries the default stream id.
    pub frame_selector: String,
    /// Container populated client-side with the channel listing.
    pub list_container_selector: String,
    /// Qualifying list items inside the container.
    pub item_selector: String,
    /// Sub-element holding the display name.
    pub name_selector: String,
    /// Optional sub-element holding the schedule time.
    pub time_selector: String,
    /// Item attribute whose query string carries the stream id.
    pub link_attribute: String,
    /// Query parameter name of the stream id.
    pub id_param: String,

    /// Marker text stripped from names / excluded as a schedule suffix.
    pub live_marker: String,
    /// Display name used when an item has no name sub-element.
    pub nameless_label: String,

    /// Home page navigation timeout.
    pub home_timeout: Duration,
    /// Event page navigation timeout.
    pub event_timeout: Duration,
    /// Frame existence-polling timeout.
    pub selector_timeout: Duration,
    /// Settle delay before reading the client-rendered listing.
    pub settle_delay: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            domain: "https://tvjustin.com/".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36"
                .to_string(),
            frame_selector: "iframe#customIframe".to_string(),
            list_container_selector: ".macListe#hepsi".to_string(),
            item_selector: ".mac[data-url]".to_string(),
            name_selector: ".takimlar".to_string(),
            time_selector: ".saat".to_string(),
            link_attribute: "data-url".to_string(),
            id_param: "id".to_string(),
            live_marker: "CANLI".to_string(),
            nameless_label: "İsimsiz Kanal".to_string(),
            home_timeout: Duration::from_secs(25),
            event_timeout: Duration::from_secs(20),
            selector_timeout: Duration::from_secs(15),
            settle_delay: Duration::from_secs(5),
        }
    }
}

impl ScrapeConfig {
    /// Full selector for qualifying items, scoped to the listing container.
    #[must_use]
    pub fn scoped_item_selector(&self) -> String {
        format!("{} {}", self.list_container_selector, self.item_selector)
    }

    /// Domain root without the trailing slash, used as the playlist origin.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.domain.trim_end_matches('/')
    }
}
