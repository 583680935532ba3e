use std::sync::LazyLock;

use regex::Regex;

/// Group for match listings caught by the fallback heuristics.
pub const MATCH_GROUP: &str = "Maç Yayınları";

/// Group for names no rule recognizes.
pub const DEFAULT_GROUP: &str = "Diğer Kanallar";

/// Ordered (label, keywords) table. A slice, not a map: the scan order is
/// part of the contract, the first group whose any keyword occurs in the
/// lower-cased name wins.
static GROUP_TABLE: &[(&str, &[&str])] = &[
    ("BeinSports", &["bein sports", "beın sports", " bs", " bein "]),
    ("S Sports", &["s sport"]),
    ("Tivibu", &["tivibu spor", "tivibu"]),
    ("Exxen", &["exxen"]),
    (
        "Ulusal Kanallar",
        &[
            "a spor",
            "trt spor",
            "trt 1",
            "tv8",
            "atv",
            "kanal d",
            "show tv",
            "star tv",
            "trt yıldız",
            "a2",
        ],
    ),
    (
        "Spor",
        &[
            "smart spor",
            "nba tv",
            "eurosport",
            "sport tv",
            "premier sports",
            "ht spor",
            "sports tv",
            "d smart",
            "d-smart",
        ],
    ),
    ("Yarış", &["tjk tv"]),
    (
        "Belgesel",
        &[
            "national geographic",
            "nat geo",
            "discovery",
            "dmax",
            "bbc earth",
            "history",
        ],
    ),
    (
        "Film & Dizi",
        &[
            "bein series",
            "bein movies",
            "movie smart",
            "filmbox",
            "sinema tv",
        ],
    ),
    ("Haber", &["haber", "cnn", "ntv"]),
    ("Diğer", &["gs tv", "fb tv", "cbc sport"]),
];

static SCHEDULED_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{2}:\d{2}\)").unwrap());

/// Maps a channel name to its playlist group.
///
/// Keyword table first, in declaration order; then a parenthesized
/// `HH:MM` token or a `" - "` separator marks a match broadcast. The
/// table always beats the fallbacks.
#[must_use]
pub fn channel_group(name: &str) -> &'static str {
    let lowered = name.to_lowercase();
    for (label, keywords) in GROUP_TABLE {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return label;
        }
    }
    if SCHEDULED_TIME_RE.is_match(name) || name.contains(" - ") {
        return MATCH_GROUP;
    }
    DEFAULT_GROUP
}
