//! Serializer output must survive the cleanup tool's pairing logic.

use tvjustin_m3u::cleanup;
use tvjustin_m3u::config::ScrapeConfig;
use tvjustin_m3u::playlist::{self, PlaylistHeader};
use tvjustin_m3u::scrape::ChannelRecord;

const BASE: &str = "https://cdn.example.com/checklist/";

fn record(name: &str, id: &str) -> ChannelRecord {
    ChannelRecord {
        name: name.to_string(),
        stream_id: id.to_string(),
    }
}

fn header() -> PlaylistHeader {
    PlaylistHeader::from_config(&ScrapeConfig::default())
}

#[test]
fn distinct_names_round_trip_losslessly() {
    let channels = vec![
        record("ATV", "10"),
        record("beIN Sports 1", "20"),
        record("Galatasaray - Fenerbahçe (20:45)", "30"),
    ];
    let entries = playlist::build_entries(BASE, &channels);
    let text = playlist::render(&header(), &entries);

    let parsed = cleanup::parse(&text);
    assert_eq!(parsed.header.len(), 4);
    assert_eq!(parsed.pairs.len(), 3);
    for (pair, channel) in parsed.pairs.iter().zip(&channels) {
        assert_eq!(pair.name, channel.name);
        assert_eq!(pair.url, playlist::media_url(BASE, &channel.stream_id));
    }

    // Cleaning an already deduplicated playlist keeps every pair.
    let (_, kept) = cleanup::clean(&text).unwrap();
    assert_eq!(kept, 3);
}

#[test]
fn colliding_names_collapse_to_first_occurrence() {
    let channels = vec![
        record("ATV", "10"),
        record("ATV", "11"),
        record("TV8", "12"),
    ];
    let entries = playlist::build_entries(BASE, &channels);
    let text = playlist::render(&header(), &entries);

    let (cleaned, kept) = cleanup::clean(&text).unwrap();
    assert_eq!(kept, 2);
    assert!(cleaned.contains(&playlist::media_url(BASE, "10")));
    assert!(!cleaned.contains(&playlist::media_url(BASE, "11")));
    assert!(cleaned.contains(&playlist::media_url(BASE, "12")));
}

#[test]
fn raw_scrape_scenario_yields_one_atv_entry() {
    // Lister output for the scheduled-duplicate scenario: the CANLI
    // sentinel never became a suffix, so both records share a name.
    let raw = vec![record("ATV", "10"), record("ATV", "11")];

    let deduped = playlist::dedup_channels(raw);
    assert_eq!(deduped, [record("ATV", "10")]);

    let entries = playlist::build_entries(BASE, &deduped);
    let text = playlist::render(&header(), &entries);
    let parsed = cleanup::parse(&text);
    assert_eq!(parsed.pairs.len(), 1);
    assert_eq!(parsed.pairs[0].url, playlist::media_url(BASE, "10"));
}

#[test]
fn header_directives_pass_through_verbatim() {
    let entries = playlist::build_entries(BASE, &[record("ATV", "10")]);
    let text = playlist::render(&header(), &entries);

    let (cleaned, _) = cleanup::clean(&text).unwrap();
    let cfg = ScrapeConfig::default();
    let lines: Vec<&str> = cleaned.lines().collect();
    assert_eq!(lines[0], "#EXTM3U");
    assert_eq!(lines[1], format!("#EXT-X-USER-AGENT:{}", cfg.user_agent));
    assert_eq!(lines[2], format!("#EXT-X-REFERER:{}", cfg.domain));
    assert_eq!(lines[3], format!("#EXT-X-ORIGIN:{}", cfg.origin()));
}
