//! Genius catalog client
//!
//! Artist lookup and song listing go through the JSON API; the lyrics
//! themselves only exist on the public song pages, so those are fetched as
//! HTML and the lyric containers are extracted.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::progress::{create_progress_bar, create_spinner};
use crate::provider::LyricsProvider;
use crate::retry::RetryPolicy;

const API_BASE: &str = "https://api.genius.com";

/// Songs requested per page of the artist listing
const SONGS_PER_PAGE: u32 = 50;

/// Marker attribute of the elements holding the lyrics on a song page
const LYRICS_CONTAINER: &str = r#"data-lyrics-container="true""#;

/// Marker attribute of page furniture nested inside the lyric containers
const EXCLUDED_FROM_SELECTION: &str = r#"data-exclude-from-selection="true""#;

lazy_static! {
    static ref DIV_TAG: Regex = Regex::new(r"(?i)<(/?)div\b").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap();
}

/// Settings for [`GeniusProvider`]
#[derive(Debug, Clone)]
pub struct GeniusConfig {
    /// API access token
    pub token: String,
    /// Timeout for every HTTP request
    pub timeout: Duration,
    /// Stop listing songs after this many
    pub max_songs: Option<usize>,
    /// Applied to the artist lookup and song listing
    pub retry: RetryPolicy,
    pub show_progress: bool,
}

impl GeniusConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            timeout: Duration::from_secs(15),
            max_songs: None,
            retry: RetryPolicy::default(),
            show_progress: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "type")]
    kind: String,
    result: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    primary_artist: Artist,
}

/// Artist as listed by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artist {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct SongsPage {
    songs: Vec<Song>,
    next_page: Option<u32>,
}

/// Song entry of an artist listing
#[derive(Debug, Clone, Deserialize)]
pub struct Song {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub primary_artist: Artist,
    #[serde(default)]
    pub lyrics_state: Option<String>,
}

impl Song {
    /// Songs marked unreleased or instrumental have no lyrics page content
    fn has_lyrics(&self) -> bool {
        self.lyrics_state.as_deref().map_or(true, |state| state == "complete")
    }
}

/// Lyrics provider backed by genius.com
pub struct GeniusProvider {
    client: Client,
    config: GeniusConfig,
}

impl GeniusProvider {
    pub fn new(config: GeniusConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(Error::invalid(
                "a Genius access token is required (--token or GENIUS_ACCESS_TOKEN)",
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network(format!("could not build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Authenticated API call, unwrapping the `response` envelope
    fn api_get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", API_BASE, path);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.config.token)
            .query(query)
            .send()
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", path, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::provider_status(
                format!("Request to {} returned {}", path, status),
                status.as_u16(),
            ));
        }

        let envelope: Envelope<T> = resp
            .json()
            .map_err(|e| Error::Parse(format!("Invalid JSON from {}: {}", path, e)))?;
        Ok(envelope.response)
    }

    fn find_artist(&self, name: &str) -> Result<Artist> {
        let search: SearchResponse = self.api_get("/search", &[("q", name.to_string())])?;
        pick_artist(&search.hits, name).ok_or_else(|| Error::artist_not_found(name))
    }

    fn list_songs(&self, artist: &Artist) -> Result<Vec<Song>> {
        let path = format!("/artists/{}/songs", artist.id);
        let mut songs = Vec::new();
        let mut page = Some(1u32);

        while let Some(current) = page {
            let listing: SongsPage = self.api_get(
                &path,
                &[
                    ("per_page", SONGS_PER_PAGE.to_string()),
                    ("page", current.to_string()),
                    ("sort", "popularity".to_string()),
                ],
            )?;

            songs.extend(
                listing
                    .songs
                    .into_iter()
                    .filter(|song| song.primary_artist.id == artist.id && song.has_lyrics()),
            );

            if let Some(max) = self.config.max_songs {
                if songs.len() >= max {
                    songs.truncate(max);
                    break;
                }
            }
            page = listing.next_page;
        }

        Ok(songs)
    }

    fn song_lyrics(&self, song: &Song) -> Result<Option<String>> {
        let resp = self
            .client
            .get(&song.url)
            .send()
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", song.url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::provider_status(
                format!("Song page {} returned {}", song.url, status),
                status.as_u16(),
            ));
        }

        let html = resp
            .text()
            .map_err(|e| Error::Network(format!("Reading {} failed: {}", song.url, e)))?;
        Ok(extract_lyrics(&html))
    }
}

impl LyricsProvider for GeniusProvider {
    fn name(&self) -> &str {
        "genius"
    }

    fn fetch_lyrics(&self, artist: &str) -> Result<Vec<String>> {
        log::info!("Searching Genius for {}", artist);

        let spinner = if self.config.show_progress {
            create_spinner(&format!("Looking up {}", artist))
        } else {
            indicatif::ProgressBar::hidden()
        };

        let lookup = self.config.retry.run(|attempt| {
            log::debug!("Artist lookup attempt {}", attempt);
            let found = self.find_artist(artist)?;
            let songs = self.list_songs(&found)?;
            Ok((found, songs))
        });
        spinner.finish_and_clear();
        let (found, songs) = lookup?;

        log::info!("Found {} songs by {}, downloading lyrics", songs.len(), found.name);

        let pb = if self.config.show_progress {
            create_progress_bar(songs.len() as u64, "Downloading lyrics")
        } else {
            indicatif::ProgressBar::hidden()
        };

        let mut lyrics = Vec::with_capacity(songs.len());
        for song in &songs {
            match self.song_lyrics(song) {
                Ok(Some(text)) => lyrics.push(text),
                Ok(None) => log::debug!("No lyrics on the page of '{}'", song.title),
                Err(e) => log::warn!("Could not download '{}': {} - continuing", song.title, e),
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        Ok(lyrics)
    }
}

/// Artist of the best search hit: an exact (case-insensitive) name match if
/// there is one, the primary artist of the first song hit otherwise
fn pick_artist(hits: &[SearchHit], name: &str) -> Option<Artist> {
    let wanted = name.trim().to_lowercase();
    let songs = || hits.iter().filter(|hit| hit.kind == "song");

    songs()
        .find(|hit| hit.result.primary_artist.name.to_lowercase() == wanted)
        .or_else(|| songs().next())
        .map(|hit| hit.result.primary_artist.clone())
}

/// Lyrics text of a Genius song page, `None` when the page has none
pub fn extract_lyrics(html: &str) -> Option<String> {
    let mut sections = Vec::new();
    let mut rest = html;

    while let Some(pos) = rest.find(LYRICS_CONTAINER) {
        let from_marker = &rest[pos..];
        let Some(open_end) = from_marker.find('>') else {
            break;
        };
        let body = &from_marker[open_end + 1..];
        let end = element_end(body);

        let inner = remove_marked_divs(&body[..end], EXCLUDED_FROM_SELECTION);
        sections.push(html_to_text(&inner));
        rest = &body[end..];
    }

    let lyrics = sections.join("\n").trim().to_string();
    if lyrics.is_empty() {
        None
    } else {
        Some(lyrics)
    }
}

/// Offset of the `</div>` closing the element whose content starts `body`
fn element_end(body: &str) -> usize {
    let mut depth = 1usize;
    for tag in DIV_TAG.captures_iter(body) {
        let Some(whole) = tag.get(0) else { continue };
        if tag[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return whole.start();
            }
        }
    }
    body.len()
}

/// Drop every div carrying `marker`, together with its content
fn remove_marked_divs(html: &str, marker: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find(marker) {
        let Some(start) = rest[..pos].rfind('<') else {
            break;
        };
        let Some(open_end) = rest[pos..].find('>') else {
            break;
        };
        out.push_str(&rest[..start]);

        let body = &rest[pos + open_end + 1..];
        let end = element_end(body);
        let after_close = body[end..].find('>').map_or(body.len(), |i| end + i + 1);
        rest = &body[after_close..];
    }

    out.push_str(rest);
    out
}

/// Markup to plain text: line breaks kept, tags dropped, entities decoded
fn html_to_text(html: &str) -> String {
    let with_newlines = LINE_BREAK.replace_all(html, "\n");
    let without_tags = TAG.replace_all(&with_newlines, "");
    decode_entities(&without_tags)
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<div class="Lyrics__Container" data-lyrics-container="true"><div data-exclude-from-selection="true"><div>12 Contributors</div>Song Lyrics</div>[Verse 1]<br/>I&#x27;m on the <a href="/x"><span>river road</span></a><br>Tonight &amp; forever</div>
<div class="Ad">advert</div>
<div data-lyrics-container="true">[Chorus]<br/>Oh <i>oh</i> oh</div>
</body></html>"#;

    #[test]
    fn test_extract_lyrics() {
        let lyrics = extract_lyrics(PAGE).unwrap();
        assert_eq!(
            lyrics,
            "[Verse 1]\nI'm on the river road\nTonight & forever\n[Chorus]\nOh oh oh"
        );
    }

    #[test]
    fn test_page_without_lyrics() {
        assert_eq!(extract_lyrics("<html><div>instrumental</div></html>"), None);
        assert_eq!(extract_lyrics(r#"<div data-lyrics-container="true"> </div>"#), None);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &#39;c&#39; &unknown;"), "a <b> 'c' &unknown;");
    }

    #[test]
    fn test_pick_artist_prefers_exact_name() {
        let json = r#"{"response": {"hits": [
            {"type": "song", "result": {"primary_artist": {"id": 1, "name": "Sezen Aksu & Friends"}}},
            {"type": "song", "result": {"primary_artist": {"id": 2, "name": "Sezen Aksu"}}}
        ]}}"#;
        let envelope: Envelope<SearchResponse> = serde_json::from_str(json).unwrap();

        let artist = pick_artist(&envelope.response.hits, "sezen aksu").unwrap();
        assert_eq!(artist.id, 2);

        let artist = pick_artist(&envelope.response.hits, "Sezen").unwrap();
        assert_eq!(artist.id, 1);

        assert!(pick_artist(&[], "anyone").is_none());
    }

    #[test]
    fn test_song_listing_parses() {
        let json = r#"{"response": {"next_page": null, "songs": [
            {"id": 10, "title": "A", "url": "https://genius.com/a", "primary_artist": {"id": 2, "name": "X"}, "lyrics_state": "complete"},
            {"id": 11, "title": "B", "url": "https://genius.com/b", "primary_artist": {"id": 2, "name": "X"}, "lyrics_state": "unreleased"}
        ]}}"#;
        let envelope: Envelope<SongsPage> = serde_json::from_str(json).unwrap();

        assert_eq!(envelope.response.next_page, None);
        let with_lyrics: Vec<_> = envelope.response.songs.iter().filter(|s| s.has_lyrics()).collect();
        assert_eq!(with_lyrics.len(), 1);
        assert_eq!(with_lyrics[0].title, "A");
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(GeniusProvider::new(GeniusConfig::new("  ")).is_err());
    }
}
