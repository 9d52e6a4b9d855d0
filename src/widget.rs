//! Rendering of a playback snapshot for the browser.
//!
//! The poller publishes advertisements and tracks alike. Deciding that an
//! advertisement has "nothing meaningful to display" happens here, through
//! [`displayable_track`].

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{
    types::{PlaybackState, Track},
    utils,
};

pub const THEME_COLOR: &str = "#1DB954";
const NOTHING_PLAYING: &str = "Not listening to anything";

/// Page metadata derived from the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: Option<String>,
}

/// The track to show, or `None` when nothing is playing or an ad is running.
pub fn displayable_track(state: Option<&PlaybackState>) -> Option<&Track> {
    state
        .and_then(PlaybackState::track)
        .filter(|track| !track.is_advertisement)
}

pub fn page_meta(state: Option<&PlaybackState>, display_name: &str) -> PageMeta {
    let track = displayable_track(state);

    let title = format!(
        "Listening to: {}",
        track.map(|t| t.name.as_str()).unwrap_or(NOTHING_PLAYING)
    );
    let listening_to = match track {
        Some(t) => format!("{} by {}", t.name, t.artist_name),
        None => "nothing".to_string(),
    };

    PageMeta {
        title,
        og_title: format!("{} - Spotify Everything", display_name),
        og_description: format!("{} is currently listening to {}", display_name, listening_to),
        og_image: state
            .and_then(PlaybackState::track)
            .and_then(|t| t.album_art_url.clone()),
    }
}

/// Renders the complete widget page.
///
/// `refresh_secs` is the reload cadence of the page; `now_ms` is used to
/// extrapolate the progress bar.
pub fn render_page(
    state: Option<&PlaybackState>,
    display_name: &str,
    refresh_secs: u64,
    now_ms: i64,
) -> String {
    let meta = page_meta(state, display_name);

    let mut head = String::new();
    head.push_str(&format!(
        "<meta http-equiv=\"refresh\" content=\"{}\">\n",
        refresh_secs.max(1)
    ));
    head.push_str(&format!("<title>{}</title>\n", encode_text(&meta.title)));
    head.push_str(&meta_tag("theme-color", THEME_COLOR));
    head.push_str(&meta_tag("og:title", &meta.og_title));
    head.push_str(&meta_tag("og:description", &meta.og_description));
    if let Some(image) = &meta.og_image {
        head.push_str(&meta_tag("og:image", image));
    }

    let body = match (state, displayable_track(state)) {
        (Some(state), Some(track)) => render_card(state, track, now_ms),
        _ => "<div class=\"card empty\"><h1>Not listening to anything right now</h1></div>"
            .to_string(),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n{head}<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        head = head,
        body = body,
        STYLE = STYLE
    )
}

fn render_card(state: &PlaybackState, track: &Track, now_ms: i64) -> String {
    let percent = utils::progress_fraction(state, now_ms) * 100.0;
    let elapsed = utils::estimated_progress_ms(state, now_ms)
        .unwrap_or(0)
        .min(track.duration_ms);

    let art = track
        .album_art_url
        .as_deref()
        .map(|url| {
            format!(
                "<img class=\"art\" src=\"{}\" alt=\"Album Art\">",
                encode_double_quoted_attribute(url)
            )
        })
        .unwrap_or_default();
    let title = match &track.external_url {
        Some(url) => format!(
            "<a class=\"title\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">{}</a>",
            encode_double_quoted_attribute(url),
            encode_text(&track.name)
        ),
        None => format!("<span class=\"title\">{}</span>", encode_text(&track.name)),
    };

    format!(
        concat!(
            "<div class=\"card\">\n",
            "<div class=\"header\">{art}<div class=\"meta\">{title}",
            "<h2>{artist}</h2><h3>in {album}</h3></div></div>\n",
            "<div class=\"bar\"><div class=\"fill\" style=\"width: {percent:.2}%\"></div></div>\n",
            "<div class=\"times\"><p>{elapsed}</p><p>{total}</p></div>\n",
            "</div>"
        ),
        art = art,
        title = title,
        artist = encode_text(&track.artist_name),
        album = encode_text(&track.album_name),
        percent = percent,
        elapsed = utils::format_duration(elapsed),
        total = utils::format_duration(track.duration_ms),
    )
}

/// Short label for the kind of snapshot.
pub fn status_label(state: &PlaybackState) -> &'static str {
    match state {
        PlaybackState::Empty => "Nothing playing",
        _ if state.track().is_some_and(|t| t.is_advertisement) => "Advertisement",
        PlaybackState::Playing(_) => "Playing",
        PlaybackState::Paused(_) => "Paused",
    }
}

/// One-line description used by the terminal watcher.
pub fn status_line(state: Option<&PlaybackState>) -> String {
    let Some(state) = state else {
        return "Waiting for the first snapshot".to_string();
    };

    match displayable_track(Some(state)) {
        Some(track) => format!(
            "{}: {} by {} (in {})",
            status_label(state),
            track.name,
            track.artist_name,
            track.album_name
        ),
        None => status_label(state).to_string(),
    }
}

fn meta_tag(name: &str, content: &str) -> String {
    format!(
        "<meta name=\"{}\" content=\"{}\">\n",
        name,
        encode_double_quoted_attribute(content)
    )
}

const STYLE: &str = "\
body{margin:0;width:100vw;height:100vh;display:flex;align-items:center;justify-content:center;\
background:transparent;color:#fff;font-family:Karla,sans-serif}\
.card{padding:2rem;width:33rem;background:rgba(0,0,0,.6);border-radius:.5rem;box-sizing:border-box}\
.card.empty{height:20rem;display:flex;align-items:center;justify-content:center}\
.header{display:flex;align-items:center;margin-bottom:1.5rem}\
.art{width:8rem;height:8rem;border-radius:.375rem}\
.meta{margin-left:1.5rem;display:flex;flex-direction:column}\
.title{font-size:1.25rem;font-weight:600;color:#fff;text-decoration:none}\
h2,h3{margin:0;font-size:1.125rem;font-weight:400;color:#d1d5db}h3{font-style:italic}\
.bar{height:.35rem;border-radius:9999px;background:#374151;margin-bottom:.25rem}\
.fill{height:.35rem;border-radius:9999px;background:#d1d5db}\
.times{display:flex;justify-content:space-between;color:#9ca3af}.times p{margin:0}";
