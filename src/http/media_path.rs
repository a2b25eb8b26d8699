//! File name grammar for the `/live/...` routes.
//!
//! ```text
//! {channel}.mpd              manifest
//! {channel}-mp4a_{file}.mp4  audio segment
//! {channel}-avc1_{file}.mp4  video segment
//! ```
//!
//! The channel part is greedy: the last `-mp4a_` / `-avc1_` marker splits.

use crate::proxy::MediaFile;

/// A parsed `/live/...` file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub channel: String,
    pub file: MediaFile,
}

/// Parse the last path segment of a media route; `None` if it matches no form.
pub fn parse(name: &str) -> Option<MediaRequest> {
    if let Some(stem) = name.strip_suffix(".mp4") {
        let (channel, file, segment): (&str, &str, fn(String) -> MediaFile) =
            if let Some((channel, file)) = stem.rsplit_once("-mp4a_") {
                (channel, file, MediaFile::Audio)
            } else if let Some((channel, file)) = stem.rsplit_once("-avc1_") {
                (channel, file, MediaFile::Video)
            } else {
                return None;
            };
        if !is_plain_segment(channel) || !is_plain_segment(file) {
            return None;
        }
        return Some(MediaRequest {
            channel: channel.to_string(),
            file: segment(file.to_string()),
        });
    }

    let channel = name.strip_suffix(".mpd")?;
    is_plain_segment(channel).then(|| MediaRequest {
        channel: channel.to_string(),
        file: MediaFile::Manifest,
    })
}

// Path extraction percent-decodes, so separators can reappear here.
fn is_plain_segment(s: &str) -> bool {
    !s.is_empty() && !s.contains(|c: char| matches!(c, '/' | '?' | '#' | '\\') || c.is_control())
}
