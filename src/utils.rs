use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;

use crate::types::{
    ArtistName, CurrentlyPlaying, SnapshotAlbum, SnapshotItem, TokenInfo, TrackSnapshot,
};

/// Seconds before the literal expiry at which a token is refreshed.
pub const REFRESH_MARGIN_SECS: i64 = 60;

pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

pub fn is_token_expiring(token: &TokenInfo, now: i64) -> bool {
    token.expires_at.saturating_sub(now) < REFRESH_MARGIN_SECS
}

/// Returns true when every scope in `requested` was granted.
pub fn scope_covers(granted: &str, requested: &str) -> bool {
    let granted: HashSet<&str> = granted.split_whitespace().collect();
    requested.split_whitespace().all(|s| granted.contains(s))
}

/// `Authorization` header value for the token endpoint.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = format!("{}:{}", client_id, client_secret);
    format!("Basic {}", STANDARD.encode(credentials))
}

/// Reduces the upstream "currently playing" payload to a [`TrackSnapshot`].
///
/// A missing payload, a paused player and a payload without a track
/// (ads, episodes without album data) all yield the idle snapshot.
pub fn shape_currently_playing(payload: Option<CurrentlyPlaying>) -> TrackSnapshot {
    let Some(current) = payload else {
        return TrackSnapshot::idle();
    };
    if !current.is_playing {
        return TrackSnapshot::idle();
    }
    let Some(item) = current.item else {
        return TrackSnapshot::idle();
    };
    let Some(album) = item.album else {
        return TrackSnapshot::idle();
    };

    TrackSnapshot {
        is_playing: true,
        item: Some(SnapshotItem {
            id: item.id,
            name: item.name,
            artists: item
                .artists
                .into_iter()
                .map(|a| ArtistName { name: a.name })
                .collect(),
            album: SnapshotAlbum {
                name: album.name,
                images: album.images,
            },
        }),
        progress_ms: current.progress_ms,
        duration_ms: item.duration_ms,
    }
}
