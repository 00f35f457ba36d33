use nowplaying::types::{
    CurrentlyPlaying, Image, PlayingAlbum, PlayingArtist, PlayingItem, TokenInfo, TrackSnapshot,
};
use nowplaying::utils::*;
use serde_json::json;

// Helper function to create a token expiring at the given timestamp
fn create_test_token(expires_at: i64) -> TokenInfo {
    TokenInfo {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires_at,
        scope: "user-read-currently-playing".to_string(),
        token_type: "Bearer".to_string(),
    }
}

// Helper function to create a playing payload with the given artists
fn create_test_payload(is_playing: bool, artists: &[&str]) -> CurrentlyPlaying {
    CurrentlyPlaying {
        is_playing,
        progress_ms: Some(42_000),
        item: Some(PlayingItem {
            id: Some("track-1".to_string()),
            name: "Song".to_string(),
            artists: artists
                .iter()
                .map(|name| PlayingArtist {
                    name: name.to_string(),
                })
                .collect(),
            album: Some(PlayingAlbum {
                name: "Album".to_string(),
                images: vec![Image {
                    url: "https://i.scdn.co/image/64".to_string(),
                    height: Some(64),
                    width: Some(64),
                }],
            }),
            duration_ms: Some(200_000),
        }),
    }
}

#[test]
fn test_is_token_expiring_boundary() {
    let now = 1_700_000_000;

    // Exactly the margin left: still valid
    assert!(!is_token_expiring(&create_test_token(now + 60), now));
    assert!(!is_token_expiring(&create_test_token(now + 3600), now));

    // Less than the margin left: refresh
    assert!(is_token_expiring(&create_test_token(now + 59), now));
    assert!(is_token_expiring(&create_test_token(now), now));

    // Already expired
    assert!(is_token_expiring(&create_test_token(now - 3600), now));
}

#[test]
fn test_is_token_expiring_extreme_timestamps() {
    let now = 1_700_000_000;

    // Corrupt cache values must not overflow
    assert!(is_token_expiring(&create_test_token(i64::MIN), now));
    assert!(!is_token_expiring(&create_test_token(i64::MAX), now));
    assert!(!is_token_expiring(&create_test_token(i64::MAX), i64::MIN));
}

#[test]
fn test_scope_covers() {
    assert!(scope_covers(
        "user-read-currently-playing",
        "user-read-currently-playing"
    ));

    // Order and extra grants do not matter
    assert!(scope_covers(
        "user-read-private user-read-currently-playing",
        "user-read-currently-playing"
    ));

    assert!(!scope_covers(
        "user-read-private",
        "user-read-currently-playing"
    ));
    assert!(!scope_covers("", "user-read-currently-playing"));

    // Nothing requested is always covered
    assert!(scope_covers("user-read-private", ""));
}

#[test]
fn test_basic_auth_header() {
    // base64("client:secret")
    assert_eq!(
        basic_auth_header("client", "secret"),
        "Basic Y2xpZW50OnNlY3JldA=="
    );
}

#[test]
fn test_shape_missing_payload_is_idle() {
    assert_eq!(shape_currently_playing(None), TrackSnapshot::idle());
}

#[test]
fn test_shape_paused_player_is_idle() {
    let snapshot = shape_currently_playing(Some(create_test_payload(false, &["A"])));

    assert_eq!(snapshot, TrackSnapshot::idle());
    assert_eq!(
        serde_json::to_value(&snapshot).unwrap(),
        json!({ "is_playing": false })
    );
}

#[test]
fn test_shape_without_item_is_idle() {
    let payload = CurrentlyPlaying {
        is_playing: true,
        progress_ms: Some(1_000),
        item: None,
    };

    assert_eq!(shape_currently_playing(Some(payload)), TrackSnapshot::idle());
}

#[test]
fn test_shape_without_album_is_idle() {
    let mut payload = create_test_payload(true, &["A"]);
    if let Some(item) = payload.item.as_mut() {
        item.album = None;
    }

    assert_eq!(shape_currently_playing(Some(payload)), TrackSnapshot::idle());
}

#[test]
fn test_shape_playing_track() {
    let snapshot = shape_currently_playing(Some(create_test_payload(true, &["A", "B", "C"])));

    assert!(snapshot.is_playing);
    assert_eq!(snapshot.progress_ms, Some(42_000));
    assert_eq!(snapshot.duration_ms, Some(200_000));

    let item = snapshot.item.expect("item should be present");
    assert_eq!(item.id.as_deref(), Some("track-1"));
    assert_eq!(item.name, "Song");
    assert_eq!(item.album.name, "Album");
    assert_eq!(item.album.images.len(), 1);

    // Artist order is preserved
    let names: Vec<&str> = item.artists.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn test_shape_serialized_shape() {
    let snapshot = shape_currently_playing(Some(create_test_payload(true, &["A"])));

    assert_eq!(
        serde_json::to_value(&snapshot).unwrap(),
        json!({
            "is_playing": true,
            "item": {
                "id": "track-1",
                "name": "Song",
                "artists": [{ "name": "A" }],
                "album": {
                    "name": "Album",
                    "images": [{ "url": "https://i.scdn.co/image/64", "height": 64, "width": 64 }]
                }
            },
            "progress_ms": 42000,
            "duration_ms": 200000
        })
    );
}

#[test]
fn test_upstream_payload_tolerates_nulls() {
    // Local files come without id or album images, ads without an item
    let local_file: CurrentlyPlaying = serde_json::from_value(json!({
        "is_playing": true,
        "progress_ms": null,
        "currently_playing_type": "track",
        "item": {
            "id": null,
            "name": "Local Song",
            "artists": [{ "name": "Someone", "id": null }],
            "album": { "name": "", "images": [] },
            "duration_ms": 1000
        }
    }))
    .unwrap();

    let snapshot = shape_currently_playing(Some(local_file));
    assert!(snapshot.is_playing);
    assert_eq!(snapshot.progress_ms, None);
    assert_eq!(snapshot.item.unwrap().id, None);

    let ad: CurrentlyPlaying = serde_json::from_value(json!({
        "is_playing": true,
        "currently_playing_type": "ad",
        "item": null
    }))
    .unwrap();
    assert_eq!(shape_currently_playing(Some(ad)), TrackSnapshot::idle());
}
