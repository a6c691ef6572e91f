use songferry::catalog::song::{DEFAULT_COVER_ID, cover_from};
use songferry::types::{
    DetailResponse, FallbackResponse, LoginStatusResponse, SearchResponse, SongUrlResponse,
    WikiResponse,
};
use songferry::utils::extract_wiki_tags;

#[test]
fn test_search_response_parsing() {
    let json = r#"{
        "result": {
            "songs": [
                {
                    "id": 347230,
                    "name": "海阔天空",
                    "artists": [{ "id": 11127, "name": "Beyond" }],
                    "duration": 326000
                }
            ],
            "songCount": 1
        },
        "code": 200
    }"#;

    let parsed: SearchResponse = serde_json::from_str(json).unwrap();
    let songs = parsed.result.unwrap().songs;
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].id, 347230);
    assert_eq!(songs[0].artists[0].name, "Beyond");
    assert_eq!(songs[0].duration, 326000);
}

#[test]
fn test_search_response_tolerates_missing_result() {
    // some deployments answer errors with a bare code envelope
    let parsed: SearchResponse = serde_json::from_str(r#"{ "code": 405 }"#).unwrap();
    assert!(parsed.result.is_none());
}

#[test]
fn test_detail_response_parsing_and_cover() {
    let json = r#"{
        "songs": [
            {
                "id": 347230,
                "name": "海阔天空",
                "ar": [{ "id": 11127, "name": "Beyond" }],
                "al": { "id": 34209, "name": "乐与怒", "picUrl": "https://p1.music.example/34209.jpg" },
                "dt": 326000
            }
        ],
        "code": 200
    }"#;

    let parsed: DetailResponse = serde_json::from_str(json).unwrap();
    let song = &parsed.songs[0];
    assert_eq!(song.name, "海阔天空");
    assert_eq!(song.duration_ms, 326000);
    assert_eq!(
        cover_from(song),
        Some("https://p1.music.example/34209.jpg".to_string())
    );
}

#[test]
fn test_cover_from_maps_placeholder_to_none() {
    let json = format!(
        r#"{{
            "songs": [
                {{
                    "id": 1,
                    "name": "untagged upload",
                    "ar": [],
                    "al": {{ "picUrl": "https://p1.music.example/{}.jpg" }},
                    "dt": 0
                }}
            ]
        }}"#,
        DEFAULT_COVER_ID
    );

    let parsed: DetailResponse = serde_json::from_str(&json).unwrap();
    // the default placeholder image counts as "no cover"
    assert_eq!(cover_from(&parsed.songs[0]), None);
}

#[test]
fn test_song_url_response_parsing() {
    let json = r#"{
        "data": [
            {
                "id": 347230,
                "url": "https://m801.music.example/347230.flac",
                "br": 999000,
                "size": 40713456,
                "level": "lossless",
                "type": "flac"
            }
        ],
        "code": 200
    }"#;

    let parsed: SongUrlResponse = serde_json::from_str(json).unwrap();
    let data = &parsed.data[0];
    assert_eq!(data.br, 999000);
    assert_eq!(data.kind.as_deref(), Some("flac"));
    assert!(data.url.as_deref().unwrap().ends_with(".flac"));
}

#[test]
fn test_login_status_profile_presence() {
    let valid = r#"{ "data": { "code": 200, "profile": { "userId": 84517, "nickname": "ferry" } } }"#;
    let parsed: LoginStatusResponse = serde_json::from_str(valid).unwrap();
    let profile = parsed.data.unwrap().profile.unwrap();
    assert_eq!(profile.user_id, 84517);

    // anonymous sessions answer with a null profile
    let anonymous = r#"{ "data": { "code": 200, "profile": null } }"#;
    let parsed: LoginStatusResponse = serde_json::from_str(anonymous).unwrap();
    assert!(parsed.data.unwrap().profile.is_none());
}

#[test]
fn test_wiki_tags_from_full_payload() {
    let json = r#"{
        "code": 200,
        "data": {
            "blocks": [
                {
                    "creatives": [
                        { "uiElement": { "mainTitle": { "title": "华语经典" } } },
                        { "uiElement": { "mainTitle": { "title": "摇滚" } } },
                        { "uiElement": { "mainTitle": { "title": "90年代" } } },
                        { "uiElement": { "mainTitle": { "title": "粤语" } } }
                    ]
                }
            ]
        }
    }"#;

    let parsed: WikiResponse = serde_json::from_str(json).unwrap();
    let tags = extract_wiki_tags(&parsed);

    // at most three labels, in payload order
    assert_eq!(tags, vec!["华语经典", "摇滚", "90年代"]);
}

#[test]
fn test_wiki_tags_tolerate_shallow_payloads() {
    // no data at all
    let parsed: WikiResponse = serde_json::from_str(r#"{ "code": 200 }"#).unwrap();
    assert!(extract_wiki_tags(&parsed).is_empty());

    // blocks without creatives
    let parsed: WikiResponse =
        serde_json::from_str(r#"{ "data": { "blocks": [ {} ] } }"#).unwrap();
    assert!(extract_wiki_tags(&parsed).is_empty());

    // creatives missing the nested title nodes are skipped, not fatal
    let json = r#"{
        "data": {
            "blocks": [
                {
                    "creatives": [
                        { "uiElement": {} },
                        { "uiElement": { "mainTitle": {} } },
                        { "uiElement": { "mainTitle": { "title": "民谣" } } }
                    ]
                }
            ]
        }
    }"#;
    let parsed: WikiResponse = serde_json::from_str(json).unwrap();
    assert_eq!(extract_wiki_tags(&parsed), vec!["民谣"]);
}

#[test]
fn test_fallback_response_accepts_both_url_spellings() {
    let parsed: FallbackResponse =
        serde_json::from_str(r#"{ "music_url": "https://cdn.example/a.mp3", "quality": "standard" }"#)
            .unwrap();
    assert_eq!(parsed.music_url.as_deref(), Some("https://cdn.example/a.mp3"));

    let parsed: FallbackResponse =
        serde_json::from_str(r#"{ "url": "https://cdn.example/b.mp3", "id": 99 }"#).unwrap();
    assert_eq!(parsed.music_url.as_deref(), Some("https://cdn.example/b.mp3"));
    assert_eq!(parsed.id, Some(99));
}
