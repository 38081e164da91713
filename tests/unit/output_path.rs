//! Filename derivation through the public API

use arena_dl::output::{block_filename, ChannelPathBuilder};
use arena_dl::{Block, ChannelSlug};
use std::path::PathBuf;

fn block_from_json(json: &str) -> Block {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_titled_jpeg_block() {
    let block = block_from_json(
        r#"{ "id": 42, "title": "Red Sky!!",
             "image": { "content_type": "image/jpeg", "original": { "url": "https://x/42" } } }"#,
    );
    assert_eq!(block_filename(&block), "42_red-sky.jpg");
}

#[test]
fn test_untitled_png_block() {
    let block = block_from_json(
        r#"{ "id": 7,
             "image": { "content_type": "image/png", "original": { "url": "https://x/7" } } }"#,
    );
    assert_eq!(block_filename(&block), "7_7.png");
}

#[test]
fn test_filenames_are_deterministic() {
    let json = r#"{ "id": 100, "title": "  Mixed CASE   title ",
                    "image": { "content_type": "image/webp", "original": { "url": "https://x" } } }"#;
    let first = block_filename(&block_from_json(json));
    let second = block_filename(&block_from_json(json));
    assert_eq!(first, "100_mixed-case-title.webp");
    assert_eq!(first, second);
}

#[test]
fn test_block_path_layout() {
    let slug = ChannelSlug::parse("moodboard").unwrap();
    let builder = ChannelPathBuilder::new(PathBuf::from("/srv/out"), &slug);
    let block = block_from_json(
        r#"{ "id": 3, "title": "A/B test",
             "image": { "content_type": "application/octet-stream", "original": { "url": "https://x" } } }"#,
    );

    assert_eq!(
        builder.block_path(&block),
        PathBuf::from("/srv/out/moodboard/3_ab-test.bin")
    );
}
