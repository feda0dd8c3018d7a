//! Report integration tests.
//!
//! Tests verify:
//! - The exact text layout for a known file
//! - Literal forms of every value kind as they appear in the report
//! - Re-running a dump produces identical bytes
//! - JSON output carries the same pages and tags
//! - A failed extraction never creates the output file

use tiff_tag_dump::{dump_tags, ExtractOptions, ReportError, ReportFormat};

use super::test_utils::{rich_tiff, two_page_tiff, ByteOrderType, TestDir};

// =============================================================================
// Text Reports
// =============================================================================

#[tokio::test]
async fn test_two_page_report() {
    let dir = TestDir::with_file("two.tif", &two_page_tiff(ByteOrderType::LittleEndian, false));
    let output = dir.path("two.txt");

    let pages = dump_tags(&dir.input, &output, ReportFormat::Text, &ExtractOptions::default())
        .await
        .unwrap();

    assert_eq!(pages, 2);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "--- Page 0 ---\n\
         ImageWidth: 100\n\
         StripOffsets: [10, 20, 30]\n\
         \n\
         --- Page 1 ---\n\
         ImageWidth: 200\n\
         \n"
    );
}

#[tokio::test]
async fn test_value_forms_in_report() {
    let dir = TestDir::with_file("rich.svs", &rich_tiff(ByteOrderType::BigEndian, true));
    let output = dir.path("rich.txt");

    dump_tags(&dir.input, &output, ReportFormat::Text, &ExtractOptions::default())
        .await
        .unwrap();

    let expected = [
        "--- Page 0 ---",
        "65000: -3",
        "65001: 1.5",
        "BitsPerSample: (8, 8, 8)",
        "Compression: 7",
        "ImageDescription: 'Aperio Image Library v11.2.1'",
        "ImageLength: 32914",
        "ImageWidth: 46000",
        "JPEGTables: b'\\xff\\xd8A\\xff\\xd9'",
        "ModelPixelScaleTag: (0.25, 0.25, 0.0)",
        "Software: \"it's tifffile\"",
        "TileOffsets: [1000, 2000]",
        "TileWidth: 256",
        "XResolution: (72, 1)",
        "",
        "",
    ]
    .join("\n");

    assert_eq!(std::fs::read_to_string(&output).unwrap(), expected);
}

#[tokio::test]
async fn test_report_is_idempotent() {
    let dir = TestDir::with_file("rich.tif", &rich_tiff(ByteOrderType::LittleEndian, false));
    let output = dir.path("rich.txt");
    let options = ExtractOptions::default();

    dump_tags(&dir.input, &output, ReportFormat::Text, &options)
        .await
        .unwrap();
    let first = std::fs::read(&output).unwrap();

    dump_tags(&dir.input, &output, ReportFormat::Text, &options)
        .await
        .unwrap();
    let second = std::fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_every_layout_renders_the_same_report() {
    let mut reports = Vec::new();
    for (order, bigtiff) in [
        (ByteOrderType::LittleEndian, false),
        (ByteOrderType::BigEndian, false),
        (ByteOrderType::LittleEndian, true),
    ] {
        let dir = TestDir::with_file("slide.tif", &rich_tiff(order, bigtiff));
        let output = dir.path("slide.txt");
        dump_tags(&dir.input, &output, ReportFormat::Text, &ExtractOptions::default())
            .await
            .unwrap();
        reports.push(std::fs::read_to_string(&output).unwrap());
    }

    assert_eq!(reports[0], reports[1]);
    assert_eq!(reports[0], reports[2]);
}

// =============================================================================
// JSON Reports
// =============================================================================

#[tokio::test]
async fn test_json_report() {
    let dir = TestDir::with_file("two.tif", &two_page_tiff(ByteOrderType::BigEndian, false));
    let output = dir.path("two.json");

    dump_tags(&dir.input, &output, ReportFormat::Json, &ExtractOptions::default())
        .await
        .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([
            {"page": 0, "tags": {"ImageWidth": 100, "StripOffsets": [10, 20, 30]}},
            {"page": 1, "tags": {"ImageWidth": 200}}
        ])
    );
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_corrupt_input_leaves_no_output() {
    let dir = TestDir::with_file("corrupt.tif", b"MM\x00\x2a\xff\xff\xff\xff");
    let output = dir.path("corrupt.txt");

    let result = dump_tags(&dir.input, &output, ReportFormat::Text, &ExtractOptions::default()).await;

    assert!(matches!(result, Err(ReportError::UnreadableFile { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_unwritable_output() {
    let dir = TestDir::with_file("two.tif", &two_page_tiff(ByteOrderType::LittleEndian, false));
    let output = dir.path("missing-dir").join("two.txt");

    let result = dump_tags(&dir.input, &output, ReportFormat::Text, &ExtractOptions::default()).await;

    match result {
        Err(ReportError::Write { path, .. }) => assert_eq!(path, output),
        other => panic!("expected Write error, got {:?}", other),
    }
}
