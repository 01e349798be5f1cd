//! # Printout Pipeline Tests
//!
//! End-to-end over the software half of a print: SQLite store lookup,
//! print formatting, and ESC/POS byte generation — everything short of
//! the serial device.

use rusqlite::{Connection, params};
use tirada::format::{PrintOp, TEAR_OFF_LINES, format_card};
use tirada::printer::escpos;
use tirada::store::{CardStore, SqliteStore};
use tirada::wrap::LINE_WIDTH;

/// A tiny valid PNG: 16x16, half black, half white.
fn fixture_png() -> Vec<u8> {
    let img = image::GrayImage::from_fn(16, 16, |_, y| {
        image::Luma([if y < 8 { 0u8 } else { 255u8 }])
    });
    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    png
}

fn fixture_db() -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().unwrap();
    let connection = Connection::open(file.path()).unwrap();
    connection
        .execute_batch(
            "CREATE TABLE cards (
                 id INTEGER PRIMARY KEY,
                 name TEXT NOT NULL,
                 description TEXT NOT NULL,
                 value INTEGER NOT NULL,
                 illustration BLOB NOT NULL
             )",
        )
        .unwrap();
    connection
        .execute(
            "INSERT INTO cards VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                1,
                "Giant Growth",
                "Target creature gets +3/+3 until end of turn.\nA classic.",
                10,
                fixture_png()
            ],
        )
        .unwrap();
    file
}

#[test]
fn selected_card_formats_into_a_complete_printout() {
    let db = fixture_db();
    let mut store = SqliteStore::open(db.path()).unwrap();

    let card = store.select_random(10).unwrap().unwrap();
    let ops = format_card(&card);

    // Image first, description lines wrapped, tear-off blanks last.
    assert!(matches!(ops[0], PrintOp::Image(_)));
    let lines: Vec<&String> = ops
        .iter()
        .filter_map(|op| match op {
            PrintOp::Text(line) => Some(line),
            PrintOp::Image(_) => None,
        })
        .collect();
    assert!(lines.iter().all(|l| l.chars().count() <= LINE_WIDTH));
    assert!(lines.iter().any(|l| l.contains("A classic.")));
    assert!(
        lines[lines.len() - TEAR_OFF_LINES..]
            .iter()
            .all(|l| l.is_empty())
    );
}

#[test]
fn printout_compiles_to_escpos_bytes() {
    let db = fixture_db();
    let mut store = SqliteStore::open(db.path()).unwrap();
    let card = store.select_random(10).unwrap().unwrap();

    let mut bytes = Vec::new();
    for op in format_card(&card) {
        match op {
            PrintOp::Image(png) => {
                let raster = tirada::printer::Raster::decode_png(&png).unwrap();
                bytes.extend(escpos::bit_image_column(&raster));
            }
            PrintOp::Text(line) => bytes.extend(escpos::text(&line)),
        }
    }

    // The image sequence opens by tightening line spacing and the
    // printout ends with the three tear-off line feeds.
    assert_eq!(&bytes[..3], &[0x1B, b'3', 16]);
    assert_eq!(&bytes[bytes.len() - 3..], &[0x0A, 0x0A, 0x0A]);
}

#[test]
fn lookup_without_matches_is_explicitly_empty() {
    let db = fixture_db();
    let mut store = SqliteStore::open(db.path()).unwrap();
    assert!(store.select_random(3).unwrap().is_none());
}
