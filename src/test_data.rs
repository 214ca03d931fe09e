//! Synthetic fonts and collections for unit tests.

use crate::{
    checksum::table_checksum,
    tables::{Tag, head::HEAD_MAGIC_NUMBER},
};

/// Adjustment value carried by [`head`], deliberately wrong
pub const STALE_ADJUSTMENT: u32 = 0xAAAA_AAAA;

/// A 54 byte `head` table with a stale checksum adjustment
pub fn head() -> Vec<u8> {
    let mut head = vec![0u8; 54];
    head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    head[8..12].copy_from_slice(&STALE_ADJUSTMENT.to_be_bytes());
    head[12..16].copy_from_slice(&HEAD_MAGIC_NUMBER.to_be_bytes());
    head[18..20].copy_from_slice(&1000u16.to_be_bytes());
    head
}

/// A standalone font holding `tables` in the given order, each padded
/// to 4 bytes
pub fn font(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&num_tables.to_be_bytes());
    out.extend_from_slice(&[0, 16, 0, 0, 0, 0]);

    let mut offset = 12 + 16 * tables.len() as u32;
    for (tag, data) in tables {
        out.extend_from_slice(&tag[..]);
        out.extend_from_slice(&table_checksum(Tag::new(tag), data).to_be_bytes());
        out.extend_from_slice(&offset.to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        offset += (data.len() as u32).next_multiple_of(4);
    }
    for (_, data) in tables {
        out.extend_from_slice(data);
        out.resize(out.len().next_multiple_of(4), 0);
    }
    out
}

/// Bundles standalone fonts into a version 1 collection, moving every
/// table offset to its position in the collection
pub fn collection(fonts: &[Vec<u8>]) -> Vec<u8> {
    let mut out = b"ttcf".to_vec();
    out.extend_from_slice(&[0, 1, 0, 0]);
    out.extend_from_slice(&(fonts.len() as u32).to_be_bytes());

    let mut base = 12 + 4 * fonts.len();
    for font in fonts {
        out.extend_from_slice(&(base as u32).to_be_bytes());
        base += font.len();
    }

    for font in fonts {
        let base = out.len() as u32;
        let mut font = font.clone();
        let num_tables = u16::from_be_bytes([font[4], font[5]]) as usize;
        for index in 0..num_tables {
            let at = 12 + 16 * index + 8;
            let offset = u32::from_be_bytes([font[at], font[at + 1], font[at + 2], font[at + 3]]);
            font[at..at + 4].copy_from_slice(&(offset + base).to_be_bytes());
        }
        out.extend_from_slice(&font);
    }
    out
}
