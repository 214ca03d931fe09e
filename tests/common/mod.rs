use std::{fs, path::Path};

/// A minimal `head` table: version 1.0, a stale checksum adjustment and
/// the magic number
pub fn head(revision: u32) -> Vec<u8> {
    let mut head = vec![0u8; 54];
    head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    head[4..8].copy_from_slice(&revision.to_be_bytes());
    head[8..12].copy_from_slice(&0x1234_5678u32.to_be_bytes());
    head[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
    head[18..20].copy_from_slice(&2048u16.to_be_bytes());
    head
}

fn sum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

/// Builds a version 1 collection. Each font's tables are laid out after
/// all offset tables and directories, so payloads of different fonts
/// interleave with nothing but their absolute offsets tying them together.
pub fn collection(fonts: &[Vec<(&[u8; 4], Vec<u8>)>]) -> Vec<u8> {
    let header_len = 12 + 4 * fonts.len();
    let directories_len: usize = fonts.iter().map(|tables| 12 + 16 * tables.len()).sum();

    let mut out = b"ttcf".to_vec();
    out.extend_from_slice(&[0, 1, 0, 0]);
    out.extend_from_slice(&(fonts.len() as u32).to_be_bytes());

    let mut directory_at = header_len;
    for tables in fonts {
        out.extend_from_slice(&(directory_at as u32).to_be_bytes());
        directory_at += 12 + 16 * tables.len();
    }

    let mut payload_at = header_len + directories_len;
    let mut payloads = Vec::new();
    for tables in fonts {
        out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
        out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
        out.extend_from_slice(&[0, 32, 0, 1, 0, 0]);
        for (tag, data) in tables {
            let mut for_sum = data.clone();
            if &tag[..] == b"head" {
                for_sum[8..12].fill(0);
            }
            out.extend_from_slice(&tag[..]);
            out.extend_from_slice(&sum(&for_sum).to_be_bytes());
            out.extend_from_slice(&(payload_at as u32).to_be_bytes());
            out.extend_from_slice(&(data.len() as u32).to_be_bytes());

            payloads.extend_from_slice(data);
            let padded = payloads.len().next_multiple_of(4);
            payloads.resize(padded, 0);
            payload_at += data.len().next_multiple_of(4);
        }
    }
    out.extend_from_slice(&payloads);
    out
}

/// Two fonts sharing nothing but the container
pub fn two_fonts() -> Vec<u8> {
    collection(&[
        vec![
            (b"head", head(0x0001_0000)),
            (b"glyf", vec![1, 2, 3, 4, 5, 6, 7]),
            (b"name", b"Regular".to_vec()),
        ],
        vec![
            (b"head", head(0x0002_0000)),
            (b"glyf", vec![9; 13]),
            (b"name", b"Bold".to_vec()),
            (b"post", vec![0, 3, 0, 0]),
        ],
    ])
}

pub fn write(path: &Path, data: &[u8]) {
    fs::write(path, data).unwrap();
}
