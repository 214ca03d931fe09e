//! The TrueType checksum and the `head` table's checksum adjustment.

use crate::{CHECKSUM_ADJUSTMENT_MAGIC, HEAD_TAG, tables::Tag, tables::head::CHECKSUM_ADJUSTMENT_OFFSET};

/// Sums `bytes` as big-endian u32 words, wrapping on overflow.
/// A trailing partial word is padded with zeros.
///
/// # Examples
///
/// ```
/// use extract_ttc::checksum::file_checksum;
///
/// assert_eq!(file_checksum(&[]), 0);
/// assert_eq!(file_checksum(&[0x12, 0x34, 0x56, 0x78, 0x9A]), 0x12345678u32.wrapping_add(0x9A000000));
/// ```
pub fn file_checksum(bytes: &[u8]) -> u32 {
    let mut chunks = bytes.chunks_exact(4);
    let mut sum = chunks
        .by_ref()
        .fold(0u32, |sum, word| {
            sum.wrapping_add(u32::from_be_bytes([word[0], word[1], word[2], word[3]]))
        });

    let rest = chunks.remainder();
    if !rest.is_empty() {
        let mut last = [0u8; 4];
        last[..rest.len()].copy_from_slice(rest);
        sum = sum.wrapping_add(u32::from_be_bytes(last));
    }
    sum
}

/// The value to store in `head.checksumAdjustment` so the file sums
/// to [`CHECKSUM_ADJUSTMENT_MAGIC`].
pub fn checksum_adjustment(file_checksum: u32) -> u32 {
    CHECKSUM_ADJUSTMENT_MAGIC.wrapping_sub(file_checksum)
}

/// Checksum of a single table as recorded in the table directory.
///
/// For `head` the adjustment field counts as zero.
pub fn table_checksum(tag: Tag, payload: &[u8]) -> u32 {
    let adjustment_end = CHECKSUM_ADJUSTMENT_OFFSET + 4;
    if tag == HEAD_TAG && payload.len() >= adjustment_end {
        let adjustment = &payload[CHECKSUM_ADJUSTMENT_OFFSET..adjustment_end];
        let stored = u32::from_be_bytes([adjustment[0], adjustment[1], adjustment[2], adjustment[3]]);
        // the field is word aligned, so subtracting it is the same as zeroing it
        file_checksum(payload).wrapping_sub(stored)
    } else {
        file_checksum(payload)
    }
}
