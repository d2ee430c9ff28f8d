//! Binary transmission line file.
//!
//! Layout (little-endian):
//! - offset 128: record count (i32)
//! - offset 1024: first record, records spaced 512 bytes apart
//! - record: 20-byte NUL-padded line id, then capacity (f64) and
//!   efficiency (f64). The id field is padded to 24 bytes so the floats
//!   sit on 8-byte boundaries.

use byteorder::{ByteOrder, LittleEndian};

use crate::domain::{LineDescriptor, TransLine};
use crate::error::LoadError;

const RECORD_COUNT_POS: usize = 128;
const FIRST_RECORD_POS: usize = 1024;
const RECORD_SPACING: usize = 512;

const LINE_ID_LEN: usize = 20;
const CAPACITY_OFFSET: usize = 24;
const EFFICIENCY_OFFSET: usize = 32;
const RECORD_LEN: usize = 40;

/// Decode every line record in the file, in file order
pub fn parse_lines(bytes: &[u8]) -> Result<Vec<TransLine>, LoadError> {
    let count_bytes = bytes
        .get(RECORD_COUNT_POS..RECORD_COUNT_POS + 4)
        .ok_or_else(|| LoadError::Layout(format!("file too short for record count ({} bytes)", bytes.len())))?;
    let count = LittleEndian::read_i32(count_bytes);
    if count < 0 {
        return Err(LoadError::Layout(format!("negative record count {count}")));
    }

    (0..count as usize)
        .map(|i| decode_record(bytes, i).and_then(TransLine::try_from))
        .collect()
}

fn decode_record(bytes: &[u8], index: usize) -> Result<LineDescriptor, LoadError> {
    let pos = FIRST_RECORD_POS + index * RECORD_SPACING;
    let record = bytes.get(pos..pos + RECORD_LEN).ok_or_else(|| {
        LoadError::Layout(format!("record {index} at offset {pos} lies beyond end of file"))
    })?;

    let id_field = &record[..LINE_ID_LEN];
    let id_end = id_field.iter().position(|&b| b == 0).unwrap_or(LINE_ID_LEN);
    let line_id = String::from_utf8_lossy(&id_field[..id_end]).trim().to_string();

    Ok(LineDescriptor {
        line_id,
        max_capacity_mw: LittleEndian::read_f64(&record[CAPACITY_OFFSET..CAPACITY_OFFSET + 8]),
        efficiency: LittleEndian::read_f64(&record[EFFICIENCY_OFFSET..EFFICIENCY_OFFSET + 8]),
    })
}

/// Encode line records into the binary file layout.
///
/// Ids longer than the fixed field are truncated.
pub fn encode_lines(lines: &[LineDescriptor]) -> Vec<u8> {
    let len = FIRST_RECORD_POS + lines.len() * RECORD_SPACING;
    let mut bytes = vec![0u8; len];

    LittleEndian::write_i32(
        &mut bytes[RECORD_COUNT_POS..RECORD_COUNT_POS + 4],
        lines.len() as i32,
    );

    for (i, line) in lines.iter().enumerate() {
        let pos = FIRST_RECORD_POS + i * RECORD_SPACING;
        let record = &mut bytes[pos..pos + RECORD_LEN];

        let id = line.line_id.as_bytes();
        let n = id.len().min(LINE_ID_LEN - 1);
        record[..n].copy_from_slice(&id[..n]);

        LittleEndian::write_f64(&mut record[CAPACITY_OFFSET..CAPACITY_OFFSET + 8], line.max_capacity_mw);
        LittleEndian::write_f64(&mut record[EFFICIENCY_OFFSET..EFFICIENCY_OFFSET + 8], line.efficiency);
    }

    bytes
}
