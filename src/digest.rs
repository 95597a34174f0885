use crate::record::Record;
use crate::value::{Number, Value, ValueMap};
use xxhash_rust::xxh64::xxh64;

// ─── Type Tags ──────────────────────────────────────────────────────────────
pub const TAG_NIL: u8 = 0;
pub const TAG_BOOL: u8 = 1;
pub const TAG_INT: u8 = 2; // I64 and U64 share one tag
pub const TAG_F64: u8 = 3;
pub const TAG_STR: u8 = 4;
pub const TAG_ARRAY: u8 = 5;
pub const TAG_MAP: u8 = 6;
pub const TAG_RECORD: u8 = 7;

const SEED: u64 = 0;

// ─── Encoding ───────────────────────────────────────────────────────────────
//
//  value  := tag:u8 payload
//  INT    := i128 (LE, 16 bytes)
//  F64    := canonical bits u64 (LE); -0.0 folds into 0.0, all NaNs into one
//  STR    := len:u32 (LE) bytes
//  ARRAY  := count:u32 (LE) value*
//  MAP    := count:u32 (LE) entry_hash:u64* (LE, sorted)
//  RECORD := STR(type name or "") MAP
//
// Map entries are hashed individually and sorted, so the digest does not
// depend on insertion order. Strictly equal values always encode identically.

/// Append the tagged encoding of `value` to `buf`.
pub fn write_value_into(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Nil => buf.push(TAG_NIL),
        Value::Bool(b) => {
            buf.push(TAG_BOOL);
            buf.push(*b as u8);
        }
        Value::Number(n) => write_number_into(buf, *n),
        Value::Str(s) => {
            buf.push(TAG_STR);
            write_bytes(buf, s.as_bytes());
        }
        Value::Array(arr) => {
            buf.push(TAG_ARRAY);
            buf.extend_from_slice(&(arr.len() as u32).to_le_bytes());
            for v in arr {
                write_value_into(buf, v);
            }
        }
        Value::Map(map) => write_map_into(buf, map.iter().map(|(k, v)| (k.as_str(), v))),
        Value::Record(record) => write_record_into(buf, record),
    }
}

fn write_number_into(buf: &mut Vec<u8>, n: Number) {
    match n {
        Number::F64(f) => {
            buf.push(TAG_F64);
            buf.extend_from_slice(&canonical_f64_bits(f).to_le_bytes());
        }
        _ => {
            buf.push(TAG_INT);
            let i = n.as_integer().unwrap_or_default();
            buf.extend_from_slice(&i.to_le_bytes());
        }
    }
}

#[inline]
fn canonical_f64_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0
    } else {
        f.to_bits()
    }
}

#[inline]
fn write_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    buf.extend_from_slice(bytes);
}

fn write_map_into<'a>(buf: &mut Vec<u8>, entries: impl Iterator<Item = (&'a str, &'a Value)>) {
    let mut hashes: Vec<u64> = entries
        .map(|(k, v)| {
            let mut entry = Vec::new();
            write_bytes(&mut entry, k.as_bytes());
            write_value_into(&mut entry, v);
            xxh64(&entry, SEED)
        })
        .collect();
    hashes.sort_unstable();

    buf.push(TAG_MAP);
    buf.extend_from_slice(&(hashes.len() as u32).to_le_bytes());
    for h in hashes {
        buf.extend_from_slice(&h.to_le_bytes());
    }
}

fn write_record_into(buf: &mut Vec<u8>, record: &Record) {
    buf.push(TAG_RECORD);
    write_bytes(buf, record.record_type().name().unwrap_or("").as_bytes());
    write_map_into(buf, record.pairs().map(|(k, v)| (k.as_str(), v)));
}

// ─── Digests ────────────────────────────────────────────────────────────────

/// xxh64 digest of a single value.
pub fn digest_value(value: &Value) -> u64 {
    let mut buf = Vec::new();
    write_value_into(&mut buf, value);
    xxh64(&buf, SEED)
}

/// xxh64 digest of a record's `to_map` content.
pub fn digest_record(record: &Record) -> u64 {
    let mut buf = Vec::new();
    write_map_into(&mut buf, record.pairs().map(|(k, v)| (k.as_str(), v)));
    xxh64(&buf, SEED)
}

/// xxh64 digest of a plain map, equal to [`digest_record`] for a record with the same content.
pub fn digest_map(map: &ValueMap) -> u64 {
    let mut buf = Vec::new();
    write_map_into(&mut buf, map.iter().map(|(k, v)| (k.as_str(), v)));
    xxh64(&buf, SEED)
}
