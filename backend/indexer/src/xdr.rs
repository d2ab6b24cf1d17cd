//! `ScVal` helpers for event topics and data.
//!
//! * [`plain_value`] flattens the JSON form the RPC returns under
//!   `xdrFormat: "json"` (`{"u64":"7"}`, `{"map":[{"key":..,"val":..}]}`)
//!   into ordinary JSON with struct fields as object keys.
//! * [`decode_topic`] is the fallback for nodes that still answer in base64
//!   XDR. Only the shapes the Kudos contracts put in topics are understood:
//!   symbols, `u32`/`u64` ids and addresses. Addresses have no strkey
//!   encoding here and are rendered as `account:<hex>` / `contract:<hex>`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};

const SCV_U32: u32 = 3;
const SCV_U64: u32 = 5;
const SCV_SYMBOL: u32 = 15;
const SCV_ADDRESS: u32 = 18;

const SC_ADDRESS_ACCOUNT: u32 = 0;
const SC_ADDRESS_CONTRACT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicValue {
    Symbol(String),
    U32(u32),
    U64(u64),
    Account([u8; 32]),
    Contract([u8; 32]),
}

impl TopicValue {
    pub fn render(&self) -> String {
        match self {
            Self::Symbol(s) => s.clone(),
            Self::U32(n) => n.to_string(),
            Self::U64(n) => n.to_string(),
            Self::Account(key) => format!("account:{}", hex::encode(key)),
            Self::Contract(hash) => format!("contract:{}", hex::encode(hash)),
        }
    }
}

/// Flatten one JSON-encoded `ScVal`.
///
/// Maps become objects keyed by their (symbol) keys, vectors become arrays,
/// scalars keep their JSON value (large integers stay strings). `i128`
/// given as `{"hi":..,"lo":..}` parts is joined into a decimal string.
/// Anything unrecognised is returned unchanged.
pub fn plain_value(v: &Value) -> Value {
    let Value::Object(tagged) = v else {
        return match v.as_str() {
            Some("void") => Value::Null,
            _ => v.clone(),
        };
    };
    if tagged.len() != 1 {
        return v.clone();
    }
    let Some((tag, inner)) = tagged.iter().next() else {
        return v.clone();
    };

    match tag.as_str() {
        "vec" => Value::Array(
            inner
                .as_array()
                .map(|items| items.iter().map(plain_value).collect())
                .unwrap_or_default(),
        ),
        "map" => {
            let mut out = Map::new();
            for entry in inner.as_array().into_iter().flatten() {
                let (Some(key), Some(val)) = (entry.get("key"), entry.get("val")) else {
                    continue;
                };
                let key = match plain_value(key) {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                out.insert(key, plain_value(val));
            }
            Value::Object(out)
        }
        "i128" | "u128" => match inner {
            Value::Object(parts) => join_128(parts, tag == "i128").unwrap_or_else(|| v.clone()),
            _ => inner.clone(),
        },
        "bool" | "u32" | "i32" | "u64" | "i64" | "timepoint" | "duration" | "u256" | "i256"
        | "bytes" | "string" | "symbol" | "address" => inner.clone(),
        _ => v.clone(),
    }
}

fn join_128(parts: &Map<String, Value>, signed: bool) -> Option<Value> {
    let part = |name: &str| -> Option<u64> {
        let v = parts.get(name)?;
        v.as_u64()
            .or_else(|| v.as_i64().map(|n| n as u64))
            .or_else(|| v.as_str()?.parse::<u64>().ok())
            .or_else(|| v.as_str()?.parse::<i64>().ok().map(|n| n as u64))
    };
    let bits = ((part("hi")? as u128) << 64) | part("lo")? as u128;
    let text = if signed {
        (bits as i128).to_string()
    } else {
        bits.to_string()
    };
    Some(Value::String(text))
}

/// Decode one base64 topic entry. `None` for anything not base64 XDR or
/// not one of the supported shapes.
pub fn decode_topic(raw: &str) -> Option<TopicValue> {
    let bytes = STANDARD.decode(raw.trim()).ok()?;
    let mut reader = Reader { bytes: &bytes, pos: 0 };

    let value = match reader.u32()? {
        SCV_U32 => TopicValue::U32(reader.u32()?),
        SCV_U64 => TopicValue::U64(reader.u64()?),
        SCV_SYMBOL => {
            let len = reader.u32()? as usize;
            let text = reader.take_padded(len)?;
            TopicValue::Symbol(String::from_utf8(text.to_vec()).ok()?)
        }
        SCV_ADDRESS => match reader.u32()? {
            SC_ADDRESS_ACCOUNT => {
                // PublicKey union arm; only ed25519 (0) exists.
                if reader.u32()? != 0 {
                    return None;
                }
                TopicValue::Account(reader.array32()?)
            }
            SC_ADDRESS_CONTRACT => TopicValue::Contract(reader.array32()?),
            _ => return None,
        },
        _ => return None,
    };

    reader.at_end().then_some(value)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    /// XDR opaque data is padded to a multiple of four bytes.
    fn take_padded(&mut self, n: usize) -> Option<&'a [u8]> {
        let data = self.take(n)?;
        let pad = (4 - n % 4) % 4;
        self.take(pad)?;
        Some(data)
    }

    fn u32(&mut self) -> Option<u32> {
        let b = self.take(4)?;
        Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u64(&mut self) -> Option<u64> {
        let b = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(b);
        Some(u64::from_be_bytes(buf))
    }

    fn array32(&mut self) -> Option<[u8; 32]> {
        let b = self.take(32)?;
        let mut buf = [0u8; 32];
        buf.copy_from_slice(b);
        Some(buf)
    }

    fn at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    #[test]
    fn decodes_symbol_with_padding() {
        // "funded" is 6 bytes, padded to 8.
        let mut xdr = vec![0, 0, 0, 15, 0, 0, 0, 6];
        xdr.extend_from_slice(b"funded");
        xdr.extend_from_slice(&[0, 0]);
        assert_eq!(
            decode_topic(&encode(&xdr)),
            Some(TopicValue::Symbol("funded".to_string()))
        );
    }

    #[test]
    fn decodes_u64_id() {
        let mut xdr = vec![0, 0, 0, 5];
        xdr.extend_from_slice(&42u64.to_be_bytes());
        assert_eq!(decode_topic(&encode(&xdr)).unwrap().render(), "42");
    }

    #[test]
    fn decodes_account_address_as_hex() {
        let mut xdr = vec![0, 0, 0, 18, 0, 0, 0, 0, 0, 0, 0, 0];
        xdr.extend_from_slice(&[0xab; 32]);
        let rendered = decode_topic(&encode(&xdr)).unwrap().render();
        assert_eq!(rendered, format!("account:{}", "ab".repeat(32)));
    }

    #[test]
    fn flattens_contract_struct_map() {
        let data = serde_json::json!({ "map": [
            { "key": { "symbol": "amount" }, "val": { "i128": "5000" } },
            { "key": { "symbol": "backer" }, "val": { "address": "GALICE" } },
            { "key": { "symbol": "is_anonymous" }, "val": { "bool": true } },
            { "key": { "symbol": "project_id" }, "val": { "u64": "7" } }
        ]});
        assert_eq!(
            plain_value(&data),
            serde_json::json!({
                "amount": "5000",
                "backer": "GALICE",
                "is_anonymous": true,
                "project_id": "7"
            })
        );
    }

    #[test]
    fn flattens_vectors_void_and_split_i128() {
        let data = serde_json::json!({ "vec": [
            { "address": "GCALLER" },
            { "vec": [{ "symbol": "Awarder" }] },
            "void"
        ]});
        assert_eq!(
            plain_value(&data),
            serde_json::json!(["GCALLER", ["Awarder"], null])
        );

        let negative = serde_json::json!({ "i128": { "hi": -1, "lo": u64::MAX } });
        assert_eq!(plain_value(&negative), serde_json::json!("-1"));
        let large = serde_json::json!({ "u128": { "hi": 1, "lo": 0 } });
        assert_eq!(plain_value(&large), serde_json::json!("18446744073709551616"));
    }

    #[test]
    fn rejects_trailing_bytes_and_garbage() {
        let mut xdr = vec![0, 0, 0, 3, 0, 0, 0, 7];
        xdr.push(1);
        assert_eq!(decode_topic(&encode(&xdr)), None);
        assert_eq!(decode_topic("not base64 at all!"), None);
        assert_eq!(decode_topic(&encode(&[0, 0, 0, 99])), None);
    }
}
