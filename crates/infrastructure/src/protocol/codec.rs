//! Java Edition framing: VarInts, length-prefixed strings and packets.

use super::errors::{ProtocolError, ProtocolResult};
use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

const MAX_VARINT_BYTES: usize = 5;

pub fn write_varint(buf: &mut BytesMut, value: i32) {
    let mut value = value as u32;
    loop {
        if value & !0x7F == 0 {
            buf.put_u8(value as u8);
            return;
        }
        buf.put_u8((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
}

pub fn write_string(buf: &mut BytesMut, value: &str) {
    write_varint(buf, value.len() as i32);
    buf.put_slice(value.as_bytes());
}

/// Wraps `body` as `[length][packet id][body]`.
pub fn encode_packet(id: i32, body: &[u8]) -> Bytes {
    let mut payload = BytesMut::with_capacity(body.len() + MAX_VARINT_BYTES);
    write_varint(&mut payload, id);
    payload.put_slice(body);

    let mut framed = BytesMut::with_capacity(payload.len() + MAX_VARINT_BYTES);
    write_varint(&mut framed, payload.len() as i32);
    framed.put_slice(&payload);
    framed.freeze()
}

/// Decodes a VarInt at the start of `buf`, returning it with the number of
/// bytes consumed.
pub fn decode_varint(buf: &[u8]) -> ProtocolResult<(i32, usize)> {
    let mut result: u32 = 0;

    for (i, byte) in buf.iter().take(MAX_VARINT_BYTES).enumerate() {
        result |= u32::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((result as i32, i + 1));
        }
    }

    if buf.len() >= MAX_VARINT_BYTES {
        Err(ProtocolError::Malformed("VarInt longer than 5 bytes".to_string()))
    } else {
        Err(ProtocolError::Malformed("truncated VarInt".to_string()))
    }
}

/// Decodes a VarInt-prefixed UTF-8 string at the start of `buf`.
pub fn decode_string(buf: &[u8]) -> ProtocolResult<(String, usize)> {
    let (len, prefix) = decode_varint(buf)?;
    let len = usize::try_from(len)
        .map_err(|_| ProtocolError::Malformed(format!("negative string length {}", len)))?;

    let bytes = buf
        .get(prefix..prefix + len)
        .ok_or_else(|| ProtocolError::Malformed("string runs past end of packet".to_string()))?;
    let value = String::from_utf8(bytes.to_vec())
        .map_err(|e| ProtocolError::Malformed(format!("string is not UTF-8: {}", e)))?;

    Ok((value, prefix + len))
}

pub async fn read_varint<R: AsyncRead + Unpin>(reader: &mut R) -> ProtocolResult<i32> {
    let first = reader.read_u8().await?;
    read_varint_after(reader, first).await
}

/// Finishes a VarInt whose first byte the caller already consumed.
pub async fn read_varint_after<R: AsyncRead + Unpin>(
    reader: &mut R,
    first: u8,
) -> ProtocolResult<i32> {
    let mut result = u32::from(first & 0x7F);
    if first & 0x80 == 0 {
        return Ok(result as i32);
    }

    for i in 1..MAX_VARINT_BYTES {
        let byte = reader.read_u8().await?;
        result |= u32::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result as i32);
        }
    }

    Err(ProtocolError::Malformed("VarInt longer than 5 bytes".to_string()))
}
