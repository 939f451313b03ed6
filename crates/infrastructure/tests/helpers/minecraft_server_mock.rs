#![allow(dead_code)]
use bytes::BytesMut;
use mcgate_infrastructure::protocol::codec::{encode_packet, read_varint, write_string};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

/// How a mock Java server treats the modern handshake.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ModernBehavior {
    Respond,
    /// Kicks with `0xFF` like a 1.6 server.
    LegacyKick,
    /// Kicks with a text long enough that its length has a non-zero high byte.
    LongLegacyKick,
    /// Closes the connection without a byte.
    Close,
    /// Accepts and never answers.
    Silent,
}

pub struct JavaServerMock {
    pub modern: ModernBehavior,
    pub status_json: String,
    /// UTF-16 payload for `0xFE 0x01` pings.
    pub legacy_reply: Option<String>,
    pub answer_ping: bool,
}

impl JavaServerMock {
    pub fn modern(status_json: &str) -> Self {
        Self {
            modern: ModernBehavior::Respond,
            status_json: status_json.to_string(),
            legacy_reply: None,
            answer_ping: true,
        }
    }

    pub fn legacy(modern: ModernBehavior, reply: &str) -> Self {
        Self {
            modern,
            status_json: String::new(),
            legacy_reply: Some(reply.to_string()),
            answer_ping: false,
        }
    }

    pub fn silent() -> Self {
        Self {
            modern: ModernBehavior::Silent,
            status_json: String::new(),
            legacy_reply: None,
            answer_ping: false,
        }
    }

    pub async fn spawn(self) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let mock = std::sync::Arc::new(self);

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let mock = std::sync::Arc::clone(&mock);
                tokio::spawn(async move {
                    let _ = mock.serve(stream).await;
                });
            }
        });

        addr
    }

    async fn serve(&self, mut stream: TcpStream) -> std::io::Result<()> {
        let first = stream.read_u8().await?;

        if first == 0xFE {
            let mut rest = [0u8; 1];
            stream.read_exact(&mut rest).await?;
            if let Some(reply) = &self.legacy_reply {
                let units: Vec<u16> = reply.encode_utf16().collect();
                let mut out = vec![0xFF];
                out.extend_from_slice(&(units.len() as u16).to_be_bytes());
                for unit in units {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
                stream.write_all(&out).await?;
            }
            return stream.shutdown().await;
        }

        // Rest of the handshake, then the status request.
        let mut handshake = vec![0u8; first as usize];
        stream.read_exact(&mut handshake).await?;
        let request_len = read_varint(&mut stream)
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        let mut request = vec![0u8; request_len as usize];
        stream.read_exact(&mut request).await?;

        match self.modern {
            ModernBehavior::Close => return Ok(()),
            ModernBehavior::LegacyKick => {
                stream.write_all(&[0xFF, 0x00, 0x00]).await?;
                return stream.shutdown().await;
            }
            ModernBehavior::LongLegacyKick => {
                let text = format!("\u{00A7}{}", "x".repeat(299));
                let units: Vec<u16> = text.encode_utf16().collect();
                let mut out = vec![0xFF];
                out.extend_from_slice(&(units.len() as u16).to_be_bytes());
                for unit in units {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
                stream.write_all(&out).await?;
                return stream.shutdown().await;
            }
            ModernBehavior::Silent => {
                tokio::time::sleep(std::time::Duration::from_secs(30)).await;
                return Ok(());
            }
            ModernBehavior::Respond => {}
        }

        let mut body = BytesMut::new();
        write_string(&mut body, &self.status_json);
        stream.write_all(&encode_packet(0x00, &body)).await?;

        if !self.answer_ping {
            return stream.shutdown().await;
        }

        let mut ping = [0u8; 10];
        stream.read_exact(&mut ping).await?;
        stream.write_all(&ping).await?;
        Ok(())
    }
}

/// GameSpy4 responder with fixed key/values and players.
pub async fn spawn_query_server(
    addr: SocketAddr,
    kvs: Vec<(&'static str, &'static str)>,
    players: Vec<&'static str>,
) -> SocketAddr {
    let socket = UdpSocket::bind(addr).await.unwrap();
    let local = socket.local_addr().unwrap();

    tokio::spawn(async move {
        let mut buf = vec![0u8; 1500];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                break;
            };
            if len < 7 || buf[0..2] != [0xFE, 0xFD] {
                continue;
            }
            let kind = buf[2];
            let session = [buf[3], buf[4], buf[5], buf[6]];

            let mut reply = vec![kind];
            reply.extend_from_slice(&session);
            if kind == 0x09 {
                reply.extend_from_slice(b"9513307\0");
            } else {
                reply.extend_from_slice(b"splitnum\0\x80\0");
                for (k, v) in &kvs {
                    reply.extend_from_slice(k.as_bytes());
                    reply.push(0);
                    reply.extend_from_slice(v.as_bytes());
                    reply.push(0);
                }
                reply.push(0);
                reply.extend_from_slice(b"\x01player_\0\0");
                for p in &players {
                    reply.extend_from_slice(p.as_bytes());
                    reply.push(0);
                }
                reply.push(0);
            }
            let _ = socket.send_to(&reply, peer).await;
        }
    });

    local
}

/// RakNet pong responder. `None` swallows every ping.
pub async fn spawn_bedrock_server(advertisement: Option<&'static str>) -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let local = socket.local_addr().unwrap();

    tokio::spawn(async move {
        let mut buf = vec![0u8; 1500];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                break;
            };
            let Some(advertisement) = advertisement else {
                continue;
            };
            if len < 33 || buf[0] != 0x01 {
                continue;
            }

            let mut pong = vec![0x1C];
            pong.extend_from_slice(&buf[1..9]);
            pong.extend_from_slice(&0x0102_0304_0506_0708i64.to_be_bytes());
            pong.extend_from_slice(&mcgate_infrastructure::protocol::bedrock::RAKNET_MAGIC);
            pong.extend_from_slice(&(advertisement.len() as u16).to_be_bytes());
            pong.extend_from_slice(advertisement.as_bytes());
            let _ = socket.send_to(&pong, peer).await;
        }
    });

    local
}
