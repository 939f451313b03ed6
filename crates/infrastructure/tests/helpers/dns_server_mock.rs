#![allow(dead_code)]
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// What the mock nameserver answers to every query.
#[derive(Clone)]
pub enum SrvAnswer {
    /// (priority, weight, port, target labels)
    Records(Vec<(u16, u16, u16, Vec<&'static str>)>),
    NxDomain,
    /// Answers with a different transaction id.
    WrongId,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(answer: SrvAnswer) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let response = build_srv_response(&buf[..len], &answer);
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn build_srv_response(query: &[u8], answer: &SrvAnswer) -> Vec<u8> {
    if query.len() < 12 {
        return vec![];
    }

    let mut response = Vec::with_capacity(512);

    match answer {
        SrvAnswer::WrongId => {
            let id = u16::from_be_bytes([query[0], query[1]]).wrapping_add(1);
            response.extend_from_slice(&id.to_be_bytes());
        }
        _ => response.extend_from_slice(&query[0..2]),
    }

    response.push(0x81);
    response.push(match answer {
        SrvAnswer::NxDomain => 0x83,
        _ => 0x80,
    });

    let records: &[(u16, u16, u16, Vec<&str>)] = match answer {
        SrvAnswer::Records(records) => records,
        _ => &[],
    };

    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&(records.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);

    response.extend_from_slice(&query[12..]);

    for (priority, weight, port, labels) in records {
        let mut target = Vec::new();
        for label in labels {
            target.push(label.len() as u8);
            target.extend_from_slice(label.as_bytes());
        }
        target.push(0);

        response.extend_from_slice(&[
            0xc0, 0x0c,
            0x00, 0x21,
            0x00, 0x01,
            0x00, 0x00, 0x01, 0x2c,
        ]);
        response.extend_from_slice(&((6 + target.len()) as u16).to_be_bytes());
        response.extend_from_slice(&priority.to_be_bytes());
        response.extend_from_slice(&weight.to_be_bytes());
        response.extend_from_slice(&port.to_be_bytes());
        response.extend_from_slice(&target);
    }

    response
}
