use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use super::{Datagram, DatagramSource, SourceError};
use crate::protocol::layout;

/// Live UDP source bound to the simulation's broadcast port.
///
/// `next_datagram` blocks until a datagram arrives and never yields `None`;
/// a UDP socket has no end-of-stream. Loss, duplication, and reordering are
/// whatever the network delivered.
pub struct UdpSocketSource {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl UdpSocketSource {
    /// Bind to `addr`, e.g. `("0.0.0.0", 20777)`.
    pub fn bind<A: ToSocketAddrs>(addr: A) -> Result<Self, SourceError> {
        let socket = UdpSocket::bind(addr)?;
        Ok(Self {
            socket,
            buf: vec![0u8; layout::MAX_DATAGRAM_LEN],
        })
    }

    /// Address the socket actually bound to (useful when binding port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, SourceError> {
        Ok(self.socket.local_addr()?)
    }
}

impl DatagramSource for UdpSocketSource {
    fn next_datagram(&mut self) -> Result<Option<Datagram>, SourceError> {
        let (len, _peer) = self.socket.recv_from(&mut self.buf)?;
        Ok(Some(Datagram {
            ts: None,
            data: self.buf[..len].to_vec(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::UdpSocketSource;
    use crate::source::DatagramSource;
    use std::net::UdpSocket;

    #[test]
    fn socket_source_receives_datagrams_in_order() {
        let mut source = UdpSocketSource::bind(("127.0.0.1", 0)).unwrap();
        let addr = source.local_addr().unwrap();
        let sender = UdpSocket::bind(("127.0.0.1", 0)).unwrap();

        sender.send_to(&[1, 2, 3], addr).unwrap();
        sender.send_to(&[4, 5], addr).unwrap();

        let first = source.next_datagram().unwrap().unwrap();
        assert_eq!(first.data, vec![1, 2, 3]);
        assert!(first.ts.is_none());

        let second = source.next_datagram().unwrap().unwrap();
        assert_eq!(second.data, vec![4, 5]);
    }
}
