use std::io;
use std::net::{SocketAddr, SocketAddrV4, TcpListener};

use log::debug;
use socket2::{Domain, Protocol, Socket, Type};

use super::base::AcceptedConnection;
use crate::error::ServeError;

// Passive IPv4 endpoint with SO_REUSEADDR enabled. The socket is released
// when this value is dropped, on success and on every failure path.
pub struct ReuseTcpServer {
    listener: TcpListener,
}

impl ReuseTcpServer {
    pub fn bind(addr: SocketAddrV4, backlog: i32) -> Result<ReuseTcpServer, ServeError> {
        let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
            .map_err(ServeError::SocketCreation)?;
        socket.set_reuse_address(true).map_err(ServeError::SocketConfiguration)?;
        socket.bind(&SocketAddr::V4(addr).into()).map_err(ServeError::Bind)?;
        socket.listen(backlog).map_err(ServeError::Listen)?;
        debug!("listening on {} with backlog {}", addr, backlog);

        Ok(ReuseTcpServer {
            listener: socket.into(),
        })
    }

    /// Blocks until one client connects.
    pub fn accept(&self, read_buffer_size: usize) -> Result<AcceptedConnection, ServeError> {
        let (stream, peer) = self.listener.accept().map_err(ServeError::Accept)?;
        Ok(AcceptedConnection::new(stream, peer, read_buffer_size))
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn get_addr(&self) -> String {
        match self.local_addr() {
            Ok(addr) => format!("tcp://{}", addr),
            Err(_) => String::from("tcp://<unknown>"),
        }
    }
}
