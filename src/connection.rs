use std::{
    fmt::Display,
    io::{self, Read, Write},
    net::{SocketAddr, TcpStream},
};

use crate::response::Response;

/// An accepted client socket. Dropping it closes the connection, which is
/// the only way a connection ends.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr) -> Self {
        Connection { stream, peer }
    }

    /// A single `read`; whatever did not arrive by then is not part of the request.
    pub fn read_request(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }

    pub fn respond(&mut self, response: &Response) -> io::Result<()> {
        self.stream.write_all(&response.to_bytes())?;
        self.stream.flush()
    }
}

impl Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.peer.fmt(f)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        tracing::debug!(peer = %self, "Closing connection");
    }
}
