use std::{
    io,
    net::{SocketAddr, TcpListener},
};

use anyhow::Context as _;

use crate::{
    connection::Connection,
    error::Error,
    listener,
    probe::Probes,
    request::{self, MAX_REQUEST_LEN},
    response::Response,
    route::Route,
};

/// Serves one connection at a time: read, respond, close, accept the next.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    probes: Probes,
}

impl Server {
    pub fn bind(port: u16, probes: Probes) -> anyhow::Result<Server> {
        let listener = listener::bind(port)
            .with_context(|| format!("Cannot bind server socket to port {port}"))?;
        Ok(Server { listener, probes })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Only returns if accepting fails.
    pub fn run(&self) -> anyhow::Result<()> {
        tracing::info!(message = "Accepting requests.", addr = %self.local_addr()?);
        loop {
            let (stream, peer) = self.listener.accept().context("Error while accepting")?;
            let span = tracing::debug_span!("connection", peer = %peer);
            let _enter = span.enter();
            tracing::debug!("Accepted connection");
            self.handle(Connection::new(stream, peer));
        }
    }

    fn handle(&self, mut connection: Connection) {
        let mut buf = vec![0u8; MAX_REQUEST_LEN];
        let len = match connection.read_request(&mut buf) {
            Ok(0) => {
                tracing::debug!("Peer closed without sending a request");
                return;
            }
            Ok(len) => len,
            Err(err) => {
                tracing::warn!(message = "Read from socket failed", error = %err);
                return;
            }
        };

        let response = respond(&self.probes, &buf[..len]);
        tracing::debug!(status = %response.status(), len = response.body().len(), "Responding");
        if let Err(err) = connection.respond(&response) {
            tracing::warn!(message = "Write to socket failed", error = %err);
        }
    }
}

/// Turns one raw request into its response. Failures never escape: each kind
/// of [`Error`] has a response of its own.
pub fn respond(probes: &Probes, request: &[u8]) -> Response {
    match dispatch(probes, request) {
        Ok(payload) => Response::ok(payload),
        Err(err) => {
            match &err {
                Error::SystemRead(source) => {
                    tracing::error!(message = "Cannot read system information", error = ?source)
                }
                _ => tracing::debug!(message = "Rejected request", error = %err),
            }
            Response::from(&err)
        }
    }
}

fn dispatch(probes: &Probes, request: &[u8]) -> Result<String, Error> {
    let path = request::parse_path(request)?;
    let route = Route::from_path(path)?;
    tracing::debug!(%route, "Dispatching request");
    Ok(route.serve(probes)?)
}
