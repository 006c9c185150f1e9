use std::io::{self, Write};
use std::net::{SocketAddr, SocketAddrV4};

use log::{debug, error, info, warn};

use crate::error::{ConfigError, ServeError};
use crate::option::ServerOption;
use crate::protocol::HttpResponse;
use crate::serve::{AcceptedConnection, ReuseTcpServer, WriteFailure};

const DUMP_START: &str = "----- HTTP request start -----\n";
const DUMP_END: &str = "------ HTTP request end ------\n";

// bytes of the request shown in the debug hex preview
const HEX_PREVIEW_LEN: usize = 64;

/// Outcome of the single handled connection.
#[derive(Debug)]
pub struct Exchange {
    pub peer: SocketAddr,
    pub request: Vec<u8>,
    pub write_failures: Vec<WriteFailure>,
}

impl Exchange {
    pub fn response_sent(&self) -> bool {
        self.write_failures.is_empty()
    }
}

pub struct OneshotServer {
    addr: SocketAddrV4,
    backlog: i32,
    read_buffer_size: usize,
    response: HttpResponse,
}

impl OneshotServer {
    pub fn new(opts: &ServerOption) -> Result<Self, ConfigError> {
        opts.validate()?;
        Ok(OneshotServer {
            addr: opts.socket_addr()?,
            backlog: opts.backlog,
            read_buffer_size: opts.read_buffer_size,
            response: HttpResponse::it_works(),
        })
    }

    /// socket, setsockopt, bind, listen.
    pub fn listen(&self) -> Result<ReuseTcpServer, ServeError> {
        let server = ReuseTcpServer::bind(self.addr, self.backlog)?;
        info!("server listen on {}", server.get_addr());
        Ok(server)
    }

    /// Accepts one connection, reads one chunk, dumps it to `out` and writes
    /// the canned response. Both sockets are closed when this returns.
    pub fn serve_once<W: Write>(
        &self,
        server: &ReuseTcpServer,
        out: &mut W,
    ) -> Result<Exchange, ServeError> {
        let conn = server.accept(self.read_buffer_size)?;
        self.handle(conn, out)
    }

    /// Read, dump and respond on an accepted connection. Write failures are
    /// returned in the `Exchange`, not as an error.
    pub fn handle<W: Write>(
        &self,
        mut conn: AcceptedConnection,
        out: &mut W,
    ) -> Result<Exchange, ServeError> {
        let peer = conn.peer_addr();
        info!("accepted connection from {}", peer);

        let request = conn.read_chunk()?.to_vec();
        debug!(
            "read {} bytes from {}: {}",
            request.len(),
            peer,
            hex::encode(&request[..request.len().min(HEX_PREVIEW_LEN)])
        );
        if let Err(e) = dump_request(out, &request) {
            warn!("request dump failed: {}", e);
        }

        let write_failures = conn.write_response(&self.response);
        for failure in &write_failures {
            error!("{}", failure);
        }
        if write_failures.is_empty() {
            debug!("sent {} byte response to {}", self.response.to_bytes().len(), peer);
        }

        Ok(Exchange {
            peer,
            request,
            write_failures,
        })
    }

    pub fn bootstrap(&self) -> Result<Exchange, ServeError> {
        let server = self.listen()?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let exchange = self.serve_once(&server, &mut out)?;
        if exchange.response_sent() {
            info!(
                "exchange with {} complete, {} request bytes",
                exchange.peer,
                exchange.request.len()
            );
        } else {
            warn!(
                "response to {} not fully sent ({} failed writes)",
                exchange.peer,
                exchange.write_failures.len()
            );
        }
        Ok(exchange)
    }
}

/// Writes the raw request between the start and end marker lines.
pub fn dump_request<W: Write>(out: &mut W, request: &[u8]) -> io::Result<()> {
    out.write_all(DUMP_START.as_bytes())?;
    out.write_all(String::from_utf8_lossy(request).as_bytes())?;
    out.write_all(DUMP_END.as_bytes())?;
    out.flush()
}
