/// Body sent to every client.
pub const BODY: &str = "It works!\n";

/// Canned HTTP/1.1 response. The head is rendered from the body so
/// `Content-Length` always matches what goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub body: &'static [u8],
}

impl HttpResponse {
    pub fn it_works() -> Self {
        HttpResponse {
            status: 200,
            reason: "OK",
            content_type: "text/plain; charset=utf-8",
            body: BODY.as_bytes(),
        }
    }

    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Status line, headers and the blank line.
    pub fn head(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            self.reason,
            self.content_type,
            self.content_length()
        )
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.head().into_bytes();
        buf.extend_from_slice(self.body);
        buf
    }
}
