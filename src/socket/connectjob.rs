use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::socket::proxy::ProxySettings;
use crate::socket::stream::BoxedSocket;
use crate::socket::tls::TlsConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use url::Url;

/// Upper bound on a proxy's CONNECT response head.
const MAX_TUNNEL_RESPONSE: usize = 8 * 1024;

/// Manages the connection process: DNS -> TCP -> (CONNECT) -> TLS.
pub struct ConnectJob;

impl ConnectJob {
    /// Open a fresh connection suitable for sending a request to `url`.
    pub async fn connect(
        url: &Url,
        proxy: Option<&ProxySettings>,
        tls: &TlsConfig,
    ) -> Result<BoxedSocket, NetError> {
        let target_host = url.host_str().ok_or(NetError::InvalidUrl)?;
        let target_port = url.port_or_known_default().ok_or(NetError::InvalidUrl)?;

        let (host, port) = match proxy {
            Some(p) => p.host_port().ok_or(NetError::InvalidUrl)?,
            None => (target_host, target_port),
        };

        let mut stream = Self::connect_tcp(host, port).await?;

        if let Some(p) = proxy {
            Self::establish_tunnel(&mut stream, p, target_host, target_port).await?;
            tracing::debug!(target = %target_host, "proxy tunnel established");
        }

        if url.scheme() == "https" {
            // bracketed IPv6 literals are not valid SNI/hostnames
            let tls_host = target_host.trim_start_matches('[').trim_end_matches(']');
            let config = tls.connect_configuration(tls_host)?;
            let tls_stream = tokio_boring::connect(config, tls_host, stream)
                .await
                .map_err(|e| {
                    tracing::debug!(host = %tls_host, error = ?e, "TLS handshake failed");
                    NetError::SslProtocolError
                })?;
            Ok(BoxedSocket::new(tls_stream))
        } else {
            Ok(BoxedSocket::new(stream))
        }
    }

    async fn connect_tcp(host: &str, port: u16) -> Result<TcpStream, NetError> {
        let addrs = tokio::net::lookup_host((host, port))
            .await
            .dns_context(host)?;

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(s) => {
                    let _ = s.set_nodelay(true);
                    return Ok(s);
                }
                Err(e) => {
                    tracing::debug!(addr = %addr, error = %e, "connect attempt failed");
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(e) => Err::<TcpStream, _>(e).connection_context(host, port),
            None => Err(NetError::NameNotResolvedFor {
                domain: host.to_string(),
                message: "no addresses".to_string(),
            }),
        }
    }

    /// Send `CONNECT host:port` and wait for a 2xx.
    async fn establish_tunnel(
        stream: &mut TcpStream,
        proxy: &ProxySettings,
        target_host: &str,
        target_port: u16,
    ) -> Result<(), NetError> {
        let target = format!("{}:{}", target_host, target_port);
        let mut connect_req = format!("CONNECT {} HTTP/1.1\r\nHost: {}\r\n", target, target);
        if let Some(auth) = proxy.get_auth_header() {
            connect_req.push_str("Proxy-Authorization: ");
            connect_req.push_str(auth.as_str());
            connect_req.push_str("\r\n");
        }
        connect_req.push_str("\r\n");

        stream
            .write_all(connect_req.as_bytes())
            .await
            .tunnel_context()?;

        let head = read_response_head(stream).await?;
        let status = parse_status_line(&head).ok_or_else(|| {
            tracing::debug!("proxy sent an unparseable CONNECT response");
            NetError::TunnelConnectionFailed
        })?;

        if !(200..300).contains(&status) {
            tracing::debug!(status, "proxy refused CONNECT");
            return Err(NetError::TunnelConnectionFailed);
        }
        Ok(())
    }
}

/// Read up to and including the blank line that ends the response head.
/// Reads byte-wise so no tunnelled bytes are consumed.
async fn read_response_head(stream: &mut TcpStream) -> Result<Vec<u8>, NetError> {
    let mut head = Vec::with_capacity(256);
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        if head.len() >= MAX_TUNNEL_RESPONSE {
            return Err(NetError::TunnelConnectionFailed);
        }
        let n = stream.read(&mut byte).await.tunnel_context()?;
        if n == 0 {
            return Err(NetError::TunnelConnectionFailed);
        }
        head.push(byte[0]);
    }
    Ok(head)
}

fn parse_status_line(head: &[u8]) -> Option<u16> {
    let line_end = head.windows(2).position(|w| w == b"\r\n")?;
    let line = std::str::from_utf8(&head[..line_end]).ok()?;
    let mut parts = line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/1.") {
        return None;
    }
    parts.next()?.parse().ok()
}
