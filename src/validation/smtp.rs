use super::Checked;
use super::dnsmx::{MxHost, REASON_NO_RECORDS};
use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, lookup_host};

#[cfg(test)]
use mockall::automock;

pub const SMTP_PORT: u16 = 25;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens and immediately closes a TCP connection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SmtpDialer {
    async fn dial(&self, host: &str, port: u16, timeout: Duration) -> io::Result<()>;
}

/// Dials every resolved address of the host until one accepts.
///
/// The timeout bounds the whole dial: address resolution plus every connect
/// attempt for the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

#[async_trait]
impl SmtpDialer for TcpDialer {
    async fn dial(&self, host: &str, port: u16, timeout: Duration) -> io::Result<()> {
        within(timeout, host, connect_any(host, port)).await
    }
}

async fn connect_any(host: &str, port: u16) -> io::Result<()> {
    let mut last_error = None;

    for addr in lookup_host((host, port)).await? {
        match TcpStream::connect(addr).await {
            Ok(mut stream) => {
                // Dropping the stream closes it either way.
                let _ = stream.shutdown().await;
                return Ok(());
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "no addresses found for host")
    }))
}

async fn within<F>(timeout: Duration, host: &str, dial: F) -> io::Result<()>
where
    F: Future<Output = io::Result<()>>,
{
    match tokio::time::timeout(timeout, dial).await {
        Ok(result) => result,
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("connection to {host} timed out"),
        )),
    }
}

/// Reachability stage. Consumes the MX host list from the MX stage.
pub struct SmtpCheck {
    dialer: Box<dyn SmtpDialer + Send + Sync>,
    port: u16,
    timeout: Duration,
}

impl SmtpCheck {
    pub fn new(dialer: impl SmtpDialer + Send + Sync + 'static) -> Self {
        Self {
            dialer: Box::new(dialer),
            port: SMTP_PORT,
            timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Passes on the first host that accepts a connection. Hosts after it are
    /// not tried.
    pub async fn check(&self, hosts: &[MxHost]) -> Checked<()> {
        if hosts.is_empty() {
            return Checked::failed(REASON_NO_RECORDS);
        }

        let mut errors = Vec::with_capacity(hosts.len());
        for host in hosts {
            match self.dialer.dial(&host.exchange, self.port, self.timeout).await {
                Ok(()) => {
                    tracing::debug!(host = %host.exchange, port = self.port, "SMTP port reachable");
                    return Checked::Passed(());
                }
                Err(e) => {
                    tracing::debug!(host = %host.exchange, port = self.port, error = %e, "SMTP dial failed");
                    errors.push(format!("{}: {}", host.exchange, e));
                }
            }
        }

        Checked::Failed(errors.join(", "))
    }
}
