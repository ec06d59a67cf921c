use super::Checked;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
    proto::rr::rdata::MX,
    system_conf::read_system_conf,
};

#[cfg(test)]
use mockall::automock;

pub const REASON_LOOKUP_FAILED: &str = "MX Lookup failed";
pub const REASON_NO_RECORDS: &str = "No MX records for the domain";

/// A mail exchanger for a domain. Lower preference is tried first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxHost {
    pub preference: u16,
    pub exchange: String,
}

impl MxHost {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MxLookupError {
    #[error("MX lookup failed: {0}")]
    Resolve(#[from] ResolveError),
}

/// Source of MX records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MxLookup {
    /// Hosts in ascending preference order. An empty list means the domain
    /// has no mail exchangers.
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxHost>, MxLookupError>;
}

/// [`MxLookup`] backed by the trust-dns tokio resolver.
#[derive(Clone)]
pub struct DnsMxLookup {
    resolver: TokioAsyncResolver,
}

impl DnsMxLookup {
    /// Builds a resolver from the system configuration
    ///
    /// Configures resolver with:
    /// - the given timeout per request
    /// - a single attempt, no retries
    /// - no answer cache, so every lookup reaches the name servers
    /// - the library default servers when the system configuration is unreadable
    pub fn new(timeout: Duration) -> Self {
        let (config, opts) = match read_system_conf() {
            Ok(conf) => conf,
            Err(e) => {
                tracing::warn!(error = %e, "cannot read system resolver configuration, using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        Self::build(config, opts, timeout)
    }

    /// Same tuning as [`DnsMxLookup::new`], against explicit name servers.
    pub fn with_config(config: ResolverConfig, timeout: Duration) -> Self {
        Self::build(config, ResolverOpts::default(), timeout)
    }

    fn build(config: ResolverConfig, mut opts: ResolverOpts, timeout: Duration) -> Self {
        opts.timeout = timeout;
        opts.attempts = 1;
        opts.cache_size = 0;

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

#[async_trait]
impl MxLookup for DnsMxLookup {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxHost>, MxLookupError> {
        match self.resolver.mx_lookup(domain).await {
            Ok(lookup) => Ok(mx_hosts(lookup.iter())),
            Err(e) if is_empty_answer(&e) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

/// NXDOMAIN and an empty NOERROR answer both mean "no mail exchangers".
/// Other negative responses (SERVFAIL, REFUSED, ...) are lookup failures.
fn is_empty_answer(error: &ResolveError) -> bool {
    matches!(
        error.kind(),
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if matches!(*response_code, ResponseCode::NoError | ResponseCode::NXDomain)
    )
}

/// Converts MX records to hosts, stable-sorted by ascending preference with
/// the trailing root dot removed.
pub(crate) fn mx_hosts<'a>(records: impl Iterator<Item = &'a MX>) -> Vec<MxHost> {
    let mut hosts: Vec<MxHost> = records
        .map(|mx| {
            let exchange = mx.exchange().to_utf8();
            MxHost::new(mx.preference(), exchange.trim_end_matches('.'))
        })
        .collect();
    hosts.sort_by_key(|host| host.preference);
    hosts
}

/// Domain resolver stage. Consumes the domain extracted by the syntax stage.
pub struct MxCheck {
    lookup: Box<dyn MxLookup + Send + Sync>,
}

impl MxCheck {
    pub fn new(lookup: impl MxLookup + Send + Sync + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }

    pub async fn check(&self, domain: &str) -> Checked<Vec<MxHost>> {
        match self.lookup.lookup_mx(domain).await {
            Err(e) => {
                tracing::warn!(domain, error = %e, "MX lookup failed");
                Checked::failed(REASON_LOOKUP_FAILED)
            }
            Ok(hosts) if hosts.is_empty() => Checked::failed(REASON_NO_RECORDS),
            Ok(hosts) => {
                tracing::debug!(domain, count = hosts.len(), "MX records found");
                Checked::Passed(hosts)
            }
        }
    }
}
