use super::dnsmx::{DnsMxLookup, MxCheck};
use super::smtp::{SmtpCheck, TcpDialer};
use super::syntax::SyntaxCheck;
use super::{Stage, ValidationReport};
use std::time::Duration;

/// The fixed syntax, MX, SMTP sequence.
///
/// Built once at startup and shared by every worker. Each stage hands its
/// byproduct (domain, then MX hosts) straight to the next one, and the first
/// failing stage ends the run, so no DNS or TCP work is spent on an address
/// that is already rejected.
pub struct Pipeline {
    syntax: SyntaxCheck,
    mx: MxCheck,
    smtp: SmtpCheck,
}

impl Pipeline {
    pub fn new(syntax: SyntaxCheck, mx: MxCheck, smtp: SmtpCheck) -> Self {
        Self { syntax, mx, smtp }
    }

    /// Production wiring: system DNS resolver and plain TCP dials to port 25.
    pub fn with_network(dns_timeout: Duration, connect_timeout: Duration) -> Result<Self, regex::Error> {
        Ok(Self::new(
            SyntaxCheck::new()?,
            MxCheck::new(DnsMxLookup::new(dns_timeout)),
            SmtpCheck::new(TcpDialer).with_timeout(connect_timeout),
        ))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn validate(&self, email: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        let Some(domain) = report.record(Stage::Syntax, self.syntax.check(email)) else {
            return report;
        };
        let Some(hosts) = report.record(Stage::Mx, self.mx.check(&domain).await) else {
            return report;
        };
        report.record(Stage::Smtp, self.smtp.check(&hosts).await);

        report
    }
}
