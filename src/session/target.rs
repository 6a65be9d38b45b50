use std::borrow::Cow;
use std::net::IpAddr;

/// Marker in the URL template replaced with the assigned server IP.
pub const SERVER_IP_PLACEHOLDER: &str = "<ServerIP>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    raw: String,
}

impl UrlTemplate {
    #[must_use]
    pub const fn new(raw: String) -> Self {
        Self { raw }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.raw.contains(SERVER_IP_PLACEHOLDER)
    }

    /// Builds the request URL for one iteration. IPv6 addresses are bracketed
    /// so they can stand in for a URL host.
    #[must_use]
    pub fn resolve(&self, server_ip: Option<IpAddr>) -> Cow<'_, str> {
        match server_ip {
            Some(ip) if self.has_placeholder() => {
                let host = match ip {
                    IpAddr::V4(v4) => v4.to_string(),
                    IpAddr::V6(v6) => format!("[{}]", v6),
                };
                Cow::Owned(self.raw.replace(SERVER_IP_PLACEHOLDER, &host))
            }
            Some(_) | None => Cow::Borrowed(&self.raw),
        }
    }
}
