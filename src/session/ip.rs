use std::io::ErrorKind;
use std::net::{IpAddr, UdpSocket};

use crate::error::ConfigError;

/// Parses a pool of IP literals, skipping blank entries.
///
/// # Errors
///
/// Returns `ConfigError::InvalidIpLiteral` for the first entry that is not an IP.
pub fn parse_ip_pool(values: &[String]) -> Result<Vec<IpAddr>, ConfigError> {
    let mut pool = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        let ip = trimmed
            .parse::<IpAddr>()
            .map_err(|err| ConfigError::InvalidIpLiteral {
                value: trimmed.to_owned(),
                source: err,
            })?;
        pool.push(ip);
    }
    Ok(pool)
}

/// Checks that `ip` is assigned to a local interface by binding an ephemeral
/// socket to it.
///
/// # Errors
///
/// Returns `ConfigError::ClientIpUnavailable` when no interface carries `ip`,
/// or `ConfigError::ClientIpProbe` when the probe itself fails.
pub fn ensure_local_ip(ip: IpAddr) -> Result<(), ConfigError> {
    match UdpSocket::bind((ip, 0)) {
        Ok(socket) => {
            drop(socket);
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::AddrNotAvailable => {
            Err(ConfigError::ClientIpUnavailable { ip })
        }
        Err(err) => Err(ConfigError::ClientIpProbe { ip, source: err }),
    }
}

/// Worker `index` gets `pool[index mod len]`; an empty pool assigns nothing.
#[must_use]
pub fn round_robin<T: Copy>(pool: &[T], index: usize) -> Option<T> {
    index
        .checked_rem(pool.len())
        .and_then(|slot| pool.get(slot))
        .copied()
}
