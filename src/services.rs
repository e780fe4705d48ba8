//! Service naming based on well-known TCP port numbers.
//!
//! Names follow the IANA service registry as it appears in a typical
//! `/etc/services`. Ports without an entry map to [`UNKNOWN_SERVICE`].

/// Service name reported for open ports missing from the table.
pub const UNKNOWN_SERVICE: &str = "Unknown";

/// Well-known TCP services, sorted by port for binary search.
const TCP_SERVICES: &[(u16, &str)] = &[
    (7, "echo"),
    (9, "discard"),
    (13, "daytime"),
    (17, "qotd"),
    (19, "chargen"),
    (20, "ftp-data"),
    (21, "ftp"),
    (22, "ssh"),
    (23, "telnet"),
    (25, "smtp"),
    (37, "time"),
    (43, "whois"),
    (53, "domain"),
    (70, "gopher"),
    (79, "finger"),
    (80, "http"),
    (88, "kerberos"),
    (110, "pop3"),
    (111, "sunrpc"),
    (113, "auth"),
    (119, "nntp"),
    (135, "epmap"),
    (139, "netbios-ssn"),
    (143, "imap2"),
    (179, "bgp"),
    (389, "ldap"),
    (443, "https"),
    (445, "microsoft-ds"),
    (465, "submissions"),
    (513, "login"),
    (514, "shell"),
    (515, "printer"),
    (543, "klogin"),
    (544, "kshell"),
    (548, "afpovertcp"),
    (554, "rtsp"),
    (587, "submission"),
    (631, "ipp"),
    (636, "ldaps"),
    (873, "rsync"),
    (990, "ftps"),
    (993, "imaps"),
    (995, "pop3s"),
    (1080, "socks"),
    (1194, "openvpn"),
    (1433, "ms-sql-s"),
    (1434, "ms-sql-m"),
    (1521, "ncube-lm"),
    (1723, "pptp"),
    (1883, "mqtt"),
    (2049, "nfs"),
    (2181, "zookeeper"),
    (2375, "docker"),
    (2376, "docker-s"),
    (3128, "squid-http"),
    (3260, "iscsi-target"),
    (3306, "mysql"),
    (3389, "ms-wbt-server"),
    (3690, "svn"),
    (4369, "epmd"),
    (5060, "sip"),
    (5061, "sip-tls"),
    (5222, "xmpp-client"),
    (5269, "xmpp-server"),
    (5432, "postgresql"),
    (5672, "amqp"),
    (5900, "rfb"),
    (5984, "couchdb"),
    (6379, "redis"),
    (6443, "sun-sr-https"),
    (6667, "ircd"),
    (8080, "http-alt"),
    (8443, "https-alt"),
    (9000, "cslistener"),
    (9042, "cassandra"),
    (9092, "XmlIpcRegSvc"),
    (9200, "wap-wsp"),
    (9418, "git"),
    (10000, "webmin"),
    (11211, "memcache"),
    (27017, "mongodb"),
];

/// Look up the conventional service name for a TCP port.
///
/// Returns `None` if the port is not in the table.
pub fn lookup(port: u16) -> Option<&'static str> {
    TCP_SERVICES
        .binary_search_by_key(&port, |&(p, _)| p)
        .ok()
        .map(|idx| TCP_SERVICES[idx].1)
}

/// Service name for an open port, falling back to [`UNKNOWN_SERVICE`].
pub fn service_name(port: u16) -> &'static str {
    lookup(port).unwrap_or(UNKNOWN_SERVICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        assert!(TCP_SERVICES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_common_ports() {
        assert_eq!(lookup(22), Some("ssh"));
        assert_eq!(lookup(80), Some("http"));
        assert_eq!(lookup(443), Some("https"));
        assert_eq!(lookup(3306), Some("mysql"));
    }

    #[test]
    fn test_unknown_port() {
        assert_eq!(lookup(12345), None);
        assert_eq!(service_name(12345), "Unknown");
    }
}
