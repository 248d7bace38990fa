//! # Service Fingerprint Table
//!
//! Maps a port to the service, or the class of weakness, conventionally found behind it.
//! The table is a literal and is never mutated; callers pass a [`ServiceFingerprints`]
//! value around instead of reaching for global state.

/// Annotation used for open ports without a fingerprint.
pub const MANUAL_CONFIRMATION: &str = "service requires manual confirmation";

/// Sorted by port so lookups can binary search.
const BUILTIN: &[(u16, &str)] = &[
    (21, "FTP"),
    (22, "SSH"),
    (23, "Telnet"),
    (80, "Web (HTTP.sys remote code execution)"),
    (111, "NFS"),
    (161, "SNMP"),
    (389, "LDAP"),
    (443, "SSL Heartbleed and common web vulnerabilities"),
    (445, "SMB"),
    (512, "Rexec"),
    (513, "Rexec"),
    (514, "Rexec"),
    (873, "Rsync unauthorized access"),
    (1025, "NFS"),
    (1433, "MSSQL"),
    (1521, "Oracle (iSqlPlus)"),
    (2082, "cPanel host management login"),
    (2083, "cPanel host management login"),
    (2222, "DirectAdmin virtual host management login"),
    (2601, "Zebra router, default password zebra"),
    (2604, "Zebra router, default password zebra"),
    (3128, "Squid proxy, open relay into the internal network when unauthenticated"),
    (3306, "MySQL"),
    (3311, "Kangle host management login"),
    (3312, "Kangle host management login"),
    (3389, "Remote Desktop (RDP vulnerabilities)"),
    (4440, "Rundeck"),
    (5432, "PostgreSQL"),
    (5672, "RabbitMQ (guest/guest)"),
    (5900, "VNC"),
    (5984, "CouchDB"),
    (6082, "Varnish HTTP accelerator CLI, unauthorized access"),
    (6379, "Redis unauthorized access"),
    (7001, "WebLogic weak default credentials, deserialization"),
    (7002, "WebLogic weak default credentials, deserialization"),
    (7008, "SSRF vulnerability"),
    (7778, "Kloxo control panel login"),
    (8080, "JBoss"),
    (8083, "Vesta control panel"),
    (8089, "JBoss"),
    (8649, "Ganglia"),
    (8808, "Web application"),
    (8888, "AMH/LuManager host management default port"),
    (9090, "JBoss"),
    (9200, "Elasticsearch"),
    (9300, "Elasticsearch"),
    (10000, "Virtualmin/Webmin server management"),
    (11211, "Memcached unauthorized access"),
    (15672, "RabbitMQ (guest/guest)"),
    (27017, "MongoDB unauthorized access"),
    (27018, "MongoDB unauthorized access"),
    (28017, "MongoDB statistics page"),
    (50000, "SAP command execution"),
    (50030, "Hadoop unauthorized access"),
    (50070, "Hadoop unauthorized access"),
];

#[derive(Debug, Clone, Copy)]
pub struct ServiceFingerprints {
    entries: &'static [(u16, &'static str)],
}

impl ServiceFingerprints {
    pub const fn builtin() -> Self {
        Self { entries: BUILTIN }
    }

    pub fn lookup(&self, port: u16) -> Option<&'static str> {
        self.entries
            .binary_search_by_key(&port, |&(known, _)| known)
            .ok()
            .map(|idx| self.entries[idx].1)
    }

    /// Same as [`lookup`](Self::lookup) but falls back to [`MANUAL_CONFIRMATION`].
    pub fn describe(&self, port: u16) -> &'static str {
        self.lookup(port).unwrap_or(MANUAL_CONFIRMATION)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ServiceFingerprints {
    fn default() -> Self {
        Self::builtin()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ports::FAST_PORTS;

    #[test]
    fn builtin_table_is_sorted_for_binary_search() {
        assert!(BUILTIN.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn known_ports_have_descriptions() {
        let fingerprints: ServiceFingerprints = ServiceFingerprints::builtin();
        assert_eq!(fingerprints.lookup(22), Some("SSH"));
        assert_eq!(fingerprints.lookup(3306), Some("MySQL"));
        assert_eq!(fingerprints.describe(6379), "Redis unauthorized access");
    }

    #[test]
    fn unknown_ports_need_manual_confirmation() {
        let fingerprints: ServiceFingerprints = ServiceFingerprints::default();
        assert_eq!(fingerprints.lookup(31337), None);
        assert_eq!(fingerprints.describe(31337), MANUAL_CONFIRMATION);
        assert_eq!(fingerprints.describe(1), MANUAL_CONFIRMATION);
    }

    #[test]
    fn every_fast_port_is_fingerprinted() {
        let fingerprints: ServiceFingerprints = ServiceFingerprints::builtin();
        for port in FAST_PORTS {
            assert!(fingerprints.lookup(port).is_some(), "port {port} has no entry");
        }
        assert_eq!(fingerprints.len(), FAST_PORTS.len());
    }
}
