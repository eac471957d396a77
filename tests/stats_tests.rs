use netsec_scan::stats::{extract_statistics, extract_statistics_with, ExtractionMode};
use netsec_scan::types::ScanStatus;

const QUICK_SCAN: &str = "\
Starting Nmap 7.94 ( https://nmap.org ) at 2025-03-04 05:06 UTC
Nmap scan report for 192.168.1.10
Host is up (0.0012s latency).
Not shown: 97 closed tcp ports (reset)
PORT    STATE SERVICE
22/tcp  open  ssh
80/tcp  open  http
443/tcp open  https
MAC Address: AA:BB:CC:DD:EE:FF (Unknown)

Nmap done: 1 IP address (1 host up) scanned in 1.84 seconds
";

const VULN_SCAN: &str = "\
Starting Nmap 7.94 ( https://nmap.org ) at 2025-03-04 05:06 UTC
Nmap scan report for 10.0.0.5
PORT   STATE SERVICE VERSION
21/tcp open  ftp     vsftpd 2.3.4
| ftp-vsftpd-backdoor:
|   VULNERABLE:
|   vsFTPd version 2.3.4 backdoor
|     State: VULNERABLE (Exploitable)
|     IDs:  CVE:CVE-2011-2523  BID:48539
|       Risk factor: High
80/tcp open  http    Apache httpd 2.4.49
|_http-server-header: Apache/2.4.49 (Unix)
";

#[test]
fn quick_scan_output() {
    let stats = extract_statistics(QUICK_SCAN);
    // The trailing "Nmap done ... (1 host up)" line is the last host verdict.
    assert_eq!(stats.scan_status, ScanStatus::HostUp);
    assert_eq!(stats.hosts_up, 1);
    let ports: Vec<(&str, &str)> = stats
        .open_ports
        .iter()
        .map(|p| (p.port.as_str(), p.service.as_str()))
        .collect();
    assert_eq!(ports, vec![("22", "ssh"), ("80", "http"), ("443", "https")]);
    assert!(stats.vulnerabilities.is_empty());
    assert!(stats.services.is_empty());
}

#[test]
fn vulnerability_scan_output() {
    let stats = extract_statistics(VULN_SCAN);
    assert_eq!(stats.scan_status, ScanStatus::HostFound);
    assert_eq!(stats.open_ports.len(), 2);
    assert_eq!(stats.open_ports[0].service, "ftp");
    assert_eq!(stats.open_ports[1].service, "http");

    assert!(stats
        .vulnerabilities
        .iter()
        .any(|v| v == "|     IDs:  CVE:CVE-2011-2523  BID:48539"));
    assert!(stats
        .vulnerabilities
        .iter()
        .any(|v| v == "|       Risk factor: High"));
    assert!(stats.vulnerabilities.iter().any(|v| v == "|   VULNERABLE:"));
}

#[test]
fn lookahead_can_carry_script_output_into_version() {
    let out = "\
PORT   STATE SERVICE
80/tcp open  http
| http-title: Product page
";
    let stats = extract_statistics(out);
    assert_eq!(
        stats.open_ports[0].version.as_deref(),
        Some("| http-title: Product page")
    );
}

#[test]
fn repeated_identical_port_lines_share_first_lookahead() {
    let out = "\
PORT   STATE SERVICE
80/tcp open
first-guess

PORT   STATE SERVICE
80/tcp open
second-guess
";
    let stats = extract_statistics(out);
    assert_eq!(stats.open_ports.len(), 2);
    assert_eq!(stats.open_ports[0].service, "first-guess");
    assert_eq!(stats.open_ports[1].service, "first-guess");
}

#[test]
fn discovery_with_no_hosts() {
    let out = "\
Starting Nmap 7.94 ( https://nmap.org ) at 2025-03-04 05:06 UTC
Nmap done: 256 IP addresses (0 hosts up) scanned in 104.12 seconds
";
    let corrected = extract_statistics(out);
    assert_eq!(corrected.scan_status, ScanStatus::HostDown);
    assert_eq!(corrected.hosts_up, 0);

    let literal = extract_statistics_with(out, ExtractionMode::Literal);
    assert_eq!(literal.scan_status, ScanStatus::HostUp);
    assert_eq!(literal.hosts_up, 1);
}

#[test]
fn host_counts_ending_in_zero_are_up() {
    let out = "\
Starting Nmap 7.94 ( https://nmap.org ) at 2025-03-04 05:06 UTC
Nmap scan report for 192.168.1.1
Host is up (0.0011s latency).
Nmap scan report for 192.168.1.20
Host is up (0.0034s latency).
Nmap done: 256 IP addresses (10 hosts up) scanned in 2.51 seconds
";
    let stats = extract_statistics(out);
    assert_eq!(stats.scan_status, ScanStatus::HostUp);
    assert_eq!(stats.hosts_up, 1);

    let out = "Nmap done: 1024 IP addresses (100 hosts up) scanned in 30.02 seconds\n";
    let stats = extract_statistics(out);
    assert_eq!(stats.scan_status, ScanStatus::HostUp);
    assert_eq!(stats.hosts_up, 1);
}

#[test]
fn read_data_files_line_ends_port_table() {
    let out = "\
Nmap scan report for 10.0.0.1
PORT   STATE SERVICE
22/tcp open  ssh
Read data files from: /usr/bin/../share/nmap
8080/tcp open http-proxy
";
    let stats = extract_statistics(out);
    let ports: Vec<&str> = stats.open_ports.iter().map(|p| p.port.as_str()).collect();
    assert_eq!(ports, vec!["22"]);
}

#[test]
fn next_report_line_ends_port_table() {
    let out = "\
Nmap scan report for 10.0.0.1
PORT   STATE SERVICE
22/tcp open  ssh
Nmap scan report for 10.0.0.2
8080/tcp open http-proxy
";
    let stats = extract_statistics(out);
    let ports: Vec<&str> = stats.open_ports.iter().map(|p| p.port.as_str()).collect();
    assert_eq!(ports, vec!["22"]);
    assert_eq!(stats.last_host.as_deref(), Some("10.0.0.2"));
}

#[test]
fn cve_line_captured_outside_port_table() {
    let out = "Host script results:\n| smb-vuln-ms17-010: CVE-2017-0143\n";
    let stats = extract_statistics(out);
    assert_eq!(stats.vulnerabilities, vec!["| smb-vuln-ms17-010: CVE-2017-0143"]);
}
