//! Static log tables used across harnesses.
//!
//! The CSV fixtures mirror what a network monitor's logs look like after
//! conversion to CSV; [`CONN_MONITOR_LOG`] is the native tab-separated form.
//! Expected totals for [`write_fixture_dir`] are listed in [`FIXTURE_TOTALS`].

use std::path::Path;

/// Five connections: an expanding service, a single service, no service,
/// a missing timestamp and a mixed-case expanding service.
///
/// Normalizes to 6 rows; 1 dropped; 2 expanded.
pub const CONN_CSV: &str = "\
ts,uid,id.orig_h,id.resp_h,proto,service,duration,orig_bytes,resp_bytes
1700000000.000000,C1,10.0.0.1,10.0.0.2,tcp,\"http,ssl\",0.5,100,50
1700000010.250000,C2,10.0.0.1,10.0.0.3,udp,dns,0.01,40,80
1700000031.000000,C3,10.0.0.1,10.0.0.4,tcp,-,-,-,-
-,C4,10.0.0.5,10.0.0.6,tcp,http,1.2,10,10
1700000062.500000,C5,10.0.0.5,10.0.0.7,tcp,\"GSSAPI, DCE_RPC\",3.0,300,(empty)
";

/// DNS log without `proto`/`service`: every row becomes `unknown_dns`.
///
/// Normalizes to 2 rows; 1 dropped.
pub const DNS_CSV: &str = "\
ts,uid,query,qtype_name,rcode_name
1700000001,D1,example.com,A,NOERROR
1700000002.5,D2,example.org,AAAA,NXDOMAIN
not-a-time,D3,bad.example,A,NOERROR
";

/// HTTP log: `response_body_len` is the byte source.
pub const HTTP_CSV: &str = "\
ts,uid,method,host,uri,status_code,response_body_len
1700000003,H1,GET,example.com,/,200,512
1700000033,H2,POST,example.com,/api,500,garbage
";

/// File log: `total_bytes` is the byte source.
pub const FILES_CSV: &str = "\
ts,fuid,source,mime_type,total_bytes,seen_bytes
1700000004,F1,HTTP,text/html,2048,2048
1700000005,F2,SSL,application/x-x509-ca-cert,-,900
";

/// Native tab-separated connection log with directive lines.
pub const CONN_MONITOR_LOG: &str = "#separator \\x09
#set_separator\t,
#empty_field\t(empty)
#unset_field\t-
#path\tconn
#open\t2023-11-14-22-13-20
#fields\tts\tuid\tproto\tservice\torig_bytes\tresp_bytes
#types\ttime\tstring\tenum\tstring\tcount\tcount
1700000000.000000\tC1\ttcp\thttp,ssl\t100\t50
1700000001.000000\tC2\tudp\t-\t-\t-
#close\t2023-11-14-23-00-00
";

/// Totals after normalizing the directory written by [`write_fixture_dir`].
pub struct Totals {
    pub records_in: usize,
    pub records_out: usize,
    pub dropped_timestamps: usize,
    pub expanded_records: usize,
}

pub const FIXTURE_TOTALS: Totals = Totals {
    records_in: 12,
    records_out: 12,
    dropped_timestamps: 2,
    expanded_records: 2,
};

/// Write the four CSV fixtures plus a non-table file into `dir`.
pub fn write_fixture_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::write(dir.join("conn.log.csv"), CONN_CSV)?;
    std::fs::write(dir.join("dns.log.csv"), DNS_CSV)?;
    std::fs::write(dir.join("http.log.csv"), HTTP_CSV)?;
    std::fs::write(dir.join("files.log.csv"), FILES_CSV)?;
    std::fs::write(dir.join("notes.txt"), "not a log table")?;
    Ok(())
}
