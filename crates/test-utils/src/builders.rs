//! Builders for realistic check-script output.

/// Builds the text a `splitroute_check.sh --no-curl` run would print.
///
/// ```text
/// WIFI_IF=en0 (status: active)
/// GW4(en0)=172.20.10.1
/// == Route table check ==
/// host ip gateway iface flags status
/// example.com 93.184.216.34 172.20.10.1 en0 UGSc OK
/// == DNS overrides ==
/// ```
#[derive(Debug, Default, Clone)]
pub struct CheckOutputBuilder {
    wifi: Option<(String, String)>,
    gw4: Option<String>,
    rows: Vec<(String, String)>,
    with_header_row: bool,
    trailing_section: bool,
}

impl CheckOutputBuilder {
    pub fn new() -> Self {
        Self {
            with_header_row: true,
            trailing_section: false,
            ..Self::default()
        }
    }

    /// Add a `WIFI_IF=<iface> (status: <status>)` line.
    pub fn wifi(mut self, iface: &str, status: &str) -> Self {
        self.wifi = Some((iface.to_string(), status.to_string()));
        self
    }

    /// Add a `GW4(<iface>)=<value>` line; pass `""` for a missing gateway.
    pub fn gw4(mut self, value: &str) -> Self {
        self.gw4 = Some(value.to_string());
        self
    }

    /// Add one route row with the given host and status code.
    pub fn row(mut self, host: &str, status: &str) -> Self {
        self.rows.push((host.to_string(), status.to_string()));
        self
    }

    /// Skip the `... status` column-header row.
    pub fn without_header_row(mut self) -> Self {
        self.with_header_row = false;
        self
    }

    /// Append a section after the route table, to prove rows outside the
    /// route section are ignored.
    pub fn with_trailing_section(mut self) -> Self {
        self.trailing_section = true;
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        if let Some((iface, status)) = &self.wifi {
            out.push_str(&format!("WIFI_IF={iface} (status: {status})\n"));
        }
        if let Some(gw4) = &self.gw4 {
            out.push_str(&format!("GW4(en0)={gw4}\n"));
        }
        out.push_str("== Route table check ==\n");
        if self.with_header_row {
            out.push_str("host ip gateway iface flags status\n");
        }
        for (host, status) in &self.rows {
            out.push_str(&format!(
                "{host} 93.184.216.34 172.20.10.1 en0 UGSc {status}\n"
            ));
        }
        if self.trailing_section {
            out.push_str("== DNS overrides ==\n");
            out.push_str("ignored row with exactly six fields here OK\n");
        }
        out
    }
}
