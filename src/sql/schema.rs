//! The fixed column layout of an ALB access log line

/// DuckDB column type used by the ALB log schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Varchar,
    Timestamp,
    Double,
    Integer,
    BigInt,
}

impl SqlType {
    /// Returns the DuckDB type name
    pub fn to_duckdb(self) -> &'static str {
        match self {
            SqlType::Varchar => "VARCHAR",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Double => "DOUBLE",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
        }
    }
}

/// A column in the log schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: SqlType,
}

const fn col(name: &'static str, sql_type: SqlType) -> Column {
    Column { name, sql_type }
}

/// ALB access log fields, in the order they appear on each line
///
/// See https://docs.aws.amazon.com/elasticloadbalancing/latest/application/load-balancer-access-logs.html
pub const ALB_LOG_COLUMNS: [Column; 30] = [
    col("type", SqlType::Varchar),
    col("timestamp", SqlType::Timestamp),
    col("elb", SqlType::Varchar),
    col("client_ip_port", SqlType::Varchar),
    col("target_ip_port", SqlType::Varchar),
    col("request_processing_time", SqlType::Double),
    col("target_processing_time", SqlType::Double),
    col("response_processing_time", SqlType::Double),
    col("elb_status_code", SqlType::Integer),
    // "-" when the request never reached a target
    col("target_status_code", SqlType::Varchar),
    col("received_bytes", SqlType::BigInt),
    col("sent_bytes", SqlType::BigInt),
    col("request", SqlType::Varchar),
    col("user_agent", SqlType::Varchar),
    col("ssl_cipher", SqlType::Varchar),
    col("ssl_protocol", SqlType::Varchar),
    col("target_group_arn", SqlType::Varchar),
    col("trace_id", SqlType::Varchar),
    col("domain_name", SqlType::Varchar),
    col("chosen_cert_arn", SqlType::Varchar),
    col("matched_rule_priority", SqlType::Varchar),
    col("request_creation_time", SqlType::Timestamp),
    col("actions_executed", SqlType::Varchar),
    col("redirect_url", SqlType::Varchar),
    col("error_reason", SqlType::Varchar),
    col("target_port_list", SqlType::Varchar),
    col("target_status_code_list", SqlType::Varchar),
    col("classification", SqlType::Varchar),
    col("classification_reason", SqlType::Varchar),
    col("conn_trace_id", SqlType::Varchar),
];

/// `read_csv` options for the space-delimited log format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: char,
    pub quote: char,
    pub escape: char,
    pub header: bool,
    pub auto_detect: bool,
}

impl CsvOptions {
    /// ALB logs: space separated, double-quoted fields, no header row, and the
    /// explicit column list above is authoritative
    pub const fn alb() -> Self {
        Self {
            delimiter: ' ',
            quote: '"',
            escape: '"',
            header: false,
            auto_detect: false,
        }
    }

    /// Render as trailing `read_csv` keyword arguments, one per line
    pub fn render(&self, indent: &str) -> String {
        [
            format!("{indent}delim='{}'", self.delimiter),
            format!("{indent}quote='{}'", self.quote),
            format!("{indent}escape='{}'", self.escape),
            format!("{indent}header={}", duckdb_bool(self.header)),
            format!("{indent}auto_detect={}", duckdb_bool(self.auto_detect)),
        ]
        .join(",\n")
    }
}

fn duckdb_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Render columns as the body of a DuckDB `columns={...}` struct literal
pub fn render_columns(columns: &[Column], indent: &str) -> String {
    columns
        .iter()
        .map(|c| format!("{indent}'{}': '{}'", c.name, c.sql_type.to_duckdb()))
        .collect::<Vec<_>>()
        .join(",\n")
}
