use std::fmt;

use chrono::{Local, NaiveDateTime};
use tracing::warn;

use super::schema::{ALB_LOG_COLUMNS, CsvOptions, render_columns};
use crate::config::{TABLE_NAME_PREFIX, TABLE_NAME_TIMESTAMP_FORMAT};

const CREDENTIAL_SETUP: &str = "\
-- Install the AWS extensions and resolve credentials from the default chain
INSTALL aws;
LOAD aws;
INSTALL httpfs;
LOAD httpfs;
CREATE SECRET secret_s3 (
    TYPE S3,
    PROVIDER CREDENTIAL_CHAIN
);";

/// Characters that can end a quoted literal or a statement in the rendered SQL
const STATEMENT_BREAKING_CHARS: [char; 5] = ['\'', '"', ';', '\n', '\r'];

/// The three fragments of an init script, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    pub table_name: String,
    pub credential_setup: String,
    pub create_table: String,
    pub notice: String,
}

impl fmt::Display for GeneratedScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n\n{}\n\n{}",
            self.credential_setup, self.create_table, self.notice
        )
    }
}

/// Renders the DuckDB init script that loads ALB logs from S3 into a table
///
/// Table names and paths are interpolated verbatim, without quoting or
/// escaping. Values containing quotes or semicolons change the emitted SQL;
/// [`SqlGenerator::script`] logs a warning when it sees one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlGenerator;

impl SqlGenerator {
    pub fn new() -> Self {
        Self
    }

    /// `alb_logs_YYYYMMDD_HHMMSS` for the given wall-clock time
    pub fn generate_table_name(&self, now: NaiveDateTime) -> String {
        format!(
            "{}{}",
            TABLE_NAME_PREFIX,
            now.format(TABLE_NAME_TIMESTAMP_FORMAT)
        )
    }

    /// Use `table_name` when given and non-empty, otherwise generate one from
    /// the local clock
    pub fn resolve_table_name(&self, table_name: Option<&str>) -> String {
        match table_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.generate_table_name(Local::now().naive_local()),
        }
    }

    /// Extension setup plus an S3 secret backed by the ambient credential chain
    pub fn credential_setup(&self) -> String {
        CREDENTIAL_SETUP.to_string()
    }

    pub fn create_table(&self, table_name: &str, s3_path: &str) -> String {
        let columns = render_columns(&ALB_LOG_COLUMNS, "        ");
        let options = CsvOptions::alb().render("    ");
        format!(
            "-- Create the ALB log table\n\
             CREATE TABLE {table_name} AS\n\
             SELECT *\n\
             FROM read_csv(\n    \
             '{s3_path}',\n    \
             columns={{\n{columns}\n    }},\n\
             {options}\n\
             );"
        )
    }

    pub fn notice(&self, table_name: &str) -> String {
        format!(
            "-- Message for the interactive session\n\
             SELECT 'ALB logs loaded. You can now query the table: {table_name}' AS message;\n"
        )
    }

    /// Build all fragments, resolving the table name first so the notice and
    /// the `CREATE TABLE` always agree
    pub fn script(&self, s3_path: &str, table_name: Option<&str>) -> GeneratedScript {
        let table_name = self.resolve_table_name(table_name);

        if contains_statement_breaking_chars(&table_name) {
            warn!(
                "Table name {:?} contains quote, semicolon or newline characters; it is used verbatim in the generated SQL",
                table_name
            );
        }
        if contains_statement_breaking_chars(s3_path) {
            warn!(
                "S3 path {:?} contains quote, semicolon or newline characters; it is used verbatim in the generated SQL",
                s3_path
            );
        }

        GeneratedScript {
            credential_setup: self.credential_setup(),
            create_table: self.create_table(&table_name, s3_path),
            notice: self.notice(&table_name),
            table_name,
        }
    }

    /// The complete init script as a single string
    pub fn complete(&self, s3_path: &str, table_name: Option<&str>) -> String {
        self.script(s3_path, table_name).to_string()
    }
}

fn contains_statement_breaking_chars(value: &str) -> bool {
    value.contains(&STATEMENT_BREAKING_CHARS[..])
}
