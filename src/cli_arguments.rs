use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub(crate) struct CliArguments {
    #[arg(short, long)]
    pub base_url: String,

    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long, default_value = "cursor")]
    pub cursor_param: String,

    #[command(subcommand)]
    pub verb: Verb,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub(crate) enum Verb {
    /// Fetch a collection
    Query {
        #[arg(short, long)]
        url: String,

        #[arg(short, long)]
        cursor: Option<String>,
    },
    /// Fetch a single resource
    Read {
        #[arg(short, long)]
        url: String,

        #[arg(short, long)]
        id: Option<String>,
    },
    /// Create a resource, or update it when the data carries an id
    Write {
        #[arg(short, long)]
        url: String,

        /// JSON object with the resource fields
        #[arg(short, long, value_parser = parse_json)]
        data: Value,
    },
    /// Delete the resource whose id is in the data
    Destroy {
        #[arg(short, long)]
        url: String,

        /// JSON object carrying the resource id
        #[arg(short, long, value_parser = parse_json)]
        data: Value,
    },
}

fn parse_json(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod test {
    use clap::{Parser, error::ErrorKind};
    use serde_json::json;

    use crate::cli_arguments::{CliArguments, Verb};

    #[test]
    fn test_cli_arguments_long_flags() {
        let args = CliArguments::parse_from([
            "http-repository",
            "--base-url",
            "http://localhost:9000",
            "--timeout-secs",
            "5",
            "--cursor-param",
            "after",
            "query",
            "--url",
            "/good_stuff",
            "--cursor",
            "After-Cursor",
        ]);

        assert_eq!(args.base_url, "http://localhost:9000");
        assert_eq!(args.timeout_secs, 5);
        assert_eq!(args.cursor_param, "after");
        assert_eq!(
            args.verb,
            Verb::Query {
                url: "/good_stuff".to_string(),
                cursor: Some("After-Cursor".to_string()),
            }
        );
    }

    #[test]
    fn test_cli_arguments_short_flags_and_defaults() {
        let args = CliArguments::parse_from([
            "http-repository",
            "-b",
            "https://example.com",
            "read",
            "-u",
            "/good_stuff",
            "-i",
            "123",
        ]);

        assert_eq!(args.base_url, "https://example.com");
        assert_eq!(args.timeout_secs, 30);
        assert_eq!(args.cursor_param, "cursor");
        assert_eq!(
            args.verb,
            Verb::Read {
                url: "/good_stuff".to_string(),
                id: Some("123".to_string()),
            }
        );
    }

    #[test]
    fn test_cli_arguments_write_requires_data() {
        let result = CliArguments::try_parse_from([
            "http-repository",
            "-b",
            "http://localhost:9000",
            "write",
            "-u",
            "/good_stuff",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_cli_arguments_parse_data_as_json() {
        let args = CliArguments::parse_from([
            "http-repository",
            "-b",
            "http://localhost:9000",
            "destroy",
            "-u",
            "/good_stuff",
            "-d",
            r#"{"id": 123}"#,
        ]);

        assert_eq!(
            args.verb,
            Verb::Destroy {
                url: "/good_stuff".to_string(),
                data: json!({"id": 123}),
            }
        );
    }

    #[test]
    fn test_cli_arguments_reject_malformed_data() {
        let error = CliArguments::try_parse_from([
            "http-repository",
            "-b",
            "http://localhost:9000",
            "write",
            "-u",
            "/good_stuff",
            "-d",
            r#"{"name": "#,
        ])
        .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ValueValidation);
    }
}
