use crate::client::{ClientConfig, DEFAULT_SERVER};
use crate::core::filter::SortMode;
use crate::core::orchestrator::{ImportForm, PollConfig};
use crate::core::pagination::DEFAULT_PAGE_SIZE;
use crate::core::view::ViewController;
use crate::io::ExportFormat;
use crate::types::BlockHeight;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Import a Zcash unified viewing key and browse its transactions
#[derive(Parser, Debug)]
#[command(name = "ufvk-viewer")]
#[command(about = "Import a Zcash unified viewing key and browse its transactions", long_about = None)]
pub struct CliArgs {
    /// Base URL of the scan service
    #[arg(
        long = "server",
        value_name = "URL",
        env = "UFVK_VIEWER_SERVER",
        default_value = DEFAULT_SERVER,
        help = "Base URL of the scan service"
    )]
    pub server: String,

    /// Milliseconds between two job status requests
    #[arg(
        long = "poll-interval-ms",
        value_name = "MILLIS",
        help = "Milliseconds between job status requests (default: 2000)"
    )]
    pub poll_interval_ms: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(
        long = "timeout-ms",
        value_name = "MILLIS",
        help = "Fail a job when a single request takes longer than this (default: no timeout)"
    )]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the current chain height
    Height,

    /// Scan a viewing key and print its transactions
    Import(ImportArgs),
}

/// Options of the `import` subcommand
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Unified full viewing key to scan
    #[arg(long = "key", value_name = "UFVK")]
    pub view_key: String,

    /// Block height at which the wallet was created
    #[arg(long = "birthday", value_name = "HEIGHT")]
    pub birthday: String,

    /// Label for the scanned wallet
    #[arg(long = "wallet-name", value_name = "NAME", default_value = "")]
    pub wallet_name: String,

    /// Only show transactions containing this text
    #[arg(long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Lowest mined height to show (inclusive)
    #[arg(long = "height-from", value_name = "HEIGHT")]
    pub height_from: Option<BlockHeight>,

    /// Highest mined height to show (inclusive)
    #[arg(long = "height-to", value_name = "HEIGHT")]
    pub height_to: Option<BlockHeight>,

    /// Sort order of the listing
    #[arg(long = "sort", value_name = "MODE", default_value = "height_desc")]
    pub sort: SortMode,

    /// Page to print
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Transactions per page
    #[arg(long = "page-size", value_name = "N", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Print every matching transaction instead of one page
    #[arg(long = "all")]
    pub show_all: bool,

    /// Export formats to write, comma separated
    #[arg(long = "export", value_name = "FORMAT", value_delimiter = ',')]
    pub exports: Vec<ExportFormat>,

    /// Directory exports are written to
    #[arg(long = "out", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}

impl CliArgs {
    /// Create a PollConfig from CLI arguments
    ///
    /// Invalid values fall back to defaults with a warning (see [`PollConfig::new`]).
    pub fn to_poll_config(&self) -> PollConfig {
        if self.poll_interval_ms.is_none() && self.timeout_ms.is_none() {
            return PollConfig::default();
        }

        let default = PollConfig::default();
        PollConfig::new(
            self.poll_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(default.poll_interval),
            self.timeout_ms.map(Duration::from_millis),
        )
    }

    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.server)
    }
}

impl ImportArgs {
    pub fn to_form(&self) -> ImportForm {
        ImportForm::new(&self.view_key, &self.birthday, &self.wallet_name)
    }

    /// Apply the listing options to a loaded view
    ///
    /// Criteria go first since each of them resets the page.
    pub fn apply_to(&self, view: &mut ViewController) {
        if let Some(filter) = &self.filter {
            view.set_filter_text(filter);
        }
        view.set_height_from(self.height_from);
        view.set_height_to(self.height_to);
        view.set_sort_mode(self.sort);
        view.set_page_size(self.page_size);
        view.set_show_all(self.show_all);
        view.go_to_page(self.page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn import_args(args: &[&str]) -> ImportArgs {
        match CliArgs::try_parse_from(args).unwrap().command {
            Command::Import(import) => import,
            other => panic!("Expected import, got {:?}", other),
        }
    }

    #[test]
    fn test_height_subcommand() {
        let parsed =
            CliArgs::try_parse_from(["program", "--server", "http://example.org", "height"]).unwrap();
        assert!(matches!(parsed.command, Command::Height));
        assert_eq!(parsed.server, "http://example.org");
    }

    #[test]
    fn test_import_defaults() {
        let import = import_args(&["program", "import", "--key", "uview1x", "--birthday", "2600000"]);

        assert_eq!(import.view_key, "uview1x");
        assert_eq!(import.birthday, "2600000");
        assert_eq!(import.wallet_name, "");
        assert_eq!(import.filter, None);
        assert_eq!(import.sort, SortMode::HeightDesc);
        assert_eq!(import.page, 1);
        assert_eq!(import.page_size, DEFAULT_PAGE_SIZE);
        assert!(!import.show_all);
        assert!(import.exports.is_empty());
        assert_eq!(import.out_dir, PathBuf::from("."));
    }

    // Sort mode parsing
    #[rstest]
    #[case::height_asc("height_asc", SortMode::HeightAsc)]
    #[case::height_desc("height_desc", SortMode::HeightDesc)]
    #[case::amount_asc("amount_asc", SortMode::AmountAsc)]
    #[case::amount_desc("amount_desc", SortMode::AmountDesc)]
    #[case::time_asc("time_asc", SortMode::TimeAsc)]
    #[case::time_desc("time_desc", SortMode::TimeDesc)]
    fn test_sort_parsing(#[case] value: &str, #[case] expected: SortMode) {
        let import = import_args(&["program", "import", "--key", "k", "--birthday", "1", "--sort", value]);
        assert_eq!(import.sort, expected);
    }

    #[rstest]
    #[case::single(&["--export", "csv"], vec![ExportFormat::Csv])]
    #[case::comma_separated(&["--export", "csv,json,raw"], vec![ExportFormat::Csv, ExportFormat::Json, ExportFormat::Raw])]
    #[case::repeated(&["--export", "text", "--export", "json"], vec![ExportFormat::Text, ExportFormat::Json])]
    fn test_export_parsing(#[case] extra: &[&str], #[case] expected: Vec<ExportFormat>) {
        let mut args = vec!["program", "import", "--key", "k", "--birthday", "1"];
        args.extend_from_slice(extra);
        assert_eq!(import_args(&args).exports, expected);
    }

    // PollConfig conversion, zero values fall back
    #[rstest]
    #[case::defaults(&["program", "height"], Duration::from_secs(2), None)]
    #[case::custom_interval(&["program", "--poll-interval-ms", "500", "height"], Duration::from_millis(500), None)]
    #[case::custom_timeout(&["program", "--timeout-ms", "1500", "height"], Duration::from_secs(2), Some(Duration::from_millis(1500)))]
    #[case::zero_interval(&["program", "--poll-interval-ms", "0", "height"], Duration::from_secs(2), None)]
    #[case::zero_timeout(&["program", "--timeout-ms", "0", "height"], Duration::from_secs(2), None)]
    fn test_poll_config_conversion(
        #[case] args: &[&str],
        #[case] interval: Duration,
        #[case] timeout: Option<Duration>,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_poll_config();
        assert_eq!(config.poll_interval, interval);
        assert_eq!(config.request_timeout, timeout);
    }

    #[test]
    fn test_blank_key_reaches_validation() {
        let import = import_args(&["program", "import", "--key", "", "--birthday", "1"]);
        assert_eq!(import.to_form().validate(), Err(crate::types::ViewerError::MissingInput));
    }

    // Error handling tests
    #[rstest]
    #[case::missing_subcommand(&["program"])]
    #[case::missing_key(&["program", "import", "--birthday", "1"])]
    #[case::missing_birthday(&["program", "import", "--key", "k"])]
    #[case::invalid_sort(&["program", "import", "--key", "k", "--birthday", "1", "--sort", "random"])]
    #[case::invalid_export(&["program", "import", "--key", "k", "--birthday", "1", "--export", "pdf"])]
    #[case::negative_height(&["program", "import", "--key", "k", "--birthday", "1", "--height-from", "-1"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
