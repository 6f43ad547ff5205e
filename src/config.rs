use clap::Parser;

const DEFAULT_INPUT_PATH: &str = "/Volumes/Kindle/documents";
const DEFAULT_DESTINATION: &str = "./clippings";
const DEFAULT_JSON_DESTINATION: &str = "./clippings.json";

#[derive(Parser, Debug)]
#[command(name = "klip")]
#[command(about = "Sync Kindle clippings into per-book markdown files or JSON")]
pub struct CliArgs {
    /// Path to "My Clippings.txt", or a mounted Kindle root to search
    #[arg(short, long)]
    pub input: Option<String>,

    /// Destination directory (markdown mode) or file (JSON mode)
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Write a single JSON document instead of per-book markdown files
    #[arg(long)]
    pub json: bool,

    /// Print progress details
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_path: String,
    pub destination: String,
    pub json: bool,
    pub verbose: bool,
}

impl Config {
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_args(CliArgs::parse())
    }

    fn from_args(cli: CliArgs) -> Self {
        let input_path = cli
            .input
            .or_else(|| std::env::var("CLIPPINGS_PATH").ok())
            .unwrap_or_else(|| DEFAULT_INPUT_PATH.to_string());

        let destination = cli
            .destination
            .or_else(|| std::env::var("DESTINATION_PATH").ok())
            .unwrap_or_else(|| {
                if cli.json {
                    DEFAULT_JSON_DESTINATION.to_string()
                } else {
                    DEFAULT_DESTINATION.to_string()
                }
            });

        Config {
            input_path,
            destination,
            json: cli.json,
            verbose: cli.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cli(input: Option<&str>, destination: Option<&str>, json: bool) -> CliArgs {
        CliArgs {
            input: input.map(String::from),
            destination: destination.map(String::from),
            json,
            verbose: false,
        }
    }

    #[test]
    fn test_explicit_paths_win() {
        let cli = make_cli(Some("/mnt/kindle"), Some("./notes"), false);

        let config = Config::from_args(cli);

        assert_eq!(config.input_path, "/mnt/kindle");
        assert_eq!(config.destination, "./notes");
    }

    #[test]
    fn test_json_mode_defaults_to_json_destination() {
        let cli = make_cli(None, Some("./out.json"), true);

        let config = Config::from_args(cli);

        assert!(config.json);
        assert_eq!(config.destination, "./out.json");

        let defaulted = Config::from_args(make_cli(None, None, true));
        assert!(defaulted.destination.ends_with(".json"));
    }
}
