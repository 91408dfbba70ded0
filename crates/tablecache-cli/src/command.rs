//! Command-line argument parsing.

use clap::{Args, Parser, Subcommand};
use tablecache_core::helper::ALL;
use tablecache_core::{Config, ReviewDraft};

#[derive(Debug, Parser)]
#[command(name = "tablecache", version)]
#[command(about = "Browse restaurants, favorites and reviews - works offline")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    /// The command to run; a bare `tablecache` lists every restaurant.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or_else(|| Command::List {
            cuisine: ALL.to_string(),
            neighborhood: ALL.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List restaurants ("all" means no filter)
    List {
        #[arg(short, long, default_value = ALL)]
        cuisine: String,

        #[arg(short, long, default_value = ALL)]
        neighborhood: String,
    },

    /// Show a restaurant with its reviews
    Show { id: u64 },

    /// List cuisine types
    Cuisines,

    /// List neighborhoods
    Neighborhoods,

    /// List favorite restaurants
    Favorites,

    /// Toggle a restaurant's favorite mark
    Favorite { id: u64 },

    /// Leave a review; it is queued and delivered right away when possible
    Review(ReviewArgs),

    /// Show reviews waiting to be delivered
    Pending,

    /// Deliver pending reviews
    Sync,

    /// Show cache state
    Status,

    /// Drop cached data and fetch it again
    Reload,

    /// Show settings, or change them with the options below
    Config(ConfigArgs),
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct ReviewArgs {
    pub restaurant_id: u64,

    /// Your name
    pub name: String,

    /// Rating from 1 to 5
    pub rating: u8,

    /// Review text
    pub comments: Vec<String>,
}

impl From<ReviewArgs> for ReviewDraft {
    fn from(args: ReviewArgs) -> Self {
        let comments = (!args.comments.is_empty()).then(|| args.comments.join(" "));
        ReviewDraft {
            restaurant_id: args.restaurant_id,
            name: args.name,
            rating: args.rating,
            comments,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct ConfigArgs {
    /// Server base URL
    #[arg(long)]
    pub server: Option<String>,

    /// Keep a local copy of server data
    #[arg(long)]
    pub offline_storage: Option<bool>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Also write logs to a daily file in the cache directory
    #[arg(long)]
    pub log_to_file: Option<bool>,
}

impl ConfigArgs {
    pub fn has_changes(&self) -> bool {
        *self != Self::default()
    }

    pub fn apply(self, config: &mut Config) {
        if let Some(server) = self.server {
            config.api_base_url = Some(server);
        }
        if let Some(offline_storage) = self.offline_storage {
            config.offline_storage = offline_storage;
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = (timeout > 0).then_some(timeout);
        }
        if let Some(log_to_file) = self.log_to_file {
            config.log_to_file = log_to_file;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn parse(line: &str) -> Result<Command, clap::Error> {
        let args = std::iter::once("tablecache").chain(line.split_whitespace());
        Cli::try_parse_from(args).map(Cli::into_command)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_is_full_list() {
        assert_eq!(
            parse("").unwrap(),
            Command::List {
                cuisine: "all".to_string(),
                neighborhood: "all".to_string()
            }
        );
    }

    #[test]
    fn test_list_filters() {
        assert_eq!(
            parse("list --cuisine Asian -n Brooklyn").unwrap(),
            Command::List {
                cuisine: "Asian".to_string(),
                neighborhood: "Brooklyn".to_string()
            }
        );
        assert!(parse("list --cuisine").is_err());
        assert!(parse("list --price cheap").is_err());
    }

    #[test]
    fn test_ids() {
        assert_eq!(parse("show 4").unwrap(), Command::Show { id: 4 });
        assert_eq!(parse("favorite 2").unwrap(), Command::Favorite { id: 2 });
        assert!(parse("show").is_err());
        assert!(parse("show four").is_err());
        assert!(parse("show 4 5").is_err());
    }

    #[test]
    fn test_review() {
        let Command::Review(args) = parse("review 3 Ana 5 Best pizza in town").unwrap() else {
            panic!("expected a review");
        };
        assert_eq!(
            ReviewDraft::from(args),
            ReviewDraft {
                restaurant_id: 3,
                name: "Ana".to_string(),
                rating: 5,
                comments: Some("Best pizza in town".to_string()),
            }
        );

        match parse("review 3 Ana 2").unwrap() {
            Command::Review(args) => assert!(ReviewDraft::from(args).comments.is_none()),
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(parse("review 3 Ana").is_err());
        assert!(parse("review 3 Ana great").is_err());
    }

    #[test]
    fn test_help_and_unknown_command() {
        assert!(parse("dance").is_err());
        let err = parse("list --help").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_config_changes() {
        assert_eq!(parse("config").unwrap(), Command::Config(ConfigArgs::default()));

        let Command::Config(args) =
            parse("config --server http://example.test --timeout 0 --log-to-file true").unwrap()
        else {
            panic!("expected config");
        };
        assert!(args.has_changes());

        let mut config = Config {
            request_timeout_secs: Some(30),
            ..Config::default()
        };
        args.apply(&mut config);
        assert_eq!(config.base_url(), "http://example.test");
        assert_eq!(config.request_timeout_secs, None);
        assert!(config.log_to_file);
        assert!(config.offline_storage);

        assert!(parse("config --offline-storage maybe").is_err());
    }
}
