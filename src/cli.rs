use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::codegen::Lang;
use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Debug, Parser)]
#[command(name = "action-server")]
#[command(about = "Serve GraphQL action handlers over HTTP and generate new ones")]
pub struct Cli {
    /// Configuration file, without extension
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Generate handler files for one action of an SDL schema
    Codegen {
        /// SDL file declaring the Mutation and its types
        #[arg(short, long)]
        schema: PathBuf,

        /// Mutation field to generate a handler for
        #[arg(short, long)]
        action: String,

        /// Output directory; files are printed when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Target languages
        #[arg(long, value_enum, value_delimiter = ',', default_values_t = Lang::ALL)]
        lang: Vec<Lang>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["action-server"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);

        let cli = Cli::try_parse_from(["action-server", "serve", "--config", "prod"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Serve)));
        assert_eq!(cli.config, "prod");
    }

    #[test]
    fn test_codegen_arguments() {
        let cli = Cli::try_parse_from([
            "action-server",
            "codegen",
            "--schema",
            "actions.graphql",
            "--action",
            "InsertUserAction",
            "--lang",
            "ts,go",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Codegen { schema, action, out, lang }) => {
                assert_eq!(schema, PathBuf::from("actions.graphql"));
                assert_eq!(action, "InsertUserAction");
                assert!(out.is_none());
                assert_eq!(lang, vec![Lang::TypeScript, Lang::Go]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_codegen_defaults_to_all_languages() {
        let cli = Cli::try_parse_from([
            "action-server",
            "codegen",
            "-s",
            "a.graphql",
            "-a",
            "A",
        ])
        .unwrap();
        let Some(Command::Codegen { lang, .. }) = cli.command else {
            panic!("expected codegen");
        };
        assert_eq!(lang, Lang::ALL.to_vec());
    }

    #[test]
    fn test_codegen_requires_action() {
        assert!(Cli::try_parse_from(["action-server", "codegen", "--schema", "a.graphql"]).is_err());
    }
}
