//! Clap adapter for flatfig.
//!
//! Compiled only with the `clap` Cargo feature (on by default). It gives an
//! application `config list|get|set|unset` subcommands over its store file.
//! The only bridge to the core is [`ConfigArgs::into_action()`], which yields
//! a [`StoreAction`](crate::StoreAction) for
//! [`FlatfigBuilder::handle()`](crate::FlatfigBuilder::handle) or
//! [`ops::handle`](crate::ops::handle).

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::types::StoreAction;

/// Clap-derived args for the `config` subcommand group.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Operate on this file instead of the application's default one.
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show every stored key and its raw value.
    List,
    /// Show the raw value of one key.
    Get {
        /// Key as written in the file (case-sensitive).
        key: String,
    },
    /// Store a raw value and save the file.
    Set {
        /// Key as written in the file (case-sensitive).
        key: String,
        /// Raw value; booleans are 1/0, lists are comma-joined.
        value: String,
    },
    /// Remove a key from the file.
    Unset {
        /// Key as written in the file (case-sensitive).
        key: String,
    },
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `StoreAction`.
    ///
    /// Bare `config` (no subcommand) and explicit `config list` both map to
    /// `StoreAction::List`.
    pub fn into_action(self) -> StoreAction {
        match self.action {
            None | Some(ConfigSubcommand::List) => StoreAction::List,
            Some(ConfigSubcommand::Get { key }) => StoreAction::Get { key },
            Some(ConfigSubcommand::Set { key, value }) => StoreAction::Set { key, value },
            Some(ConfigSubcommand::Unset { key }) => StoreAction::Unset { key },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Wrapper so we can use `try_parse_from` on the subcommand.
    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    fn parse(args: &[&str]) -> ConfigArgs {
        TestCli::try_parse_from(args).unwrap().config
    }

    #[test]
    fn parse_get() {
        let action = parse(&["test", "get", "historysize"]).into_action();
        assert_eq!(
            action,
            StoreAction::Get {
                key: "historysize".into()
            }
        );
    }

    #[test]
    fn parse_set() {
        let action = parse(&["test", "set", "servers", "a,b"]).into_action();
        assert_eq!(
            action,
            StoreAction::Set {
                key: "servers".into(),
                value: "a,b".into(),
            }
        );
    }

    #[test]
    fn parse_unset() {
        let action = parse(&["test", "unset", "key"]).into_action();
        assert_eq!(action, StoreAction::Unset { key: "key".into() });
    }

    #[test]
    fn parse_bare_config_is_list() {
        assert_eq!(parse(&["test"]).into_action(), StoreAction::List);
        assert_eq!(parse(&["test", "list"]).into_action(), StoreAction::List);
    }

    #[test]
    fn invalid_subcommand_errors() {
        let result = TestCli::try_parse_from(["test", "nope"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_file_flag_after_subcommand() {
        let args = parse(&["test", "get", "key", "--file", "/tmp/puush.cfg"]);
        assert_eq!(args.file, Some(PathBuf::from("/tmp/puush.cfg")));
        assert_eq!(args.into_action(), StoreAction::Get { key: "key".into() });
    }

    #[test]
    fn parse_file_flag_before_subcommand() {
        let args = parse(&["test", "--file", "other.cfg", "list"]);
        assert_eq!(args.file, Some(PathBuf::from("other.cfg")));
    }
}
