use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gravatar-cli", about = "Upload avatars to Gravatar", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload an image as the account's avatar
    Upload(UploadArgs),
}

#[derive(Args)]
pub struct UploadArgs {
    /// Image file to upload
    pub file: PathBuf,

    /// Account the avatar belongs to, usually its primary email
    #[arg(short, long)]
    pub account: String,

    /// OAuth bearer token, falls back to `api.token` from the configuration
    #[arg(short, long, env = "GRAVATAR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn upload_arguments_are_parsed() {
        let cli = Cli::try_parse_from([
            "gravatar-cli",
            "upload",
            "me.png",
            "--account",
            "user@example.com",
            "--token",
            "abc",
        ])
        .unwrap();

        let Command::Upload(args) = cli.command;
        assert_eq!(args.file, PathBuf::from("me.png"));
        assert_eq!(args.account, "user@example.com");
        assert_eq!(args.token.as_deref(), Some("abc"));
    }

    #[test]
    fn account_is_required() {
        assert!(Cli::try_parse_from(["gravatar-cli", "upload", "me.png"]).is_err());
    }
}
