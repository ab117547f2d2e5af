//! Command-line arguments.
//!
//! hoist takes no options of its own. Everything after `argv[0]` belongs to
//! the artifact and is forwarded unchanged, including a leading `--`.

use std::ffi::OsString;

/// Arguments to forward to the artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cli {
    pub args: Vec<OsString>,
}

impl Cli {
    /// Arguments of the current process, without `argv[0]`.
    pub fn from_env() -> Self {
        Self::from_args(std::env::args_os().skip(1))
    }

    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_every_argument_in_order() {
        let cli = Cli::from_args(["--", "--help", "-x", "a b"]);
        assert_eq!(
            cli.args,
            vec![
                OsString::from("--"),
                OsString::from("--help"),
                OsString::from("-x"),
                OsString::from("a b"),
            ]
        );
    }

    #[test]
    fn empty_arguments() {
        assert!(Cli::from_args(Vec::<String>::new()).args.is_empty());
    }
}
