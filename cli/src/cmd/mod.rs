use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use structopt::StructOpt;

pub mod hash;
pub mod keygen;
pub mod pubkey;
pub mod sign;
pub mod thread;
pub mod verify;

/// Exit code for any failure that is not a verification verdict.
pub const EXIT_ERROR: i32 = 2;

#[derive(StructOpt, Debug)]
pub struct Verbosity {
    /// Verbosity level. Add more v for higher verbosity (-v, -vv, -vvv, etc.).
    #[structopt(short, parse(from_occurrences), global = true)]
    verbosity: u64,
}

impl Verbosity {
    pub fn level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum CliResult<T: Serialize> {
    Ok { code: &'static str, result: T },
    Err { code: &'static str, message: String },
}

impl<T: Serialize> From<Result<T>> for CliResult<T> {
    fn from(res: Result<T>) -> Self {
        match res {
            Ok(result) => CliResult::Ok { code: "OK", result },
            Err(err) => CliResult::Err {
                code: "ERR",
                message: format!("{:#}", err),
            },
        }
    }
}

pub trait ChatsigCommand {
    type Opt: StructOpt;
    type Output: Serialize;
    fn run(opts: Self::Opt) -> Result<Self::Output>;
    fn pretty(result: Self::Output) -> String;
    fn exit_code(_result: &Self::Output) -> i32 {
        0
    }
    /// Run the command and print its result, returning the process exit code.
    fn output(opts: Self::Opt, json: bool) -> i32 {
        let item = Self::run(opts);
        let exit = match &item {
            Ok(r) => Self::exit_code(r),
            Err(_) => EXIT_ERROR,
        };
        if json {
            match serde_json::to_string(&CliResult::from(item)) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("cannot serialize result: {}", e);
                    return EXIT_ERROR;
                }
            }
        } else {
            match item {
                Ok(r) => println!("{}", Self::pretty(r)),
                Err(err) => eprintln!("{:#}", err),
            }
        }
        exit
    }
}

/// Text given on the command line, `@<file>` for the contents of a file or `-` for stdin.
pub fn load_input(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading from stdin")?;
        Ok(buf)
    } else if let Some(filename) = arg.strip_prefix('@') {
        std::fs::read_to_string(filename).with_context(|| format!("cannot read file {}", filename))
    } else {
        Ok(arg.to_owned())
    }
}
