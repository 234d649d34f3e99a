mod cmd;
mod key_file;
mod logging;

use cmd::{
    hash::HashOpts, keygen::KeygenOpts, pubkey::PubkeyOpts, sign::SignOpts, thread::ThreadOpts, verify::VerifyOpts,
    ChatsigCommand, Verbosity,
};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "chatsig",
    about = "Sign chat messages and check the signatures of received ones"
)]
struct Opt {
    #[structopt(subcommand)]
    commands: CommandsOpt,
    /// Format output as JSON
    #[structopt(long, short, global = true)]
    json: bool,
    #[structopt(flatten)]
    verbosity: Verbosity,
}

#[derive(StructOpt, Debug)]
enum CommandsOpt {
    /// Generate a new key pair
    Keygen(KeygenOpts),
    /// Print the public key belonging to a private key file
    Pubkey(PubkeyOpts),
    /// Print the keccak-256 digest of a message
    Hash(HashOpts),
    /// Hash and sign a message, printing the envelope
    Sign(SignOpts),
    /// Check a message envelope against the sender's public key
    Verify(VerifyOpts),
    /// Annotate a stored conversation with verification marks
    Thread(ThreadOpts),
}

fn main() {
    let opt = Opt::from_args();
    logging::setup_logger(opt.verbosity.level());
    let code = match opt.commands {
        CommandsOpt::Keygen(opts) => cmd::keygen::Keygen::output(opts, opt.json),
        CommandsOpt::Pubkey(opts) => cmd::pubkey::Pubkey::output(opts, opt.json),
        CommandsOpt::Hash(opts) => cmd::hash::Hash::output(opts, opt.json),
        CommandsOpt::Sign(opts) => cmd::sign::Sign::output(opts, opt.json),
        CommandsOpt::Verify(opts) => cmd::verify::Verify::output(opts, opt.json),
        CommandsOpt::Thread(opts) => cmd::thread::Thread::output(opts, opt.json),
    };
    std::process::exit(code);
}
