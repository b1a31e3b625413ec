use anyhow::{Context, Error};
use skillpulse_session::{
    forms::{self, LoginForm, RegisterForm},
    storage::FileStorage,
    views::View,
    Session, SessionStore,
};
use std::path::PathBuf;
use structopt::StructOpt;

fn main() -> Result<(), Error> {
    let args = Args::from_args();
    initialize_logging(args.verbose);
    log::debug!(
        "Using the session snapshot in {}",
        args.storage_dir.display()
    );

    let storage = FileStorage::with_key(&args.storage_dir, &args.storage_key);
    let mut store = SessionStore::new(storage);
    store
        .subscribe(|session| log::debug!("Session changed: {:?}", session))
        .detach();

    match args.cmd {
        Command::Login { email, password } => {
            let form = LoginForm { email, password };
            forms::submit_login(&mut store, &form)
                .context("Unable to log in")?;
            print_session(store.session());
        },
        Command::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                confirm_password,
            };
            forms::submit_register(&mut store, &form)
                .context("Unable to create the account")?;
            print_session(store.session());
        },
        Command::Logout => {
            store.logout();
            println!("Logged out");
        },
        Command::Whoami => print_session(store.session()),
        Command::Views => {
            let session = store.session();
            for view in View::ALL.iter().copied() {
                let mark = if session.can_view(view) { "+" } else { "-" };
                println!("{} {:<16} {}", mark, view.label(), view.path());
            }
        },
    }

    if let Some(err) = store.last_storage_error() {
        log::warn!("The session won't survive a restart: {}", err);
    }

    Ok(())
}

fn initialize_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .init();
}

fn print_session(session: &Session) {
    match session.current_user() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            println!("id:   {}", user.id);
            println!("role: {}", user.role);
        },
        None => println!("Not logged in"),
    }
}

#[derive(Debug, StructOpt)]
#[structopt(about = "Manage the Skill Demand Pulse session")]
struct Args {
    #[structopt(
        long,
        env = "SKILLPULSE_STORAGE_DIR",
        default_value = ".skillpulse",
        parse(from_os_str),
        help = "Where the session snapshot is kept"
    )]
    storage_dir: PathBuf,
    #[structopt(
        long,
        env = "SKILLPULSE_STORAGE_KEY",
        default_value = "auth-storage",
        help = "The name of the session snapshot"
    )]
    storage_key: String,
    #[structopt(
        short,
        long,
        parse(from_occurrences),
        help = "Log more (repeat for even more)"
    )]
    verbose: u8,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    #[structopt(about = "Log in with an email and password")]
    Login {
        #[structopt(long, default_value = "")]
        email: String,
        #[structopt(long, default_value = "")]
        password: String,
    },
    #[structopt(about = "Create an account and log into it")]
    Register {
        #[structopt(long, default_value = "")]
        name: String,
        #[structopt(long, default_value = "")]
        email: String,
        #[structopt(long, default_value = "")]
        password: String,
        #[structopt(long, default_value = "")]
        confirm_password: String,
    },
    #[structopt(about = "Forget the current user")]
    Logout,
    #[structopt(about = "Show the current user")]
    Whoami,
    #[structopt(about = "List every view and whether it can be opened")]
    Views,
}
