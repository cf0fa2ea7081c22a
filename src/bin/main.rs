use anyhow::{Context, Error};
use secretli::{actions, prompt, Expiration, RemoteStore};
use std::io::Read;
use structopt::StructOpt;
use zeroize::Zeroizing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::from_args();

    log::debug!("Using the store at {}", args.base_url);

    let store = RemoteStore::new(&args.base_url)?;

    match args.cmd {
        Command::Share {
            password,
            expiration,
            burn_after_read,
        } => {
            let mut plaintext = Zeroizing::new(String::new());
            std::io::stdin()
                .read_to_string(&mut plaintext)
                .context("Unable to read the secret from stdin")?;

            let password = read_password(password)?;
            let receipt = actions::share(
                &store,
                &plaintext,
                password.as_deref().map(String::as_str),
                expiration,
                burn_after_read,
            )
            .await?;

            print_instructions(&args.base_url, password.is_some(), &receipt);
        },
        Command::Retrieve {
            password,
            share_secret,
        } => {
            let password = read_password(password)?;
            let plaintext = actions::retrieve(
                &store,
                &share_secret,
                password.as_deref().map(String::as_str),
            )
            .await?;

            println!("{}", plaintext);
        },
        Command::Delete {
            password,
            share_secret,
            deletion_token,
        } => {
            let password = read_password(password)?;
            actions::delete(
                &store,
                &share_secret,
                password.as_deref().map(String::as_str),
                &deletion_token,
            )
            .await?;

            println!("Deleted!");
        },
    }

    Ok(())
}

fn read_password(
    wanted: bool,
) -> Result<Option<Zeroizing<String>>, prompt::PromptError> {
    if wanted {
        prompt::read_password()
    } else {
        Ok(None)
    }
}

fn print_instructions(
    base_url: &str,
    with_password: bool,
    receipt: &actions::ShareReceipt,
) {
    let base_url = if base_url == secretli::DEFAULT_BASE_URL {
        String::new()
    } else {
        format!("--base-url '{}' ", base_url)
    };
    let password = if with_password { "-p " } else { "" };

    println!("Success!");
    println!();
    println!("Want to retrieve your secret?");
    println!(
        "$ secretli {}retrieve {}'{}'",
        base_url, password, receipt.share_secret
    );
    println!();
    println!("Have to delete your secret?");
    println!(
        "$ secretli {}delete {}'{}' '{}'",
        base_url, password, receipt.share_secret, receipt.deletion_token
    );
    println!();
}

#[derive(Debug, StructOpt)]
#[structopt(about = "Share secrets easily and securely across the internet.")]
struct Args {
    #[structopt(
        long = "base-url",
        env = "SECRETLI_BASE_URL",
        default_value = "https://patrickscheid.de/s/",
        help = "The server's base URL"
    )]
    base_url: String,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Share a secret read from stdin. The share secret is never sent to
    /// the server!
    Share {
        #[structopt(short = "p", long = "password", help = "Ask for a password")]
        password: bool,
        #[structopt(
            short = "e",
            long = "expiration",
            default_value = "5m",
            help = "How long to keep the secret (5m, 10m, 15m, 1h, 4h, 12h, 1d, 3d, 7d)"
        )]
        expiration: Expiration,
        #[structopt(long = "burn-after-read", help = "Delete the secret once it has been read")]
        burn_after_read: bool,
    },
    /// Retrieve a shared secret and decrypt it locally.
    Retrieve {
        #[structopt(short = "p", long = "password", help = "Ask for a password")]
        password: bool,
        share_secret: String,
    },
    /// Delete a shared secret using its deletion token.
    Delete {
        #[structopt(short = "p", long = "password", help = "Ask for a password")]
        password: bool,
        share_secret: String,
        deletion_token: String,
    },
}
