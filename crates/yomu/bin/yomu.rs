#[macro_use]
extern crate log;

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use yomu::{
    domain::repositories::{
        auth::AuthRepository, catalogue::CatalogueRepository, state::StateRepository,
    },
    infrastructure::{
        config::Config,
        domain::repositories::{
            auth::AuthRepositoryImpl, catalogue::CatalogueRepositoryImpl,
            state::JsonStateRepository,
        },
    },
    presentation::{App, login::SessionView, reader::ReaderMode, search::SearchBy},
};

#[derive(Parser)]
#[clap(version, about = "Read manga from the MangaDex catalogue")]
struct Opts {
    /// Path to config file
    #[clap(long)]
    config: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Genres, recent updates and manga of the first genre
    Home,
    /// Latest uploads gallery
    Latest {
        #[clap(long, default_value_t = 1)]
        page: i64,
    },
    /// Search by title, or by tag with --tag
    Search {
        #[clap(required_unless_present = "tag")]
        title: Option<String>,
        #[clap(long, conflicts_with = "title")]
        tag: Option<String>,
    },
    /// Manga metadata and chapter list
    Detail {
        manga_id: String,
        /// Chapter language, defaults to the preferred language
        #[clap(long)]
        lang: Option<String>,
    },
    /// Page urls of a chapter
    Read {
        chapter_id: String,
        #[clap(long, default_value_t = 1)]
        page: usize,
        /// List every page instead of a single one
        #[clap(long)]
        continuous: bool,
        /// Replace pages that fail to load with the placeholder image
        #[clap(long)]
        probe: bool,
    },
    Favorites,
    /// Add or remove a favorite
    Favorite { manga_id: String },
    History,
    Login {
        username: String,
        /// Prompted for when absent
        #[clap(long)]
        password: Option<String>,
    },
    Refresh,
    Logout,
}

fn init_logger() {
    let filter = match std::env::var("YOMU_LOG") {
        Ok(level) => format!("yomu={level},yomu_lib={level}"),
        Err(_) => "yomu=warn".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

fn prompt_password() -> Result<String, anyhow::Error> {
    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut password = String::new();
    std::io::stdin().lock().read_line(&mut password)?;

    let password = password.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("password is required");
    }
    Ok(password)
}

fn print_session(view: SessionView) -> Result<(), anyhow::Error> {
    if view.is_failure() {
        return Err(anyhow!("{view}"));
    }
    println!("{view}");
    Ok(())
}

async fn run<C, A, S>(app: &App<C, A, S>, command: Command) -> Result<(), anyhow::Error>
where
    C: CatalogueRepository,
    A: AuthRepository,
    S: StateRepository + Clone,
{
    match command {
        Command::Home => print!("{}", app.home().await),
        Command::Latest { page } => {
            if page < 1 {
                bail!("page must be 1 or greater");
            }
            print!("{}", app.latest(page).await);
        }
        Command::Search { title, tag } => {
            let by = match (title, tag) {
                (_, Some(tag)) => SearchBy::Tag(tag),
                (Some(title), None) => SearchBy::Title(title),
                (None, None) => bail!("a title or a tag is required"),
            };
            print!("{}", app.search(by).await);
        }
        Command::Detail { manga_id, lang } => {
            print!("{}", app.detail(&manga_id, lang.as_deref()).await?);
        }
        Command::Read {
            chapter_id,
            page,
            continuous,
            probe,
        } => {
            let mode = if continuous {
                ReaderMode::Continuous
            } else {
                ReaderMode::Paged(page)
            };
            print!("{}", app.read(&chapter_id, mode, probe).await?);
        }
        Command::Favorites => print!("{}", app.favorites().await),
        Command::Favorite { manga_id } => println!("{}", app.toggle_favorite(&manga_id).await?),
        Command::History => print!("{}", app.history().await),
        Command::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password()?,
            };
            print_session(app.login(&username, &password).await)?;
        }
        Command::Refresh => print_session(app.refresh().await)?,
        Command::Logout => print_session(app.logout().await)?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logger();

    let opts: Opts = Opts::parse();
    let config = Config::open(opts.config)?;

    debug!("config: {:?}", config);

    let client = config.http_client()?;
    let catalogue_repo = CatalogueRepositoryImpl::new(
        client.clone(),
        &config.api_url,
        config.languages.clone(),
        config.content_rating.clone(),
    );
    let auth_repo = AuthRepositoryImpl::new(
        client,
        &config.auth_url,
        config.client_id.clone(),
        config.client_secret.clone(),
    );
    let state_repo = JsonStateRepository::new(&config.state_path);

    let app = App::new(
        catalogue_repo,
        auth_repo,
        state_repo,
        config.catalogue_settings(),
    )
    .with_uploads_url(&config.uploads_url)
    .with_preferred_language(&config.preferred_language)
    .with_history_limit(config.history_limit);

    tokio::select! {
        result = run(&app, opts.command) => {
            if let Err(e) = &result {
                error!("{e}");
            }
            result
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
            Ok(())
        }
    }
}
