use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use lorewiki_common::config::FileStore;
use lorewiki_common::telemetry::{self, TelemetryConfig};
use lorewiki_common::{Config, ImageFile, SessionToken, WikiClient};
use lorewiki_editor_core::{
    ArticleDraft, ContentBuffer, PlatformError, RichTextEditor, Selection, TextField,
    normalize_links, render_preview,
};
use miette::{IntoDiagnostic, Result, WrapErr};

#[derive(Parser)]
#[command(version, about = "lorewiki - article tooling for the server wiki", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the config file (.toml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Admin session token, overriding the one in the config file
    #[arg(long, env = "LOREWIKI_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prefix https:// onto bare hrefs, as the admin panel does on save
    Normalize {
        /// Article HTML file
        file: PathBuf,

        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the HTML the preview pane would render
    Preview {
        /// Article HTML file
        file: PathBuf,
    },
    /// Upload an image and print the <img> markup for it
    Upload {
        /// Image file
        image: PathBuf,

        /// Append the <img> to this article file instead of printing it
        #[arg(long)]
        append_to: Option<PathBuf>,
    },
    /// Create or update an article
    Publish {
        /// Article HTML file
        file: PathBuf,

        /// Article title
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Category id
        #[arg(long)]
        category: i64,

        /// Update this article instead of creating one
        #[arg(long)]
        id: Option<i64>,

        /// Preview image URL
        #[arg(long)]
        preview_image: Option<String>,
    },
    /// List the wiki's articles
    List,
    /// Fetch an article's HTML for local editing
    Pull {
        /// Article id
        id: i64,

        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete an article
    Delete {
        /// Article id
        id: i64,
    },
    /// Store a session token in the config file
    Login {
        /// Admin session token
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_miette();

    let cli = Cli::parse();

    let mut telemetry_config = TelemetryConfig::from_env("lorewiki-cli");
    if cli.verbose {
        telemetry_config = telemetry_config.with_level(tracing::Level::DEBUG);
    }
    telemetry::init(telemetry_config);

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let token = cli.token.map(SessionToken::new);

    match cli.command {
        Commands::Normalize { file, output } => {
            let html = read_article(&file).await?;
            let normalized = normalize_links(&html);
            match output {
                Some(out) => tokio::fs::write(&out, normalized).await.into_diagnostic()?,
                None => println!("{normalized}"),
            }
        }
        Commands::Preview { file } => {
            let html = read_article(&file).await?;
            println!("{}", render_preview(&ContentBuffer::from_str(&html)));
        }
        Commands::Upload { image, append_to } => {
            let client = load_client(&config_path, token).await?;
            upload(&client, &image, append_to.as_deref()).await?;
        }
        Commands::Publish {
            file,
            title,
            description,
            category,
            id,
            preview_image,
        } => {
            let client = load_client(&config_path, token).await?;
            let draft = ArticleDraft {
                id,
                title,
                description,
                content: read_article(&file).await?,
                category_id: category,
                preview_image,
            };
            client.save_article(&draft.finalize()).await?;
            if draft.is_update() {
                println!("Updated article {}", draft.title);
            } else {
                println!("Created article {}", draft.title);
            }
        }
        Commands::List => {
            let client = load_client(&config_path, token).await?;
            for article in client.articles().await? {
                let category = article.category_name.as_deref().unwrap_or("-");
                println!("{:>5}  {:<16}  {}", article.id, category, article.title);
            }
        }
        Commands::Pull { id, output } => {
            let client = load_client(&config_path, token).await?;
            let draft = ArticleDraft::from(client.article(id).await?);
            match output {
                Some(out) => {
                    tokio::fs::write(&out, &draft.content).await.into_diagnostic()?;
                    println!(
                        "Pulled {} (category {}) to {}",
                        draft.title,
                        draft.category_id,
                        out.display()
                    );
                }
                None => println!("{}", draft.content),
            }
        }
        Commands::Delete { id } => {
            let client = load_client(&config_path, token).await?;
            client.delete_article(id).await?;
            println!("Deleted article {id}");
        }
        Commands::Login { token } => {
            let config = load_config(&config_path)
                .await?
                .with_session(Some(SessionToken::new(token)));
            config.save(&FileStore::new(&config_path)).await?;
            println!("Session saved to: {}", config_path.display());
        }
    }

    Ok(())
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lorewiki")
        .join("config.toml")
}

/// A missing config file means defaults.
async fn load_config(path: &Path) -> Result<Config> {
    if !tokio::fs::try_exists(path).await.into_diagnostic()? {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    Ok(Config::load(&FileStore::new(path)).await?)
}

async fn load_client(path: &Path, token: Option<SessionToken>) -> Result<WikiClient> {
    let config = load_config(path).await?.with_session(token);
    Ok(WikiClient::from_config(&config)?)
}

async fn read_article(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("could not read {}", path.display()))
}

/// The terminal has no text widget to select in; only appending actions work.
struct Detached;

impl TextField for Detached {
    fn selection(&self) -> std::result::Result<Selection, PlatformError> {
        Err("no text field in the terminal".into())
    }

    fn set_selection(&self, _: Selection) -> std::result::Result<(), PlatformError> {
        Ok(())
    }

    fn focus(&self) -> std::result::Result<(), PlatformError> {
        Ok(())
    }
}

async fn upload(client: &WikiClient, image: &Path, append_to: Option<&Path>) -> Result<()> {
    let file = ImageFile::read(image).await?;
    let content = match append_to {
        Some(path) => read_article(path).await?,
        None => String::new(),
    };

    let mut editor = RichTextEditor::new(Detached).with_content(&content);
    editor.upload_and_insert(client, &file).await?;

    match append_to {
        Some(path) => {
            tokio::fs::write(path, editor.value()).await.into_diagnostic()?;
            println!("Appended {} to {}", file.name, path.display());
        }
        None => println!("{}", editor.value()),
    }
    Ok(())
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}
