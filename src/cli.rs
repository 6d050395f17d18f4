use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::api::NewsApi;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::models::contact::mark_read_locally;
use crate::models::{Category, FeedHealth, NewRssFeed, NewsDraft};
use crate::render;
use crate::session::Session;

/// Admin console for the news CMS
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides NEWS_ADMIN_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in as an admin and remember the session
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Read the password from stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },
    /// Forget the saved session
    Logout,
    /// Dashboard counters and category breakdown
    Stats,
    /// Manage original articles
    #[command(subcommand)]
    News(NewsCommand),
    /// Draft an article outline with the backend's AI
    Generate { prompt: String },
    /// Manage RSS sources
    #[command(subcommand)]
    Feeds(FeedsCommand),
    /// Live feed for a category
    Live {
        #[arg(long)]
        category: Option<String>,
    },
    /// Search news
    Search { query: String },
    /// List newsletter subscribers
    Subscribers,
    /// Send a newsletter to every subscriber
    Newsletter {
        #[arg(long)]
        subject: String,
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        content: Option<String>,
        /// Read the body from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Contact-form inbox
    #[command(subcommand)]
    Inbox(InboxCommand),
}

#[derive(Subcommand, Debug)]
pub enum NewsCommand {
    List,
    Publish {
        /// Seed the draft from an AI outline first
        #[arg(long)]
        ai_prompt: Option<String>,
        #[command(flatten)]
        draft: DraftArgs,
    },
    Update {
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum FeedsCommand {
    /// List sources with their last health status
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        #[arg(long, default_value_t = Category::World)]
        category: Category,
    },
    Delete {
        id: String,
    },
    /// Ask the backend to check every source and report the failing ones
    Health,
}

#[derive(Subcommand, Debug)]
pub enum InboxCommand {
    List,
    /// Mark a message as read
    Read { id: String },
    Delete { id: String },
}

/// Draft fields; anything left out keeps its current value.
#[derive(Args, Debug, Default)]
pub struct DraftArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,
    #[arg(long)]
    pub content_file: Option<PathBuf>,
    /// Summary bullet; repeat for several
    #[arg(long = "summary")]
    pub summary: Vec<String>,
    #[arg(long)]
    pub category: Option<Category>,
    /// Tag; repeat for several
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub breaking: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub featured: Option<bool>,
}

impl DraftArgs {
    pub fn apply(&self, draft: &mut NewsDraft) -> AppResult<()> {
        if let Some(title) = &self.title {
            draft.title = title.clone();
        }
        if let Some(content) = &self.content {
            draft.content = content.clone();
        }
        if let Some(path) = &self.content_file {
            draft.content = std::fs::read_to_string(path)?;
        }
        if !self.summary.is_empty() {
            draft.summary = self.summary.clone();
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if !self.tags.is_empty() {
            draft.tags = self.tags.clone();
        }
        if let Some(image_url) = &self.image_url {
            draft.image_url = Some(image_url.clone());
        }
        if let Some(breaking) = self.breaking {
            draft.is_breaking = breaking;
        }
        if let Some(featured) = self.featured {
            draft.is_featured = featured;
        }
        Ok(())
    }
}

fn notify(message: &str) {
    println!("✓ {message}");
}

/// y/N prompt on stdin; `--yes` skips it.
fn confirm(prompt: &str, assume_yes: bool) -> AppResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn read_line(prompt: &str) -> AppResult<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn build_config(cli: &Cli) -> AppResult<AppConfig> {
    let mut config = AppConfig::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url)?;
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    Ok(config)
}

pub async fn run(cli: Cli) -> AppResult<()> {
    let config = build_config(&cli)?;

    let session = match Session::load(&config.session_file) {
        Ok(session) => session,
        Err(e) => {
            log::warn!("Ignoring unreadable session file: {}", e);
            None
        }
    };
    let token = match (&session, &config.api_url) {
        (Some(session), Some(api_url)) => session.token_for(api_url).map(str::to_string),
        _ => None,
    };
    let api = NewsApi::new(&config)?.with_token(token);
    let assume_yes = cli.yes;

    match cli.command {
        Command::Login {
            email,
            password_stdin,
        } => {
            let email = match email {
                Some(email) => email,
                None => read_line("Email: ")?,
            };
            let password = if password_stdin {
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                line.trim_end_matches(['\r', '\n']).to_string()
            } else {
                rpassword::prompt_password("Password: ")?
            };
            let response = api.login(&email, &password).await?;
            let base = api.base_url().ok_or(AppError::BackendNotConfigured)?;
            Session::new(base, email.trim(), response.token).save(&config.session_file)?;
            notify(&format!("Logged in as {}", email.trim()));
        }
        Command::Logout => {
            if Session::clear(&config.session_file)? {
                notify("Logged out");
            } else {
                println!("No saved session");
            }
        }
        Command::Stats => {
            print!("{}", render::stats(&api.get_stats().await?));
        }
        Command::News(cmd) => run_news(&api, cmd, assume_yes).await?,
        Command::Generate { prompt } => {
            let generated = api.generate_content(&prompt).await?;
            println!("{}", generated.headline().unwrap_or("(no headline)"));
            for point in &generated.summary {
                println!("  • {point}");
            }
            if let Some(category) = &generated.category {
                println!("Category: {category}");
            }
            if !generated.tags.is_empty() {
                println!("Tags: {}", generated.tags.join(", "));
            }
        }
        Command::Feeds(cmd) => run_feeds(&api, cmd, assume_yes).await?,
        Command::Live { category } => {
            let list = api.get_live_feed(category.as_deref()).await?;
            print!("{}", render::articles(&list.articles));
        }
        Command::Search { query } => {
            let list = api.search_news(&query).await?;
            print!("{}", render::articles(&list.articles));
        }
        Command::Subscribers => {
            print!("{}", render::subscribers_table(&api.get_subscribers().await?));
        }
        Command::Newsletter {
            subject,
            content,
            file,
        } => {
            let content = match (content, file) {
                (Some(content), _) => content,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => String::new(),
            };
            let receipt = api.send_newsletter(&subject, &content).await?;
            print!("{}", render::newsletter_receipt(&receipt));
        }
        Command::Inbox(cmd) => run_inbox(&api, cmd, assume_yes).await?,
    }
    Ok(())
}

async fn run_news(api: &NewsApi, cmd: NewsCommand, assume_yes: bool) -> AppResult<()> {
    match cmd {
        NewsCommand::List => {}
        NewsCommand::Publish { ai_prompt, draft } => {
            let mut news = NewsDraft::default();
            if let Some(prompt) = ai_prompt {
                let generated = api.generate_content(&prompt).await?;
                news.apply_generated(&generated);
                notify("AI Generated!");
            }
            draft.apply(&mut news)?;
            api.publish_news(&news).await?;
            notify("Published successfully");
        }
        NewsCommand::Update { id, draft } => {
            let existing = api.find_news(&id).await?;
            let mut news = NewsDraft::from(&existing);
            draft.apply(&mut news)?;
            api.update_news(&existing.id, &news).await?;
            notify("Updated successfully");
        }
        NewsCommand::Delete { id } => {
            if !confirm("Delete article?", assume_yes)? {
                return Ok(());
            }
            api.delete_news(&id).await?;
            notify("Article deleted");
        }
    }
    print!("{}", render::news_table(&api.get_all_news().await?));
    Ok(())
}

async fn run_feeds(api: &NewsApi, cmd: FeedsCommand, assume_yes: bool) -> AppResult<()> {
    match cmd {
        FeedsCommand::List => {}
        FeedsCommand::Health => {
            let health = api.check_rss_health().await?;
            let feeds = api.get_rss_feeds().await?;
            print!("{}", render::health_report(&feeds, &health));
            return Ok(());
        }
        FeedsCommand::Add {
            name,
            url,
            category,
        } => {
            api.add_rss_feed(&NewRssFeed {
                name,
                url,
                category,
            })
            .await?;
            notify("Feed added successfully");
        }
        FeedsCommand::Delete { id } => {
            if !confirm("Delete this feed?", assume_yes)? {
                return Ok(());
            }
            api.delete_rss_feed(&id).await?;
            notify("Feed deleted");
        }
    }

    let feeds = api.get_rss_feeds().await?;
    let health = match api.check_rss_health().await {
        Ok(health) => health,
        Err(e) => {
            log::error!("Health check failed: {}", e);
            FeedHealth::new()
        }
    };
    print!("{}", render::feeds_table(&feeds, &health));
    Ok(())
}

async fn run_inbox(api: &NewsApi, cmd: InboxCommand, assume_yes: bool) -> AppResult<()> {
    let mut messages = api.get_contact_messages().await?;
    match cmd {
        InboxCommand::List => {}
        InboxCommand::Read { id } => {
            api.mark_contact_read(&id).await?;
            mark_read_locally(&mut messages, &id);
            notify("Marked as read");
        }
        InboxCommand::Delete { id } => {
            if !confirm("Are you sure you want to delete this message?", assume_yes)? {
                return Ok(());
            }
            api.delete_contact_message(&id).await?;
            messages.retain(|m| m.id != id);
            notify("Message deleted");
        }
    }
    print!("{}", render::inbox(&messages));
    Ok(())
}
