use crate::config::Config;
use crate::model::{Listen, PlaylistTrack};
use crate::widget::EmbedOptions;
use crate::youtube::{thumbnails, video_id_from_listen, Searcher, ToSearchQuery, VideoSearcher};
use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Parser)]
#[command(name = "tubesource", version, about = "Finds the YouTube video for a listen")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Prints the video stored in or linked from a listen
    Resolve {
        /// JSON file with a listen
        file: PathBuf,
        /// The file holds a JSPF playlist track instead of a listen
        #[arg(long)]
        playlist_track: bool,
    },
    /// Searches YouTube for a listen that does not link a video
    Search {
        /// JSON file with a listen
        file: PathBuf,
        #[arg(long)]
        playlist_track: bool,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    crate::log::initialize_logger()
        .map_err(|error| anyhow!("on initializing the logger: {}", error))?;

    match cli.command {
        Command::Resolve {
            file,
            playlist_track,
        } => resolve(&read_listen(&file, playlist_track).await?),
        Command::Search {
            file,
            playlist_track,
        } => search(&read_listen(&file, playlist_track).await?).await,
    }
}

async fn read_listen(path: &Path, playlist_track: bool) -> anyhow::Result<Listen> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("on reading {}", path.display()))?;

    Ok(if playlist_track {
        serde_json::from_str::<PlaylistTrack>(&content)
            .context("on parsing the playlist track")?
            .into()
    } else {
        serde_json::from_str(&content).context("on parsing the listen")?
    })
}

fn resolve(listen: &Listen) -> anyhow::Result<()> {
    let Some(video_id) = video_id_from_listen(listen) else {
        bail!("The listen does not link any YouTube video.");
    };

    println!("{}", video_id);
    println!("{}", video_id.url());
    println!("{}", EmbedOptions::default().embed_url(&video_id)?);
    for thumbnail in thumbnails(&video_id) {
        println!("{} {}", thumbnail.sizes, thumbnail.src);
    }

    Ok(())
}

async fn search(listen: &Listen) -> anyhow::Result<()> {
    if let Some(video_id) = video_id_from_listen(listen) {
        println!("{}", video_id.url());
        return Ok(());
    }

    let query = listen
        .to_search_query()
        .context("The listen has neither a track nor a release name.")?;
    let config = Config::from_env()?;
    if !config.credentials.is_present() {
        bail!("Set YOUTUBE_API_KEY or YOUTUBE_ACCESS_TOKEN to search YouTube.");
    }

    let searcher = Searcher::new(reqwest::Client::new(), config.search_max_results);
    let video_ids = searcher.search(&query, &config.credentials).await?;
    if video_ids.is_empty() {
        bail!("No video was found for \"{}\".", query);
    }
    for video_id in video_ids {
        println!("{}", video_id.url());
    }

    Ok(())
}
