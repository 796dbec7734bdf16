use anyhow::Result;
use clap::{Parser, Subcommand};
use reelsmith::models::{Config, GeneratedImage, VideoScript};
use std::path::{Path, PathBuf};
use reelsmith::view::{ImageStudio, ScriptStudio, ViewState};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "reelsmith")]
#[command(about = "Generate portrait images and short-video scripts from a prompt")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a 9:16 JPEG from a description.
    Image {
        /// Image description. Defaults to the sample portrait prompt.
        prompt: Option<String>,

        /// Print a `data:` URL instead of the bare base64 payload.
        #[arg(long)]
        data_url: bool,

        /// Also write the decoded JPEG to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write TikTok, Reels and Shorts scripts for a topic.
    Scripts {
        topic: String,

        /// Print the scripts as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn render_scripts(scripts: &[VideoScript]) -> String {
    let mut out = String::new();
    for script in scripts {
        out.push_str(&format!("== {} | {}\n", script.platform, script.title));
        out.push_str(&format!("Hook: {}\n", script.hook));
        for (i, scene) in script.scenes.iter().enumerate() {
            out.push_str(&format!("  {}. Visual: {}\n", i + 1, scene.visual));
            out.push_str(&format!("     Voiceover: {}\n", scene.voiceover));
            if let Some(text) = scene.overlay() {
                out.push_str(&format!("     On screen: {}\n", text));
            }
        }
        out.push('\n');
    }
    out
}

fn save_image(image: &GeneratedImage, path: &Path) -> Result<()> {
    let bytes = image.decode()?;
    std::fs::write(path, &bytes)?;
    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

async fn run(command: Command) -> Result<bool> {
    let config = Config::from_env()?;
    // Reuse one HTTP connection pool across provider clients.
    let http_client = reqwest::Client::new();

    match command {
        Command::Image {
            prompt,
            data_url,
            out,
        } => {
            let view = ImageStudio::image_from_config(&config, http_client);
            if let Some(prompt) = prompt {
                view.set_input(prompt);
            }
            view.submit().await;

            match view.state() {
                ViewState::Success(image) => {
                    if let Some(path) = out {
                        save_image(&image, &path)?;
                    }
                    if data_url {
                        println!("{}", image.data_url());
                    } else {
                        println!("{}", image.image_bytes);
                    }
                    Ok(true)
                }
                _ => {
                    eprintln!("{}", view.status_line().unwrap_or_default());
                    Ok(false)
                }
            }
        }
        Command::Scripts { topic, json } => {
            let view = ScriptStudio::scripts_from_config(&config, http_client);
            view.set_input(topic);
            view.submit().await;

            match view.state() {
                ViewState::Success(scripts) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&scripts)?);
                    } else {
                        print!("{}", render_scripts(&scripts));
                    }
                    Ok(true)
                }
                _ => {
                    eprintln!("{}", view.status_line().unwrap_or_default());
                    Ok(false)
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelsmith=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match run(args.command).await {
        Ok(true) => {
            info!("Generation completed successfully");
            Ok(())
        }
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("Failed to run: {}", e);
            std::process::exit(1);
        }
    }
}
