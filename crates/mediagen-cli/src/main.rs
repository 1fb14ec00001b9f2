//! Command-line mirror of the mediagen API surface.
//!
//! Generates and edits images, and drives the asynchronous video job
//! lifecycle (create, poll until terminal, download, remix) from the
//! terminal. Requires OPENAI_API_KEY or API_KEY in the environment or a
//! .env file at the repo root.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use mediagen_client::{
    ImageOptions, ImageService, ImageUpload, ProviderClient, VideoCreateParams, VideoService,
    DEFAULT_BASE_URL,
};
use mediagen_models::{ImageModel, VideoModel, VideoSeconds, VIDEO_SIZES};

#[derive(Debug, Parser)]
#[command(
    name = "mediagen",
    version,
    about = "Image and video generation/editing against the remote provider"
)]
struct Cli {
    /// API key (or set OPENAI_API_KEY / API_KEY, or use .env)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate image(s) from a text prompt
    GenerateImage(GenerateImageArgs),
    /// Edit image(s) with a prompt; multiple inputs keep their order
    EditImage(EditImageArgs),
    /// Generate a video from a prompt; polls until done and saves
    GenerateVideo(GenerateVideoArgs),
    /// Remix an existing video with a new prompt
    RemixVideo(RemixVideoArgs),
    /// Print the current status of a video job
    VideoStatus(VideoStatusArgs),
    /// Download a completed video job
    VideoDownload(VideoDownloadArgs),
}

#[derive(Debug, Parser)]
struct GenerateImageArgs {
    /// Text description of the image
    #[arg(long, short = 'p')]
    prompt: String,
    /// Model (default: gpt-image-1.5)
    #[arg(long, short = 'm', default_value = "gpt-image-1.5")]
    model: String,
    /// Size (e.g. 1024x1024; for gpt-image also 1536x1024, 1024x1536, auto)
    #[arg(long, short = 's')]
    size: Option<String>,
    /// Quality: hd/standard for dall-e-3; high/medium/low for gpt-image
    #[arg(long, short = 'q')]
    quality: Option<String>,
    /// Number of images (dall-e-3 only supports 1)
    #[arg(long, default_value_t = 1)]
    n: u8,
    /// dall-e-3 only: vivid or natural
    #[arg(long)]
    style: Option<String>,
    /// Output path (default: output_image.png)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct EditImageArgs {
    /// Input image paths, in prompt order (e.g. scene.png product.png)
    #[arg(long, short = 'i', num_args = 1..)]
    images: Vec<PathBuf>,
    /// Edit instruction
    #[arg(long, short = 'p')]
    prompt: String,
    /// Model (default: gpt-image-1.5; multi-image needs gpt-image)
    #[arg(long, short = 'm', default_value = "gpt-image-1.5")]
    model: String,
    /// Output path (default: output_edit.png)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct GenerateVideoArgs {
    /// Text description of the video
    #[arg(long, short = 'p')]
    prompt: String,
    /// sora-2 or sora-2-pro
    #[arg(long, default_value = "sora-2")]
    model: String,
    /// Duration in seconds: 4, 8 or 12
    #[arg(long, default_value = "4")]
    seconds: String,
    /// Resolution
    #[arg(long, default_value = "720x1280")]
    size: String,
    /// Optional image file to steer generation
    #[arg(long, short = 'r')]
    input_reference: Option<PathBuf>,
    /// Output path (default: output_video.mp4)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
    /// Do not wait for completion; only print the job id
    #[arg(long)]
    no_wait: bool,
    /// Seconds between status polls
    #[arg(long, default_value_t = 10)]
    poll_interval: u64,
}

#[derive(Debug, Parser)]
struct RemixVideoArgs {
    /// Video job id from a previous create
    #[arg(long, short = 'v')]
    video_id: String,
    /// New prompt for the remix
    #[arg(long, short = 'p')]
    prompt: String,
    /// Output path (default: output_remix.mp4)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
    /// Do not wait for completion
    #[arg(long)]
    no_wait: bool,
    /// Seconds between status polls
    #[arg(long, default_value_t = 10)]
    poll_interval: u64,
}

#[derive(Debug, Parser)]
struct VideoStatusArgs {
    /// Video job id
    #[arg(long, short = 'v')]
    video_id: String,
}

#[derive(Debug, Parser)]
struct VideoDownloadArgs {
    /// Video job id
    #[arg(long, short = 'v')]
    video_id: String,
    /// Output path (default: output_video.mp4)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let client = match cli.api_key {
        Some(key) => ProviderClient::new(Some(key), DEFAULT_BASE_URL),
        None => ProviderClient::from_env(),
    };

    match cli.command {
        Command::GenerateImage(args) => generate_image(&client, args).await,
        Command::EditImage(args) => edit_image(&client, args).await,
        Command::GenerateVideo(args) => generate_video(&client, args).await,
        Command::RemixVideo(args) => remix_video(&client, args).await,
        Command::VideoStatus(args) => video_status(&client, args).await,
        Command::VideoDownload(args) => video_download(&client, args).await,
    }
}

async fn generate_image(client: &ProviderClient, args: GenerateImageArgs) -> Result<()> {
    let model: ImageModel = args.model.parse()?;
    let opts = ImageOptions {
        model,
        size: args.size,
        quality: args.quality,
        n: args.n,
        style: args.style,
    };

    let service = ImageService::new(client);
    let images = service.generate_all(&args.prompt, &opts).await?;

    let out_path = args
        .output
        .unwrap_or_else(|| PathBuf::from("output_image.png"));
    if images.len() == 1 {
        save_bytes(&out_path, &images[0])?;
    } else {
        for (i, bytes) in images.iter().enumerate() {
            save_bytes(&numbered_path(&out_path, i), bytes)?;
        }
    }
    Ok(())
}

async fn edit_image(client: &ProviderClient, args: EditImageArgs) -> Result<()> {
    if args.images.is_empty() {
        bail!("Provide at least one input image with --images.");
    }
    let model: ImageModel = args.model.parse()?;

    let mut uploads = Vec::with_capacity(args.images.len());
    for path in &args.images {
        uploads.push(read_image_upload(path)?);
    }

    let service = ImageService::new(client);
    let bytes = service.edit(&args.prompt, &uploads, model).await?;

    let out_path = args
        .output
        .unwrap_or_else(|| PathBuf::from("output_edit.png"));
    save_bytes(&out_path, &bytes)
}

async fn generate_video(client: &ProviderClient, args: GenerateVideoArgs) -> Result<()> {
    let model: VideoModel = args.model.parse()?;
    let seconds: VideoSeconds = args.seconds.parse()?;
    if !VIDEO_SIZES.contains(&args.size.as_str()) {
        bail!("size must be one of: {}", VIDEO_SIZES.join(", "));
    }

    let input_reference = match &args.input_reference {
        Some(path) => Some(read_image_upload(path)?),
        None => None,
    };

    let service = VideoService::new(client);
    let video_id = service
        .create(
            &args.prompt,
            VideoCreateParams {
                model,
                seconds,
                size: Some(args.size),
                input_reference,
            },
        )
        .await?;
    println!("Video job created: {video_id}");

    if args.no_wait {
        println!("Skipping wait. Check later with: mediagen video-status -v {video_id}");
        return Ok(());
    }

    let out_path = args
        .output
        .unwrap_or_else(|| PathBuf::from("output_video.mp4"));
    wait_and_save(&service, &video_id, args.poll_interval, &out_path).await
}

async fn remix_video(client: &ProviderClient, args: RemixVideoArgs) -> Result<()> {
    let service = VideoService::new(client);
    let new_id = service.remix(&args.video_id, &args.prompt).await?;
    println!("Remix job created: {new_id}");

    if args.no_wait {
        println!("Skipping wait. Check later with: mediagen video-status -v {new_id}");
        return Ok(());
    }

    let out_path = args
        .output
        .unwrap_or_else(|| PathBuf::from("output_remix.mp4"));
    wait_and_save(&service, &new_id, args.poll_interval, &out_path).await
}

async fn video_status(client: &ProviderClient, args: VideoStatusArgs) -> Result<()> {
    let service = VideoService::new(client);
    let status = service.get_status(&args.video_id).await?;
    println!("{status}");
    Ok(())
}

async fn video_download(client: &ProviderClient, args: VideoDownloadArgs) -> Result<()> {
    let service = VideoService::new(client);
    let bytes = service.download(&args.video_id).await?;
    let out_path = args
        .output
        .unwrap_or_else(|| PathBuf::from("output_video.mp4"));
    save_bytes(&out_path, &bytes)
}

/// Poll at a fixed interval until the job is terminal, then download.
/// A failed job surfaces the provider's error detail through download.
async fn wait_and_save(
    service: &VideoService<'_>,
    video_id: &str,
    poll_interval_secs: u64,
    out_path: &Path,
) -> Result<()> {
    loop {
        let status = service.get_status(video_id).await?;
        println!("  Video status: {status}");
        if status.is_terminal() {
            break;
        }
        tokio::time::sleep(Duration::from_secs(poll_interval_secs)).await;
    }

    let bytes = service.download(video_id).await?;
    save_bytes(out_path, &bytes)
}

fn read_image_upload(path: &Path) -> Result<ImageUpload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("File not found: {}", path.display()))?;
    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "image/png",
    };
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image.png")
        .to_string();
    Ok(ImageUpload::new(filename, content_type, bytes))
}

fn save_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Saved: {}", path.display());
    Ok(())
}

fn numbered_path(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("png");
    path.with_file_name(format!("{stem}_{index}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_path_keeps_extension() {
        let path = PathBuf::from("out/sunset.png");
        assert_eq!(numbered_path(&path, 2), PathBuf::from("out/sunset_2.png"));
    }
}
