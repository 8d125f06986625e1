use clap::{Parser, Subcommand};
use psi_site::carousel::driver::CarouselHandle;
use psi_site::carousel::{CarouselTiming, Input};
use psi_site::types::PhotoEntry;
use psi_site::{config, generate, output, sections};
use std::io::BufRead;
use std::path::PathBuf;
use tokio::sync::oneshot;
use tracing::{Level, debug};

/// Shared flags for commands that write the site.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Ignore the content fingerprint and always re-render
    #[arg(long)]
    no_cache: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "psi-site")]
#[command(about = "Static site generator for a psychology practice")]
#[command(long_about = "\
Static site generator for a psychology practice

The content store is the data source. A snapshot directory holds one JSON
file per admin endpoint; anything missing falls back to the default content.

Snapshot structure:

  snapshot/
  ├── site.toml                # Build config: theme, carousel timing (optional)
  ├── config.json              # GET /api/admin/config: [{\"key\": ..., \"value\": ...}]
  ├── contact-settings.json    # GET /api/admin/contact-settings
  ├── footer-settings.json     # GET /api/footer-settings
  └── photo-carousel.json      # GET /api/photo-carousel

Run 'psi-site gen-config' to generate a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Snapshot directory
    #[arg(long, default_value = "snapshot", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Generate(CacheArgs),
    /// Resolve the snapshot and print the content inventory without writing
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
    /// Drive the photo carousel interactively from stdin
    Carousel,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Generate(cache_args) => {
            println!("==> Generating {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&cli.source, &cli.output, !cache_args.no_cache)?;
            output::print_generate_output(&report);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (_, cache, _) = generate::load_site(&cli.source)?;
            let site = sections::ResolvedSite::resolve(&cache);
            output::print_check_output(&site, &cache);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Carousel => {
            let (config, cache, _) = generate::load_site(&cli.source)?;
            let photos = sections::active_photos(&cache);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(run_carousel(photos, config.carousel.timing()));
        }
    }

    Ok(())
}

/// What one line of carousel input asks for.
#[derive(Debug, PartialEq)]
enum KeyCommand {
    Inputs(Vec<Input>),
    Quit,
    Unknown,
}

/// Parse one stdin line.
///
/// ```text
/// n / p        next / previous
/// 1..9         jump to photo
/// e / l        pointer enters / leaves
/// s <dx>       swipe by dx pixels (positive = towards next)
/// f            toggle fullscreen
/// t            toggle play
/// q            quit
/// ```
fn parse_key(line: &str) -> KeyCommand {
    let mut parts = line.split_whitespace();
    let Some(key) = parts.next() else {
        return KeyCommand::Unknown;
    };
    let inputs = match key {
        "n" => vec![Input::Next],
        "p" => vec![Input::Previous],
        "e" => vec![Input::PointerEnter],
        "l" => vec![Input::PointerLeave],
        "f" => vec![Input::ToggleFullscreen],
        "t" => vec![Input::TogglePlay],
        "q" => return KeyCommand::Quit,
        "s" => match parts.next().and_then(|dx| dx.parse::<f64>().ok()) {
            Some(dx) => vec![
                Input::TouchStart(1000.0),
                Input::TouchMove(1000.0 - dx),
                Input::TouchEnd,
            ],
            None => return KeyCommand::Unknown,
        },
        digit => match digit.parse::<usize>() {
            Ok(n) if n >= 1 => vec![Input::JumpTo(n - 1)],
            _ => return KeyCommand::Unknown,
        },
    };
    KeyCommand::Inputs(inputs)
}

async fn run_carousel(photos: Vec<PhotoEntry>, timing: CarouselTiming) {
    let handle = CarouselHandle::spawn(photos.clone(), timing);
    let sender = handle.sender();
    let (quit_tx, mut quit_rx) = oneshot::channel::<()>();

    // Blocking stdin reads stay off the runtime thread.
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_key(&line) {
                KeyCommand::Inputs(inputs) => {
                    if !inputs.into_iter().all(|input| sender.send(input)) {
                        break;
                    }
                }
                KeyCommand::Quit => break,
                KeyCommand::Unknown => eprintln!("keys: n p 1-9 e l s <dx> f t q"),
            }
        }
        let _ = quit_tx.send(());
    });

    let mut frames = handle.frames();
    output::print_frame(*frames.borrow_and_update(), &photos);
    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = *frames.borrow_and_update();
                output::print_frame(frame, &photos);
            }
            _ = &mut quit_rx => break,
        }
    }
    debug!("unmounting carousel");
    handle.unmount().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_keys() {
        assert_eq!(parse_key("n"), KeyCommand::Inputs(vec![Input::Next]));
        assert_eq!(parse_key(" p "), KeyCommand::Inputs(vec![Input::Previous]));
        assert_eq!(parse_key("3"), KeyCommand::Inputs(vec![Input::JumpTo(2)]));
        assert_eq!(parse_key("q"), KeyCommand::Quit);
    }

    #[test]
    fn swipe_expands_to_touch_sequence() {
        assert_eq!(
            parse_key("s 80"),
            KeyCommand::Inputs(vec![
                Input::TouchStart(1000.0),
                Input::TouchMove(920.0),
                Input::TouchEnd,
            ])
        );
        assert_eq!(parse_key("s"), KeyCommand::Unknown);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert_eq!(parse_key(""), KeyCommand::Unknown);
        assert_eq!(parse_key("0"), KeyCommand::Unknown);
        assert_eq!(parse_key("x"), KeyCommand::Unknown);
    }
}
