use clap::{Parser, Subcommand, ValueEnum};
use folio::generate::{self, Site};
use folio::theme::{FileStore, Theme, ThemeController};
use folio::{config, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static generator for a photo portfolio with a blog")]
#[command(long_about = "\
Static generator for a photo portfolio with a blog

The site directory holds JSON content and the photo tree:

  site/
  ├── config.toml          # Site config (optional, overrides stock defaults)
  ├── blog.json            # { \"posts\": [ { date, title, text, highlights, photos } ] }
  ├── about.json           # Same shape; unused when config has an [about] table
  ├── gallery.json         # Manifest: { \"categories\": { name: [ { src, title, description } ] } }
  └── photos/
      ├── Trip 2/          # Category
      │   └── old-town.jpg
      └── Trip 10/

Gallery resolution (first non-empty wins):
  1. Listing API   [github] table in config.toml
  2. Manifest      gallery.json (regenerate with 'folio gen-manifest')

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve all content and write the site
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Resolve all content and print it without writing anything
    Check,
    /// Regenerate the gallery manifest from the photo tree
    GenManifest {
        /// Print the manifest instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Show or change the persisted theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current preference
    Show {
        /// Also print the active theme for this system preference
        #[arg(long, value_enum)]
        system: Option<SystemTheme>,
    },
    /// Switch to the opposite of the active theme
    Toggle {
        /// System preference used when no override is set
        #[arg(long, value_enum, default_value = "light")]
        system: SystemTheme,
    },
    /// Drop the override and follow the system
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum SystemTheme {
    Light,
    Dark,
}

impl From<SystemTheme> for Theme {
    fn from(value: SystemTheme) -> Self {
        match value {
            SystemTheme::Light => Theme::Light,
            SystemTheme::Dark => Theme::Dark,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build { output: out } => {
            let site = Site::open(&cli.root, config::load_config(&cli.root)?)?;

            println!("==> Resolving content in {}", cli.root.display());
            let content = site.resolve();
            output::print_content_output(&content);

            println!("==> Generating HTML → {}", out.display());
            let pages = generate::generate(&site, &content, &cli.root, &out)?;
            output::print_generate_output(&pages);

            println!("==> Build complete: {}", out.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.root.display());
            let site = Site::open(&cli.root, config::load_config(&cli.root)?)?;
            let content = site.resolve();
            output::print_content_output(&content);
            if content.gallery.is_err() {
                return Err("gallery could not be resolved".into());
            }
            println!("==> Content is valid");
        }
        Command::GenManifest { dry_run } => {
            let site_config = config::load_config(&cli.root)?;
            let path = cli.root.join(&site_config.content.manifest);
            let mut manifest = scan::scan_photos(&cli.root, &site_config.content.photos_dir)?;
            if let Some(previous) = scan::read_manifest(&path)? {
                manifest = scan::merge_previous(manifest, &previous);
            }
            output::print_manifest_output(&manifest);
            if dry_run {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                scan::write_manifest(&path, &manifest)?;
                println!("==> Wrote {}", path.display());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Theme { action } => {
            let site_config = config::load_config(&cli.root)?;
            let store = FileStore::new(&cli.root.join(&site_config.theme.store));
            let mut controller = ThemeController::init(store)?;
            match action {
                ThemeAction::Show { system } => {
                    output::print_theme_output(controller.preference(), system.map(Theme::from));
                }
                ThemeAction::Toggle { system } => {
                    controller.toggle(system.into())?;
                    output::print_theme_output(controller.preference(), Some(system.into()));
                }
                ThemeAction::Clear => {
                    controller.clear()?;
                    output::print_theme_output(controller.preference(), None);
                }
            }
        }
    }

    Ok(())
}
