//! Command-line entry point for running the build hooks over a built site.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use clap::{
    Parser,
    Subcommand,
};
use docs_i18n_hooks::config::ConfigManager;
use docs_i18n_hooks::{
    BuildHooks,
    PageInfo,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "docs-i18n")]
#[command(about = "Multilingual build hooks for documentation sites")]
#[command(version)]
struct Cli {
    /// Project root holding `.docs-i18n.json`
    #[arg(long, global = true, default_value = ".")]
    project: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a translation key
    Translate {
        /// Translation key (e.g. "nav.home" or a catalog msgid)
        key: String,

        /// Target language (defaults to the configured default language)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Split the built site's search index into one index per locale
    PartitionSearch {
        /// Built site directory, relative to the project root (overrides `siteDir`)
        #[arg(long)]
        site_dir: Option<PathBuf>,
    },

    /// Post-process a rendered HTML page in place
    PostPage {
        /// Rendered HTML file
        file: PathBuf,

        /// Site-relative URL of the page (e.g. "fr/guide/")
        #[arg(long)]
        url: String,

        /// Locale assigned to the page (detected from the URL when omitted)
        #[arg(long)]
        locale: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config_manager = ConfigManager::new();
    config_manager
        .load_settings(Some(cli.project.clone()))
        .with_context(|| format!("Failed to load settings from {}", cli.project.display()))?;

    match cli.command {
        Commands::Translate { key, lang } => run_translate(&config_manager, &key, lang.as_deref()),
        Commands::PartitionSearch { site_dir } => {
            run_partition(config_manager, site_dir.as_deref())
        }
        Commands::PostPage { file, url, locale } => {
            run_post_page(&config_manager, &file, url, locale.as_deref())
        }
    }
}

fn run_translate(config_manager: &ConfigManager, key: &str, lang: Option<&str>) -> Result<()> {
    let hooks = BuildHooks::new(config_manager)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", hooks.translate(key, lang))?;
    Ok(())
}

fn run_partition(mut config_manager: ConfigManager, site_dir: Option<&Path>) -> Result<()> {
    if let Some(site_dir) = site_dir {
        let mut settings = config_manager.get_settings().clone();
        settings.site_dir = site_dir.to_string_lossy().to_string();
        config_manager.update_settings(settings)?;
    }

    let hooks = BuildHooks::new(&config_manager)?;
    let report = hooks.on_post_build();

    let mut stdout = std::io::stdout().lock();
    for partition in &report.written {
        writeln!(
            stdout,
            "{}\t{} entries\t{}",
            partition.locale,
            partition.entries,
            partition.path.display()
        )?;
    }
    for locale in &report.skipped {
        writeln!(stdout, "{locale}\tno entries")?;
    }
    for locale in &report.failed {
        writeln!(stdout, "{locale}\twrite failed")?;
    }
    Ok(())
}

fn run_post_page(
    config_manager: &ConfigManager,
    file: &Path,
    url: String,
    locale: Option<&str>,
) -> Result<()> {
    let hooks = BuildHooks::new(config_manager)?;
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let page = PageInfo::new(url, locale);
    let output = hooks.on_post_page(&html, &page);

    std::fs::write(file, output).with_context(|| format!("Failed to write {}", file.display()))?;
    tracing::debug!(
        file = %file.display(),
        language = %hooks.page_language(&page),
        "Post-processed page"
    );
    Ok(())
}
