//! docs-crawler command line
//!
//! `crawl` runs one target and writes JSON, CSV or raw markup.
//! `build` runs the four default targets and converts each to markdown.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use docs_crawler::{BrowserSession, ConnectionOptions, ContentStrategy, CrawlConfig, CrawlTarget, Crawler,
                   IdentityStrategy, Language, LaunchOptions, LogEvents, SiteKind,
                   convert::ConverterKind,
                   crawl::normalize_url,
                   output::{self, OutputFormat}};
use std::{path::PathBuf, time::Duration};

#[derive(Parser)]
#[command(name = "docs-crawler")]
#[command(version)]
#[command(about = "Crawl a JavaScript-rendered documentation tree with headless Chrome", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crawl one documentation tree into a single output file
    Crawl(CrawlArgs),
    /// Crawl reference and API docs in every language and convert them to markdown
    Build(BuildArgs),
}

#[derive(Args)]
struct BrowserArgs {
    /// Run Chrome headless
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    headless: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome: Option<PathBuf>,

    /// WebSocket endpoint of an already running browser
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Delay between clicks in milliseconds
    #[arg(long, default_value = "150")]
    delay_ms: u64,

    /// Maximum number of documents to crawl (0 = no limit)
    #[arg(long, default_value = "0")]
    limit: usize,

    /// Overall timeout for one crawl in seconds (0 = none)
    #[arg(long, default_value = "120")]
    timeout_secs: u64,
}

impl BrowserArgs {
    fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig::new()
            .click_delay(Duration::from_millis(self.delay_ms))
            .limit(self.limit)
            .overall_timeout(Duration::from_secs(self.timeout_secs))
    }

    fn open_session(&self) -> anyhow::Result<BrowserSession> {
        let session = match &self.ws_endpoint {
            Some(ws_url) => BrowserSession::connect(ConnectionOptions::new(ws_url.clone()))
                .with_context(|| format!("Failed to connect to {}", ws_url))?,
            None => {
                let mut options = LaunchOptions::new().headless(self.headless);
                if let Some(path) = &self.chrome {
                    options = options.chrome_path(path.clone());
                }
                BrowserSession::launch(options).context("Failed to launch browser")?
            }
        };
        Ok(session)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Variant {
    /// Read content from the crawling tab
    Inline,
    /// Read content in a disposable child tab
    Isolated,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Identity {
    /// Deduplicate by the postId query parameter
    PostId,
    /// Deduplicate by the resolved URL
    Url,
}

#[derive(Args)]
struct CrawlArgs {
    #[command(flatten)]
    browser: BrowserArgs,

    /// Documentation tree to crawl
    #[arg(long, value_enum, default_value = "reference")]
    site: SiteKind,

    #[arg(long, value_enum, default_value = "ko")]
    lang: Language,

    /// Start URL (overrides the site preset)
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Content acquisition (overrides the site preset)
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Identity resolution (overrides the site preset)
    #[arg(long, value_enum)]
    identity: Option<Identity>,

    /// Output format: json, csv or html
    #[arg(long, short = 'f', default_value = "json")]
    format: String,

    /// Output path (default: docs.<format>)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct BuildArgs {
    #[command(flatten)]
    browser: BrowserArgs,

    /// Directory receiving <lang>/<site>.md
    #[arg(long, default_value = "docs")]
    out_dir: PathBuf,

    /// Markup-to-markdown converter
    #[arg(long, value_enum, default_value = "mdream")]
    converter: ConverterKind,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Crawl(args) => crawl(args),
        Command::Build(args) => build(args),
    }
}

fn crawl(args: CrawlArgs) -> anyhow::Result<()> {
    // Reject a bad format before starting a browser
    let format: OutputFormat = args.format.parse()?;
    let output_path = args.output.clone().unwrap_or_else(|| PathBuf::from(format!("docs.{}", format)));

    let mut target = CrawlTarget::preset(args.site, args.lang);
    if let Some(url) = &args.start_url {
        target = target.with_start_url(normalize_url(url));
    }
    if let Some(variant) = args.variant {
        target = target.with_content(match variant {
            Variant::Inline => ContentStrategy::Inline,
            Variant::Isolated => ContentStrategy::Isolated,
        });
    }
    if let Some(identity) = args.identity {
        target = target.with_identity(match identity {
            Identity::PostId => IdentityStrategy::post_id(),
            Identity::Url => IdentityStrategy::Url,
        });
    }

    eprintln!("docs-crawler v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("Browser mode: {}", if args.browser.headless { "headless" } else { "headed" });
    eprintln!("Start URL: {}", target.start_url);

    let session = args.browser.open_session()?;
    let mut crawler = Crawler::new(session, args.browser.crawl_config(), Box::new(LogEvents));

    let docs = crawler.run(&target).context("crawler error")?;
    log::info!("crawled {} documents from {:?}", docs.len(), target.start_url);

    output::save(&output_path, format, &docs)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    log::info!("wrote {} to {}", format, output_path.display());

    Ok(())
}

fn build(args: BuildArgs) -> anyhow::Result<()> {
    let converter = args.converter.build();
    let session = args.browser.open_session()?;
    let mut crawler = Crawler::new(session, args.browser.crawl_config(), Box::new(LogEvents));

    for lang in [Language::Ko, Language::En] {
        for kind in [SiteKind::Reference, SiteKind::Api] {
            let target = CrawlTarget::preset(kind, lang);
            let out_path = args.out_dir.join(lang.as_str()).join(format!("{}.md", kind.file_stem()));
            let html_path = out_path.with_extension("md.html");

            let docs = crawler.run(&target).context("crawler error")?;
            log::info!("crawled {} documents from {:?}", docs.len(), target.start_url);

            output::save_markup_lines(&html_path, &docs)
                .with_context(|| format!("Failed to write {}", html_path.display()))?;
            log::info!("document to {}", html_path.display());

            converter
                .convert(&html_path, &out_path)
                .with_context(|| format!("{} failed on {}", converter.name(), html_path.display()))?;
            log::info!("converted to {}", out_path.display());
        }
    }

    Ok(())
}
