use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use hierdoc::*;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("hierdoc")
        .about("Render class hierarchy pages from a pre-built class tree")
        .arg(
            Arg::new("input")
                .help("Class hierarchy JSON: a file path or an http(s) URL (.zst accepted)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the page body to this file instead of stdout")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Output format: html or text")
                .value_parser(value_parser!(OutputFormat)),
        )
        .arg(
            Arg::new("html-version")
                .long("html-version")
                .help("HTML version: 4 or 5 (5 wraps each hierarchy in <section>)")
                .value_parser(value_parser!(HtmlVersion)),
        )
        .arg(
            Arg::new("package")
                .short('p')
                .long("package")
                .help("Render the tree page of this package instead of the overview"),
        )
        .arg(
            Arg::new("packages")
                .long("packages")
                .help("List links to the package tree pages in the overview header")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("root-path")
                .long("root-path")
                .help("Relative path from the page to the documentation root"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Fail when the hierarchy is deeper than this")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Config file (default: <config dir>/hierdoc/config.json)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("no-cache")
                .long("no-cache")
                .help("Neither read nor write the download cache")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("refresh")
                .long("refresh")
                .help("Fetch the hierarchy model again and replace the cached copy")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "hierdoc=debug" } else { "hierdoc=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_overrides(config: &mut Config, matches: &ArgMatches) {
    if let Some(format) = matches.get_one::<OutputFormat>("format") {
        config.format = *format;
    }
    if let Some(version) = matches.get_one::<HtmlVersion>("html-version") {
        config.html_version = *version;
    }
    if let Some(root_path) = matches.get_one::<String>("root-path") {
        config.root_path = root_path.clone();
    }
    if let Some(max_depth) = matches.get_one::<usize>("max-depth") {
        config.max_depth = *max_depth;
    }
    if matches.get_flag("no-cache") {
        config.cache = false;
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let mut config = Config::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    apply_overrides(&mut config, &matches);

    // `input` is required, clap rejects the invocation without it
    let input = matches
        .get_one::<String>("input")
        .context("missing input")?;

    let json = SourceLoader::new(config.cache)
        .with_refresh(matches.get_flag("refresh"))
        .load(input)?;
    let tree = ClassTree::from_json(&json)
        .with_context(|| format!("failed to load class hierarchy from {}", input))?;

    let resources = Resources::with_overrides(&config.labels);
    let links = HtmlLinkFormatter::new(&config.root_path);
    let renderer = HierarchyRenderer::new(&tree, &resources, &links)
        .with_html_version(config.html_version)
        .with_max_depth(config.max_depth);

    let scope = match matches.get_one::<String>("package") {
        Some(package) => TreeScope::Package(package.clone()),
        None => TreeScope::AllPackages {
            packages: if matches.get_flag("packages") {
                tree.packages()
            } else {
                Vec::new()
            },
        },
    };

    let page = TreePageWriter::new(&renderer).render(&scope)?;
    let output = page.render(&RenderContext::new().with_format(config.format));

    match matches.get_one::<PathBuf>("output") {
        Some(path) => {
            fs::write(path, format!("{}\n", output.trim_end()))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote tree page");
        }
        None => println!("{}", output.trim_end()),
    }

    Ok(())
}
