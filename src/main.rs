//! Atrium CLI - portal chrome renderer
//!
//! Usage: atrium <COMMAND>
//!
//! Commands:
//!   render  Render the portal page from the list endpoint or fixtures
//!   check   Validate configuration and menu structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use is_terminal::IsTerminal;

use atrium::config::{self, Config, ConfigWarning};
use atrium::diag::{CollectedDiagnostics, Severity};
use atrium::fetch::{read_fixture, ListClient};
use atrium::models::{DocumentRecord, EventRecord, MenuItemRecord};
use atrium::{Portal, PortalContext};

/// Atrium - portal chrome renderer for list-driven intranet sites
#[derive(Parser, Debug)]
#[command(name = "atrium")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output diagnostics as NDJSON for CI
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the portal page
    Render {
        /// Path to atrium.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Site root URL (overrides detection)
        #[arg(long)]
        site: Option<String>,

        /// Page URL used for site detection
        #[arg(long)]
        page_url: Option<String>,

        /// Host page HTML whose body attributes override the config
        #[arg(long)]
        body: Option<PathBuf>,

        /// JSON fixture with menu list records (skips the endpoint)
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// JSON fixture with event records
        #[arg(long)]
        events_fixture: Option<PathBuf>,

        /// JSON fixture with document records
        #[arg(long)]
        documents_fixture: Option<PathBuf>,

        /// Write the page here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Render as if inside a host frame
        #[arg(long)]
        embedded: bool,

        /// Group names of the current user
        #[arg(long, value_delimiter = ',')]
        groups: Vec<String>,
    },

    /// Validate configuration and menu structure
    Check {
        /// Path to atrium.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON fixture with menu list records to validate
        #[arg(long)]
        fixture: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            site,
            page_url,
            body,
            fixture,
            events_fixture,
            documents_fixture,
            out,
            embedded,
            groups,
        } => cmd_render(RenderArgs {
            config,
            site,
            page_url,
            body,
            fixture,
            events_fixture,
            documents_fixture,
            out,
            embedded,
            groups,
            json: cli.json,
            verbose: cli.verbose,
        }),
        Commands::Check { config, fixture } => cmd_check(config, fixture, cli.json),
    }
}

struct RenderArgs {
    config: Option<PathBuf>,
    site: Option<String>,
    page_url: Option<String>,
    body: Option<PathBuf>,
    fixture: Option<PathBuf>,
    events_fixture: Option<PathBuf>,
    documents_fixture: Option<PathBuf>,
    out: Option<PathBuf>,
    embedded: bool,
    groups: Vec<String>,
    json: bool,
    verbose: u8,
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut sink = CollectedDiagnostics::new();
    let mut config = load_config(args.config.as_deref(), &mut sink)?;

    if let Some(body_path) = &args.body {
        let markup = std::fs::read_to_string(body_path)?;
        config::apply_body_attributes(&mut config, &markup, &mut sink);
    }
    if let Some(site) = &args.site {
        config.site.root = Some(site.clone());
        config.site.detect_subsites = args.page_url.is_some();
    }

    let portal = Portal::new(
        config,
        PortalContext {
            embedded: args.embedded,
            page_url: args.page_url.clone(),
            user_groups: args.groups.clone(),
        },
    );

    // Menu records: fixture first, endpoint otherwise
    let menu_records: Result<Vec<MenuItemRecord>, String> = match &args.fixture {
        Some(path) => read_fixture(path).map_err(|e| e.to_string()),
        None => portal.menu_url().map_err(|e| e.to_string()).and_then(|url| {
            ListClient::new()
                .fetch_list::<MenuItemRecord>(&url)
                .map_err(|e| e.to_string())
        }),
    };

    let events: Option<Result<Vec<EventRecord>, String>> = if portal.config.calendar.enabled {
        match &args.events_fixture {
            Some(path) => Some(Ok(read_fixture(path)?)),
            None => fetch_events(&portal, &mut sink),
        }
    } else {
        None
    };

    let documents: Option<Vec<DocumentRecord>> = if portal.config.documents.enabled {
        match &args.documents_fixture {
            Some(path) => Some(read_fixture(path)?),
            None => fetch_documents(&portal, &mut sink),
        }
    } else {
        None
    };

    let html = portal.render_page(
        menu_records.as_deref().map_err(String::clone),
        events.as_ref().map(|r| r.as_deref().map_err(String::clone)),
        documents,
        &mut sink,
    );

    match &args.out {
        Some(path) => std::fs::write(path, &html)?,
        None => println!("{html}"),
    }

    print_diagnostics(&sink, args.json, args.verbose);
    Ok(())
}

/// `None` means no calendar query could be formed; a failed fetch stays an
/// `Err` so the page can show the error row with its reload control.
fn fetch_events(
    portal: &Portal,
    sink: &mut CollectedDiagnostics,
) -> Option<Result<Vec<EventRecord>, String>> {
    use atrium::DiagnosticSink as _;
    let today = chrono::Local::now().date_naive();
    let url = match portal.events_url(today, 1) {
        Ok(url) => url,
        Err(e) => {
            sink.warn("calendar", e.to_string());
            return None;
        }
    };
    Some(
        ListClient::new()
            .fetch_list::<EventRecord>(&url)
            .map_err(|e| e.to_string()),
    )
}

fn fetch_documents(
    portal: &Portal,
    sink: &mut CollectedDiagnostics,
) -> Option<Vec<DocumentRecord>> {
    use atrium::DiagnosticSink as _;
    let url = match portal.documents_url("") {
        Ok(url) => url,
        Err(e) => {
            sink.warn("documents", e.to_string());
            return None;
        }
    };
    match ListClient::new().fetch_list::<DocumentRecord>(&url) {
        Ok(documents) => Some(documents),
        Err(e) => {
            sink.error("documents", e.to_string());
            Some(Vec::new())
        }
    }
}

fn cmd_check(config_path: Option<PathBuf>, fixture: Option<PathBuf>, json: bool) -> Result<()> {
    use atrium::DiagnosticSink as _;

    let mut sink = CollectedDiagnostics::new();
    let config = load_config(config_path.as_deref(), &mut sink)?;

    if !json {
        println!("Atrium Check");
        println!("  theme: {}", config.branding.theme);
        println!("  max depth: {}", config.navigation.effective_max_depth());
        println!("  hover delay: {} ms", config.navigation.hover_delay_ms);
        println!(
            "  calendar: {} ({} per page)",
            if config.calendar.enabled { "enabled" } else { "disabled" },
            config.calendar.item_count
        );
        println!(
            "  documents: {}",
            if config.documents.enabled { "enabled" } else { "disabled" }
        );
        println!();
    }

    check_config(&config, &mut sink);

    if let Some(path) = &fixture {
        let records: Vec<MenuItemRecord> = read_fixture(path)?;
        let forest = atrium::build_forest(
            &records,
            config.navigation.effective_max_depth(),
            &mut sink,
        );
        sink.info(
            "menu",
            format!(
                "{} of {} items placed, deepest level {}",
                atrium::menu::forest_size(&forest),
                records.len(),
                atrium::menu::forest_max_level(&forest),
            ),
        );
    }

    print_diagnostics(&sink, json, 1);

    let errors = sink
        .entries
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    if !json {
        println!();
        if errors > 0 {
            println!("Check found {} error(s).", errors);
        } else if sink.warnings() > 0 {
            println!("Check passed with {} warning(s).", sink.warnings());
        } else {
            println!("All checks passed.");
        }
    }
    if errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn check_config(config: &Config, sink: &mut CollectedDiagnostics) {
    use atrium::DiagnosticSink as _;

    if config.navigation.list_guid.is_none() {
        sink.error(
            "config",
            "navigation.list_guid is not set; the menu cannot be fetched".to_string(),
        );
    }
    if config.calendar.enabled && config.calendar.list_guid.is_none() {
        sink.warn(
            "config",
            "calendar is enabled but calendar.list_guid is not set".to_string(),
        );
    }
    if config.documents.enabled && config.documents.list_guid.is_none() {
        sink.warn(
            "config",
            "documents are enabled but documents.list_guid is not set".to_string(),
        );
    }
    if atrium::theme::palette(&config.branding.theme).key != config.branding.theme {
        sink.warn(
            "config",
            format!(
                "unknown theme '{}'; falling back to blue",
                config.branding.theme
            ),
        );
    }
    if config.navigation.max_depth == 0 {
        sink.warn(
            "config",
            "navigation.max_depth 0 coerces to 1".to_string(),
        );
    }
}

fn load_config(path: Option<&std::path::Path>, sink: &mut CollectedDiagnostics) -> Result<Config> {
    use atrium::DiagnosticSink as _;

    let config = match path {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)?;
            for warning in warnings {
                sink.warn("config", format_config_warning(&warning));
            }
            config::with_env_overrides(config)
        }
        None => config::load_or_default(None),
    };
    Ok(config)
}

fn format_config_warning(warning: &ConfigWarning) -> String {
    let mut message = format!("unknown key '{}' in {}", warning.key, warning.file.display());
    if let Some(line) = warning.line {
        message.push_str(&format!(" (line {line})"));
    }
    if let Some(suggestion) = &warning.suggestion {
        message.push_str(&format!("; did you mean '{suggestion}'?"));
    }
    message
}

fn print_diagnostics(sink: &CollectedDiagnostics, json: bool, verbose: u8) {
    if json {
        for diag in &sink.entries {
            eprintln!("{}", diag.to_json());
        }
        return;
    }

    let color = std::io::stderr().is_terminal();
    for diag in &sink.entries {
        if diag.severity == Severity::Info && verbose == 0 {
            continue;
        }
        let label = match diag.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        if color {
            let styled = match diag.severity {
                Severity::Info => label.dark_grey(),
                Severity::Warning => label.yellow(),
                Severity::Error => label.red(),
            };
            eprintln!("{styled} [{}] {}", diag.component, diag.message);
        } else {
            eprintln!("{label} [{}] {}", diag.component, diag.message);
        }
    }
}
