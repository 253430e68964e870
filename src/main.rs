use anyhow::Result;
use clap::Parser;

use autover::config::{self, Config};
use autover::git::{GitClient, DEFAULT_GIT_PATH};
use autover::record::VersionRecord;
use autover::resolver::{NumberingMethod, VersionResolver};
use autover::store::RecordStore;
use autover::version::parse_bundle_version;
use autover::ui;

#[derive(clap::Parser)]
#[command(
    name = "autover",
    about = "Derive build and version numbers from git history"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Override the git executable path")]
    git_path: Option<String>,

    #[arg(long, help = "Override the patch numbering method")]
    patch_numbering: Option<String>,

    #[arg(long, help = "Override the iOS build numbering method")]
    ios_numbering: Option<String>,

    #[arg(long, help = "Override the Android build numbering method")]
    android_numbering: Option<String>,

    #[arg(long, help = "Resolve and print without persisting anything")]
    dry_run: bool,

    #[arg(long, help = "Print the persisted version record and exit")]
    show: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("autover {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    apply_overrides(&mut config, &args)?;

    let store = RecordStore::new(&config.version_data_path, config.create_gitignore);

    if args.show {
        show_record(&store);
        return Ok(());
    }

    // Validate the configured git path; an unusable custom path falls back
    // to the on-PATH default with a warning.
    let mut client = GitClient::new();
    if config.git_path != DEFAULT_GIT_PATH {
        if client.validate_path(&config.git_path) {
            client.set_git_path(config.git_path.clone());
        } else {
            ui::display_status(&format!(
                "Configured git path '{}' is not usable, falling back to '{}'",
                config.git_path, DEFAULT_GIT_PATH
            ));
        }
    }
    match client.version() {
        Some(git_version) => ui::display_status(&format!("Using git {}", git_version)),
        None => ui::display_error("Git not found. Please install Git and set the path."),
    }

    // A dry run must not create the record file as a side effect of loading
    let previous = if args.dry_run {
        match store.load() {
            Ok(record) => record.unwrap_or_default(),
            Err(e) => {
                ui::display_error(&format!("Failed to load version record: {}", e));
                std::process::exit(1);
            }
        }
    } else {
        match store.load_or_create() {
            Ok(record) => record,
            Err(e) => {
                ui::display_error(&format!("Failed to load version record: {}", e));
                std::process::exit(1);
            }
        }
    };

    let record = resolve_pass(&config, client, &previous);
    ui::display_record(&record);

    if args.dry_run {
        ui::display_status("Dry run: nothing was persisted");
        return Ok(());
    }

    if config.save_version_data {
        if let Err(e) = store.save(&record) {
            ui::display_error(&format!("Failed to save version record: {}", e));
            std::process::exit(1);
        }
        ui::display_success(&format!(
            "Saved version record to '{}'",
            store.path().display()
        ));
    }

    Ok(())
}

/// Runs one full resolution pass: bundle version parse, the three numbered
/// fields, and the commit hash. Every field failure is reported on its own
/// and leaves that field at its last-known value.
fn resolve_pass(config: &Config, client: GitClient, previous: &VersionRecord) -> VersionRecord {
    let resolver = VersionResolver::new(client);
    let policy = config.numbering_policy();

    // Major and minor are always manual; the configured bundle version also
    // supplies the previous patch value. On a parse failure the persisted
    // record stands in.
    let mut prior = previous.clone();
    let (major, minor) = match parse_bundle_version(&config.bundle_version) {
        Ok(bundle) => {
            prior.patch = bundle.patch;
            (bundle.major, bundle.minor)
        }
        Err(e) => {
            ui::display_error(&format!(
                "Could not interpret the version number from bundle_version: {}",
                e
            ));
            (previous.major, previous.minor)
        }
    };

    let mut record = resolver.resolve_record(&policy, major, minor, &prior);
    record.hash = if config.save_commit_hash {
        resolver
            .resolve_hash(config.hash_length)
            .or_else(|| previous.hash.clone())
    } else {
        None
    };
    record
}

fn apply_overrides(config: &mut Config, args: &Args) -> Result<()> {
    if let Some(path) = &args.git_path {
        config.git_path = path.clone();
    }
    if let Some(method) = &args.patch_numbering {
        config.patch_numbering = method.parse::<NumberingMethod>()?;
    }
    if let Some(method) = &args.ios_numbering {
        config.ios_build_numbering = method.parse::<NumberingMethod>()?;
    }
    if let Some(method) = &args.android_numbering {
        config.android_build_numbering = method.parse::<NumberingMethod>()?;
    }
    Ok(())
}

fn show_record(store: &RecordStore) {
    match store.load() {
        Ok(Some(record)) => ui::display_record(&record),
        Ok(None) => {
            ui::display_error(&format!(
                "No version record found at '{}'",
                store.path().display()
            ));
            std::process::exit(1);
        }
        Err(e) => {
            ui::display_error(&format!("Failed to load version record: {}", e));
            std::process::exit(1);
        }
    }
}
