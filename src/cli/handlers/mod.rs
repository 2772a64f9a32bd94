mod init;
pub use init::cmd_init;

use std::io::Read;
use std::path::PathBuf;
use std::sync::Mutex;

/// Global override for session directory (set by -C flag)
static SESSION_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::session_io::{self, SessionError};
use crate::io::store::{FileStore, KvStore};
use crate::model::route::RouteState;
use crate::model::session::Session;
use crate::ops::nav::{Direction, Step};
use crate::ops::{clear_ids, get_ids, save_ids, step};

/// Storage key for the tracked route URL
const ROUTE_KEY: &str = "route";

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_session_cwd()
    if let Some(ref dir) = cli.session_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        SESSION_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        // Init is handled in main.rs before session discovery
        Commands::Init(args) => cmd_init(args),

        Commands::Ids(args) => match args.action {
            IdsAction::Set(args) => cmd_ids_set(args, json),
            IdsAction::List(args) => cmd_ids_list(args, json),
            IdsAction::Clear => cmd_ids_clear(json),
        },

        Commands::Next(args) => cmd_step(args, Direction::Next, json),
        Commands::Prev(args) => cmd_step(args, Direction::Prev, json),

        Commands::Route(args) => match args.action {
            RouteAction::Show => cmd_route_show(json),
            RouteAction::Set(args) => cmd_route_set(args, json),
            RouteAction::Update(args) => cmd_route_update(args, json),
            RouteAction::Clear => cmd_route_clear(json),
        },

        Commands::Config(args) => match args.action {
            ConfigAction::Policy(args) => cmd_config_policy(args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_session_cwd() -> Result<Session, SessionError> {
    let start = match SESSION_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(SessionError::IoError)?,
    };
    let root = session_io::discover_session(&start)?;
    session_io::load_session(&root)
}

fn open_store(session: &Session) -> FileStore {
    FileStore::open(&session.state_path())
}

// ---------------------------------------------------------------------------
// Id list commands
// ---------------------------------------------------------------------------

fn cmd_ids_set(args: IdsSetArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session_cwd()?;

    let raw = match args.file {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read {}: {}", path, e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut store = open_store(&session);
    save_ids(&mut store, args.key, &raw);
    let ids = get_ids(&store, args.key);

    if json {
        let out = IdListJson {
            key: args.key.as_str().to_string(),
            count: ids.len(),
            ids,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("saved {} ids to {}", ids.len(), args.key.as_str());
    }
    Ok(())
}

fn cmd_ids_list(args: IdsListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session_cwd()?;
    let store = open_store(&session);
    let ids = get_ids(&store, args.key);

    if json {
        let out = IdListJson {
            key: args.key.as_str().to_string(),
            count: ids.len(),
            ids,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for id in &ids {
            println!("{}", id);
        }
    }
    Ok(())
}

fn cmd_ids_clear(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session_cwd()?;
    let mut store = open_store(&session);
    clear_ids(&mut store);

    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({"cleared": true}))?);
    } else {
        println!("cleared id lists");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Stepping
// ---------------------------------------------------------------------------

fn cmd_step(
    args: StepArgs,
    direction: Direction,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session_cwd()?;
    let mut store = open_store(&session);
    let policy = args.policy.unwrap_or(session.config.nav.policy);

    let outcome = match args.id {
        // Explicit id: pure lookup, nothing written back
        Some(ref id) => step(&store, id, args.key, direction, policy),
        // Otherwise step from the tracked route and write the result back
        None => {
            let url = store
                .get(ROUTE_KEY)
                .ok_or("no route set (use `sd route set <url>`)")?;
            let mut route = RouteState::parse(&url);
            let current = route.query.get(args.key.as_str()).unwrap_or("").to_string();
            let outcome = step(&store, &current, args.key, direction, policy);
            if let Step::To(ref id) = outcome {
                route.update([(args.key.as_str(), Some(id.as_str()))]);
                store.set(ROUTE_KEY, route.to_url());
            }
            outcome
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&step_to_json(&outcome))?);
        return Ok(());
    }
    match outcome {
        Step::To(id) => println!("{}", id),
        Step::Boundary => eprintln!("no more items in that direction"),
        Step::Empty => eprintln!("no ids saved under {}", args.key.as_str()),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Route commands
// ---------------------------------------------------------------------------

fn cmd_route_show(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session_cwd()?;
    let store = open_store(&session);

    match store.get(ROUTE_KEY) {
        Some(url) => {
            let route = RouteState::parse(&url);
            if json {
                println!("{}", serde_json::to_string_pretty(&route_to_json(&route))?);
            } else {
                print_route(&route);
            }
        }
        None => {
            if json {
                println!("null");
            } else {
                println!("no route set");
            }
        }
    }
    Ok(())
}

fn cmd_route_set(args: RouteSetArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session_cwd()?;
    let mut store = open_store(&session);

    // Stored verbatim; the path is never rewritten by later updates
    store.set(ROUTE_KEY, args.url.clone());

    let route = RouteState::parse(&args.url);
    if json {
        println!("{}", serde_json::to_string_pretty(&route_to_json(&route))?);
    } else {
        print_route(&route);
    }
    Ok(())
}

fn cmd_route_update(args: RouteUpdateArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session_cwd()?;
    let mut store = open_store(&session);

    let url = store
        .get(ROUTE_KEY)
        .ok_or("no route set (use `sd route set <url>`)")?;
    let mut route = RouteState::parse(&url);

    let mut patch: Vec<(String, Option<String>)> = Vec::new();
    for pair in &args.pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", pair))?;
        if key.is_empty() {
            return Err(format!("empty key in '{}'", pair).into());
        }
        // Empty value removes the key
        let value = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        patch.push((key.to_string(), value));
    }
    route.update(patch.iter().map(|(k, v)| (k.as_str(), v.as_deref())));
    store.set(ROUTE_KEY, route.to_url());

    if json {
        println!("{}", serde_json::to_string_pretty(&route_to_json(&route))?);
    } else {
        println!("{}", route.to_url());
    }
    Ok(())
}

fn cmd_route_clear(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session_cwd()?;
    let mut store = open_store(&session);
    store.remove(ROUTE_KEY);

    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({"cleared": true}))?);
    } else {
        println!("route cleared");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config_policy(args: PolicyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session_cwd()?;
    let (_, mut doc) = config_io::read_config(&session.stride_dir)?;
    config_io::set_policy(&mut doc, args.policy);
    config_io::write_config(&session.stride_dir, &doc)?;
    println!("edge policy set to {}", args.policy.as_str());
    Ok(())
}
