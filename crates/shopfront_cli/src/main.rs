//! Catalog command-line front end.
//!
//! # Responsibility
//! - Map command-line input to candidate products.
//! - Route writes through the validated service entry points.
//! - Render outcomes as JSON on stdout and failures on stderr.

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use rust_decimal::Decimal;
use shopfront_core::db::open_db;
use shopfront_core::{
    init_logging, multiple_of_three, seed_catalog, CatalogConfig, ConstraintValue, Product,
    ProductId, ProductService, ServiceError, SqliteProductRepository, MULTIPLE_OF_THREE_MESSAGE,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(about = "Product catalog maintenance CLI", version)]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalOpts {
    /// SQLite database file (overrides SHOPFRONT_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Skip demo data on an empty catalog.
    #[arg(long, global = true, default_value_t = false)]
    no_seed: bool,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Catalog(CatalogCommand),
    /// Check a number against the multiple-of-three rule.
    CheckMultiple { value: String },
}

/// Commands that operate on the catalog database.
#[derive(Subcommand)]
enum CatalogCommand {
    /// List every product.
    List,
    /// Show one product.
    Show { id: ProductId },
    /// Create a product.
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Replace every field of an existing product.
    Update {
        id: ProductId,
        #[command(flatten)]
        fields: ProductFields,
        #[arg(long, default_value_t = false)]
        out_of_stock: bool,
    },
    /// Delete a product.
    Delete { id: ProductId },
    /// Insert demo products into an empty catalog.
    Seed,
}

#[derive(Args)]
struct ProductFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: Decimal,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image_path: Option<String>,
    #[arg(long)]
    category: Option<String>,
}

impl ProductFields {
    fn into_candidate(self, id: ProductId, in_stock: bool) -> Product {
        let mut product = Product::with_id(id, self.name, self.price);
        product.description = self.description;
        product.image_path = self.image_path;
        product.category = self.category;
        product.in_stock = in_stock;
        product
    }
}

fn main() -> ExitCode {
    let Cli { opts, command } = Cli::parse();

    match command {
        Command::CheckMultiple { value } => check_multiple(&value),
        Command::Catalog(command) => run_catalog(command, &opts),
    }
}

fn run_catalog(command: CatalogCommand, opts: &GlobalOpts) -> ExitCode {
    let config = match resolve_config(opts) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(command, &config) {
        Ok(code) => code,
        Err(message) => {
            error!("event=cli_command module=cli status=error error={message}");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(opts: &GlobalOpts) -> Result<CatalogConfig, String> {
    let mut config = CatalogConfig::from_env().map_err(|err| err.to_string())?;
    apply_overrides(&mut config, opts);

    if let Some(dir) = &config.log_dir {
        init_logging(&config.log_level, dir)?;
        info!("{}", config_event(&config));
    }
    Ok(config)
}

fn apply_overrides(config: &mut CatalogConfig, opts: &GlobalOpts) {
    if let Some(db) = &opts.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &opts.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &opts.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if opts.no_seed {
        config.seed_on_start = false;
    }
}

/// Resolved settings as one `config_resolved` event line.
fn config_event(config: &CatalogConfig) -> String {
    format!(
        "event=config_resolved module=cli status=ok db_path={} log_level={} seed_on_start={}",
        config.db_path.display(),
        config.log_level,
        config.seed_on_start
    )
}

fn run(command: CatalogCommand, config: &CatalogConfig) -> Result<ExitCode, String> {
    let conn = open_db(&config.db_path).map_err(|err| format!("database open failed: {err}"))?;
    let repo = SqliteProductRepository::try_new(&conn)
        .map_err(|err| format!("catalog repository init failed: {err}"))?;
    let service = ProductService::new(repo);

    if config.seed_on_start {
        seed_catalog(service.repository()).map_err(|err| format!("seeding failed: {err}"))?;
    }

    info!("event=cli_command module=cli status=start");
    match command {
        CatalogCommand::List => {
            let products = service.list_all().map_err(|err| err.to_string())?;
            print_json(&products)?;
        }
        CatalogCommand::Show { id } => {
            reject_nil(id)?;
            match service.get_by_id(id).map_err(|err| err.to_string())? {
                Some(product) => print_json(&product)?,
                None => {
                    eprintln!("product {id} not found");
                    return Ok(ExitCode::from(4));
                }
            }
        }
        CatalogCommand::Add { fields } => {
            let candidate = fields.into_candidate(ProductId::nil(), true);
            let stored = service.create_validated(&candidate).or_else(report)?;
            print_json(&stored)?;
        }
        CatalogCommand::Update {
            id,
            fields,
            out_of_stock,
        } => {
            reject_nil(id)?;
            let candidate = fields.into_candidate(id, !out_of_stock);
            let stored = service.update_validated(id, &candidate).or_else(report)?;
            print_json(&stored)?;
        }
        CatalogCommand::Delete { id } => {
            reject_nil(id)?;
            if !service.delete(id).map_err(|err| err.to_string())? {
                eprintln!("product {id} not found");
                return Ok(ExitCode::from(4));
            }
            println!("deleted {id}");
        }
        CatalogCommand::Seed => {
            let inserted =
                seed_catalog(service.repository()).map_err(|err| format!("seeding failed: {err}"))?;
            println!("seeded {inserted} products");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Expands validation failures to one line per field; other errors pass through.
fn report(err: ServiceError) -> Result<Product, String> {
    match err {
        ServiceError::Validation(errors) => {
            let lines: Vec<String> = errors
                .violations()
                .iter()
                .map(|violation| format!("{}: {}", violation.field, violation.message))
                .collect();
            Err(lines.join("\n"))
        }
        other => Err(other.to_string()),
    }
}

fn reject_nil(id: ProductId) -> Result<(), String> {
    if id.is_nil() {
        return Err("bad request: product id must not be empty".to_string());
    }
    Ok(())
}

fn check_multiple(raw: &str) -> ExitCode {
    let value = parse_constraint_value(raw);
    if multiple_of_three(Some(&value)) {
        println!("valid");
        ExitCode::SUCCESS
    } else {
        println!("{MULTIPLE_OF_THREE_MESSAGE}");
        ExitCode::FAILURE
    }
}

fn parse_constraint_value(raw: &str) -> ConstraintValue {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return ConstraintValue::Integer(value);
    }
    if let Ok(value) = raw.parse::<Decimal>() {
        return ConstraintValue::Decimal(value);
    }
    if let Ok(value) = raw.parse::<bool>() {
        return ConstraintValue::Bool(value);
    }
    ConstraintValue::Text(raw.to_string())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    println!("{text}");
    Ok(())
}
