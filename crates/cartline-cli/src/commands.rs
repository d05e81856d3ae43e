use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use cartline_ledger::{
    CartOp, LedgerValidator, PricingConfig, ProductCatalog, ReplayEngine, Totals,
};
use cartline_sync::{CartSession, CartSnapshot, RemoteCartStore};
use cartline_types::{Product, ProductId};

use crate::cli::*;
use crate::store::JsonFileStore;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let pricing = load_pricing(cli.pricing.as_deref())?;

    match cli.command {
        Command::Add(args) => cmd_add(&cli.catalog, &cli.cart, pricing, args).await,
        Command::Set(args) => cmd_set(&cli.cart, pricing, args).await,
        Command::Remove(args) => cmd_remove(&cli.cart, pricing, args).await,
        Command::Clear => cmd_clear(&cli.cart, pricing).await,
        Command::Show => cmd_show(&cli.cart, pricing).await,
        Command::Totals => cmd_totals(&cli.cart, pricing).await,
        Command::Replay(args) => cmd_replay(&cli.catalog, &cli.cart, pricing, args).await,
        Command::Validate => cmd_validate(&cli.cart).await,
    }
}

async fn open_session(cart: &Path, pricing: PricingConfig) -> anyhow::Result<CartSession> {
    let store = JsonFileStore::new(cart.to_path_buf());
    let mut session = CartSession::with_remote(pricing, Box::new(store));
    session
        .hydrate()
        .await
        .with_context(|| format!("failed to read cart file {}", cart.display()))?;
    Ok(session)
}

fn load_catalog(path: &Path) -> anyhow::Result<ProductCatalog> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let products: Vec<Product> = serde_json::from_str(&contents)
        .with_context(|| format!("catalog {} is not a JSON array of products", path.display()))?;
    Ok(products.into_iter().collect())
}

fn load_pricing(path: Option<&Path>) -> anyhow::Result<PricingConfig> {
    let Some(path) = path else {
        return Ok(PricingConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pricing config {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("pricing config {} is malformed", path.display()))
}

async fn cmd_add(
    catalog_path: &Path,
    cart: &Path,
    pricing: PricingConfig,
    args: AddArgs,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let id = ProductId::from(args.id);
    let product = catalog
        .get(&id)
        .with_context(|| format!("product {id} is not in the catalog"))?;

    let mut session = open_session(cart, pricing).await?;
    let line_quantity = session.add_item(product, args.quantity).await?;

    println!(
        "{} Added {} × {} (now {} in cart)",
        "✓".green().bold(),
        args.quantity,
        product.name.bold(),
        line_quantity
    );
    print_summary(&session.totals());
    Ok(())
}

async fn cmd_set(cart: &Path, pricing: PricingConfig, args: SetArgs) -> anyhow::Result<()> {
    let id = ProductId::from(args.id);
    let mut session = open_session(cart, pricing).await?;
    session.set_quantity(&id, args.quantity).await?;

    if args.quantity == 0 {
        println!("{} Removed {}", "✓".green().bold(), id.to_string().bold());
    } else {
        println!(
            "{} Set {} to {}",
            "✓".green().bold(),
            id.to_string().bold(),
            args.quantity
        );
    }
    print_summary(&session.totals());
    Ok(())
}

async fn cmd_remove(cart: &Path, pricing: PricingConfig, args: RemoveArgs) -> anyhow::Result<()> {
    let id = ProductId::from(args.id);
    let mut session = open_session(cart, pricing).await?;

    match session.remove_item(&id).await? {
        Some(line) => println!("{} Removed {}", "✓".green().bold(), line.name.bold()),
        None => println!("Nothing in the cart for {id}."),
    }
    Ok(())
}

async fn cmd_clear(cart: &Path, pricing: PricingConfig) -> anyhow::Result<()> {
    let mut session = open_session(cart, pricing).await?;
    session.clear().await?;
    println!("{} Cart cleared", "✓".green().bold());
    Ok(())
}

async fn cmd_show(cart: &Path, pricing: PricingConfig) -> anyhow::Result<()> {
    let session = open_session(cart, pricing).await?;

    if session.ledger().is_empty() {
        println!("Cart is empty.");
        return Ok(());
    }

    for line in session.ledger().items() {
        let discount = match line.discount_percent() {
            pct if pct > 0 => format!("  {}", format!("{pct}% OFF").yellow()),
            _ => String::new(),
        };
        println!(
            "{:>3} × {}  {}  ${} each → ${}{}",
            line.quantity,
            line.name.bold(),
            format!("({})", line.category).dimmed(),
            line.unit_price,
            line.line_total(),
            discount
        );
    }
    println!();
    print_summary(&session.totals());
    Ok(())
}

async fn cmd_totals(cart: &Path, pricing: PricingConfig) -> anyhow::Result<()> {
    let session = open_session(cart, pricing).await?;
    print_summary(&session.totals());
    Ok(())
}

async fn cmd_replay(
    catalog_path: &Path,
    cart: &Path,
    pricing: PricingConfig,
    args: ReplayArgs,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let contents = std::fs::read_to_string(&args.ops)
        .with_context(|| format!("failed to read operation log {}", args.ops.display()))?;
    let ops: Vec<CartOp> = serde_json::from_str(&contents)
        .with_context(|| format!("operation log {} is malformed", args.ops.display()))?;

    let ledger = ReplayEngine::replay(&ops, &catalog, pricing)?;

    let store = JsonFileStore::new(cart.to_path_buf());
    store
        .push_snapshot(&CartSnapshot::of(&ledger, ops.len() as u64))
        .await?;

    println!(
        "{} Replayed {} operations → {} lines",
        "✓".green().bold(),
        ops.len(),
        ledger.len()
    );
    print_summary(&ledger.totals());
    Ok(())
}

async fn cmd_validate(cart: &Path) -> anyhow::Result<()> {
    let store = JsonFileStore::new(cart.to_path_buf());
    let Some(snapshot) = store.fetch_snapshot().await? else {
        println!("No cart file; nothing to validate.");
        return Ok(());
    };

    let report = LedgerValidator::validate_items(&snapshot.items);
    if report.is_valid() {
        println!(
            "{} Cart invariants hold ({} lines, revision {})",
            "✓".green().bold(),
            report.line_count,
            snapshot.revision
        );
        return Ok(());
    }

    for violation in &report.violations {
        println!(
            "  {} {}: {}",
            "✗".red(),
            violation.id.to_string().bold(),
            violation.description
        );
    }
    anyhow::bail!("{} invariant violations", report.violations.len())
}

fn print_summary(totals: &Totals) {
    println!("  Subtotal: {}", format!("${}", totals.subtotal).bold());
    if totals.shipping.is_zero() {
        println!("  Shipping: {}", "FREE".green());
    } else {
        println!("  Shipping: ${}", totals.shipping);
    }
    println!("  Tax:      ${}", totals.tax);
    println!("  Total:    {}", format!("${}", totals.total).bold());
    println!("  Items:    {}", totals.item_count);
}
