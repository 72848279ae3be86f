//! # Session Flow
//!
//! One run of the terminal, from "who are you?" to a saved bill or a
//! statistics table.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Session States                                 │
//! │                                                                         │
//! │  NoRole ──(--position, or 1/2 at the prompt)──► RoleChosen             │
//! │                                                    │                    │
//! │        ┌───────────────────────────────────────────┤                    │
//! │        │ --name given                              │ no --name          │
//! │        ▼                                           ▼                    │
//! │  look up ── missing ──► "create it? (y/n)"    numbered list + 0 new    │
//! │        │                     │                     │                    │
//! │        └─────────────────────┴─────────┬───────────┘                    │
//! │                                        ▼                                │
//! │                                   UserChosen                            │
//! │                                        │                                │
//! │              ┌─────────────────────────┴──────────────┐                 │
//! │              ▼                                        ▼                 │
//! │     salesman_action                            manager_action           │
//! │     beverage → ingredient? → Sale              per-salesman totals      │
//! │     → persist → bill                           → table                  │
//! │                                                                         │
//! │  q at any prompt ──► CliError::Aborted                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::prompt::{Console, ARROW};
use crate::report::{render_table, write_bill};
use coffee_core::stats::grand_total;
use coffee_core::validation::{validate_name, SessionFlags};
use coffee_core::{
    Beverage, CatalogItem, CoreError, Ingredient, Role, Sale, SalesSummary, Salesman, User, QUIT,
};
use coffee_db::{CatalogRow, DbError};

/// Runs one session with already validated flags.
pub async fn run<R: BufRead, W: Write>(
    ctx: &AppContext,
    flags: &SessionFlags,
    console: &mut Console<R, W>,
) -> CliResult<()> {
    info!(
        db = %ctx.config.database_path.display(),
        log = %ctx.config.log_path.display(),
        "Session started"
    );
    let user = define_user(ctx, flags, console).await?;

    match user {
        User::Salesman(salesman) => {
            salesman_action(ctx, flags, &salesman, console).await?;
        }
        User::Manager(manager) => {
            info!(manager = %manager, "Manager session");
            manager_action(ctx, console).await?;
        }
    }
    Ok(())
}

// =============================================================================
// Role & User Resolution
// =============================================================================

/// Resolves the operator: role from `--position` or a prompt, then the
/// account from `--name` or a listing. The result is always persisted.
pub async fn define_user<R: BufRead, W: Write>(
    ctx: &AppContext,
    flags: &SessionFlags,
    console: &mut Console<R, W>,
) -> CliResult<User> {
    let role = match flags.role()? {
        Some(role) => role,
        None => console.choose_role()?,
    };
    info!(role = %role, "Position chosen");

    match flags.name.as_deref() {
        Some(name) => get_user(ctx, role, name, console).await,
        None => who_are_you(ctx, role, console).await,
    }
}

/// `--name` was given: use it, or offer to create it.
async fn get_user<R: BufRead, W: Write>(
    ctx: &AppContext,
    role: Role,
    name: &str,
    console: &mut Console<R, W>,
) -> CliResult<User> {
    if let Some(user) = ctx.db.users().find(role, name).await? {
        info!(role = %role, name = %name, "User found");
        return Ok(user);
    }

    let question = format!("{role} with name {name} not found! do you want to create it? (y/n)");
    if !console.confirm(&question)? {
        info!(
            role = %role,
            name = %name,
            "User not found and operator declined to create it"
        );
        return Err(CliError::Aborted);
    }

    let user = role.account(name);
    ctx.db.users().create(&user).await?;
    Ok(user)
}

/// No `--name`: numbered list of existing accounts plus `0` for a new one.
async fn who_are_you<R: BufRead, W: Write>(
    ctx: &AppContext,
    role: Role,
    console: &mut Console<R, W>,
) -> CliResult<User> {
    'listing: loop {
        let mut users = ctx.db.users().list(role).await?;

        loop {
            console.say("Who are you? (q - for quit or cancel)")?;
            for (number, user) in users.iter().enumerate() {
                console.say(format_args!("{} {}", number + 1, user))?;
            }
            console.say("0 create new account")?;

            let choice = console.answer(ARROW)?;
            if choice == QUIT {
                return Err(CliError::Aborted);
            }

            match choice.parse::<usize>() {
                Ok(0) => match create_account_with_new_name(ctx, role, console).await? {
                    Some(user) => return Ok(user),
                    None => continue 'listing,
                },
                Ok(n) if n <= users.len() => {
                    let user = users.swap_remove(n - 1);
                    info!(role = %role, name = %user.name(), "User chosen");
                    return Ok(user);
                }
                _ => continue,
            }
        }
    }
}

/// Name-entry loop behind `0 create new account`.
///
/// Returns `None` when the operator types `q` to go back to the listing.
async fn create_account_with_new_name<R: BufRead, W: Write>(
    ctx: &AppContext,
    role: Role,
    console: &mut Console<R, W>,
) -> CliResult<Option<User>> {
    loop {
        let name = console.answer(&format!("Name of new {role}: "))?;
        if name == QUIT {
            return Ok(None);
        }

        if let Err(err) = validate_name("name", &name) {
            console.say(err)?;
            continue;
        }

        // Check and insert are separate units of work.
        if ctx.db.users().exists(role, &name).await? {
            console.say("user already exists")?;
            continue;
        }

        let user = role.account(name);
        match ctx.db.users().create(&user).await {
            Ok(()) => return Ok(Some(user)),
            Err(DbError::UniqueViolation { .. }) => {
                warn!(role = %role, name = %user.name(), "Name was taken between check and insert");
                console.say("user already exists")?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

// =============================================================================
// Product Resolution
// =============================================================================

/// Exact lookup of a flag value, or a picker when there is no flag.
async fn define_product<P, R, W>(
    ctx: &AppContext,
    flag: Option<&str>,
    console: &mut Console<R, W>,
) -> CliResult<P>
where
    P: CatalogRow,
    R: BufRead,
    W: Write,
{
    let Some(name) = flag else {
        return choose_product(ctx, console).await;
    };

    match ctx.db.products().get_by_name::<P>(name).await? {
        Some(product) => {
            info!(kind = %P::KIND, name = %product.name(), "{} \"{}\" was chosen", P::KIND.label(), product.name());
            Ok(product)
        }
        None => {
            warn!(kind = %P::KIND, name = %name, "Unavailable item requested");
            Err(CoreError::ProductNotFound {
                kind: P::KIND,
                name: name.to_string(),
            }
            .into())
        }
    }
}

/// Numbered menu of one kind.
async fn choose_product<P, R, W>(ctx: &AppContext, console: &mut Console<R, W>) -> CliResult<P>
where
    P: CatalogRow,
    R: BufRead,
    W: Write,
{
    let mut products = ctx.db.products().get_all::<P>().await?;
    if products.is_empty() {
        return Err(CoreError::EmptyCatalog { kind: P::KIND }.into());
    }

    let index = console.pick("Choose (q - for quit or cancel)", &products)?;
    let product = products.swap_remove(index);
    info!(kind = %P::KIND, name = %product.name(), "{} \"{}\" was chosen", P::KIND.label(), product.name());
    Ok(product)
}

/// The beverage is mandatory.
pub async fn define_beverage<R: BufRead, W: Write>(
    ctx: &AppContext,
    flag: Option<&str>,
    console: &mut Console<R, W>,
) -> CliResult<Beverage> {
    define_product::<Beverage, _, _>(ctx, flag, console).await
}

/// The ingredient is optional: without a flag the operator is asked first.
pub async fn define_ingredient<R: BufRead, W: Write>(
    ctx: &AppContext,
    flag: Option<&str>,
    console: &mut Console<R, W>,
) -> CliResult<Option<Ingredient>> {
    if flag.is_none() && !console.confirm("Do you want to add ingredient?(y/n)")? {
        info!("No ingredient added");
        return Ok(None);
    }

    define_product::<Ingredient, _, _>(ctx, flag, console)
        .await
        .map(Some)
}

// =============================================================================
// Actions
// =============================================================================

/// Records one sale and, if asked, writes its bill.
///
/// The sale is committed before any bill is written. A failed write or a
/// declined bill leaves the sale in place.
pub async fn salesman_action<R: BufRead, W: Write>(
    ctx: &AppContext,
    flags: &SessionFlags,
    salesman: &Salesman,
    console: &mut Console<R, W>,
) -> CliResult<Sale> {
    let beverage = define_beverage(ctx, flags.beverage.as_deref(), console).await?;
    let ingredient = define_ingredient(ctx, flags.ingredient.as_deref(), console).await?;

    let sale = Sale::new(salesman, &beverage, ingredient.as_ref())?;
    ctx.db.sales().insert(&sale).await?;

    if let Some(path) = flags.save_bill.as_deref() {
        write_bill(Path::new(path), &sale)?;
        return Ok(sale);
    }

    if !console.confirm("Do you want to create a bill? (y/n)")? {
        info!(sale = %sale.id(), "No bill requested");
        return Err(CliError::Aborted);
    }

    let path = console.answer("Enter file to save bill: ")?;
    if path == QUIT {
        return Err(CliError::Aborted);
    }
    write_bill(Path::new(&path), &sale)?;
    console.say("Report was created successfully")?;

    Ok(sale)
}

/// Prints sales count and total for every salesman, in insertion order.
pub async fn manager_action<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
) -> CliResult<Vec<SalesSummary>> {
    let salesmen = ctx.db.users().get_all::<Salesman>().await?;

    let mut rows = Vec::with_capacity(salesmen.len());
    for salesman in &salesmen {
        let sales = ctx.db.sales().get_by_salesman(&salesman.name).await?;
        rows.push(SalesSummary::from_sales(salesman, &sales)?);
    }

    let total = grand_total(&rows)?;
    console.say(render_table(&rows).trim_end())?;
    info!(
        salesmen = rows.len(),
        total = %total,
        "Showing statistics of sales"
    );

    Ok(rows)
}
