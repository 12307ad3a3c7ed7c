mod access;
mod checkout;
mod chime;
mod dish;
mod plan;
mod run;
mod schedule;
mod store;
mod timer;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand};

use crate::checkout::{CheckoutGateway, EnvCheckoutGateway};
use crate::dish::{Dish, find_preset, parse_dish_spec};
use crate::plan::{Plan, PlanData, build_share_message, parse_plan_from_text};
use crate::schedule::{ScheduledDish, compute, fmt_clock};
use crate::store::{JsonFileStore, PlanStore, resolve_store_path};

#[derive(Parser, Debug)]
#[command(
    name = "hotdish",
    version,
    about = "Backward meal scheduler: when to start each dish so everything is hot at once"
)]
struct Cli {
    /// Plan store file (default: HOTDISH_STORE, then the user data dir).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Demo override: unlock Pro features for this invocation.
    #[arg(long, global = true)]
    demo_pro: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct DishInput {
    /// Target serve time, 24-hour HH:MM.
    #[arg(long, default_value = "18:00")]
    serve: String,

    /// Dish spec NAME[:PREP]:COOK (minutes); repeatable.
    #[arg(long = "dish", value_name = "SPEC")]
    dishes: Vec<String>,

    /// Add a quick-add preset by name; repeatable.
    #[arg(long = "preset", value_name = "NAME")]
    presets: Vec<String>,

    /// Start from a saved plan instead of --dish args (Pro).
    #[arg(long, value_name = "PLAN")]
    plan: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute and print the backward schedule.
    Schedule(DishInput),
    /// Live countdowns with start alarms (Pro).
    Run {
        #[command(flatten)]
        input: DishInput,
        /// Disable alarms and countdowns for this run.
        #[arg(long)]
        no_alarms: bool,
    },
    /// List the quick-add presets.
    Presets,
    /// Save, list, show, or delete named plans (Pro).
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
    /// Print a shareable plan message (Pro).
    Share(DishInput),
    /// Import a shared plan message from --text or stdin (Pro).
    Import {
        /// The pasted message; read from stdin when omitted.
        #[arg(long)]
        text: Option<String>,
        /// Also save the imported plan under this name.
        #[arg(long, value_name = "NAME")]
        save: Option<String>,
    },
    /// Start checkout for the paid tier.
    Upgrade {
        /// Receipt address passed through to checkout (optional).
        #[arg(long)]
        email: Option<String>,
    },
    /// Unlock Pro on this device after checkout.
    Activate,
}

#[derive(Subcommand, Debug)]
enum PlanAction {
    /// Snapshot the given serve time and dishes under a name.
    Save {
        name: String,
        #[command(flatten)]
        input: DishInput,
    },
    /// List saved plans.
    List,
    /// Print a saved plan's schedule.
    Show { name: String },
    /// Delete the first saved plan with this name.
    Delete { name: String },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let store = JsonFileStore::new(resolve_store_path(cli.store.clone()));
    // Read once per invocation; immutable afterwards.
    let pro = access::pro_enabled(cli.demo_pro, store.path());

    match cli.command {
        Command::Schedule(input) => {
            let (serve, dishes) = resolve_input(&input, &store, pro)?;
            print_schedule(&serve, &compute(&serve, &dishes));
        }
        Command::Run { input, no_alarms } => {
            require_pro(pro)?;
            let (serve, dishes) = resolve_input(&input, &store, pro)?;
            run::run_live(&compute(&serve, &dishes), !no_alarms)?;
        }
        Command::Presets => {
            for (name, prep, cook) in dish::PRESETS {
                println!("{name:<40} prep {prep:>3} min  cook {cook:>3} min");
            }
        }
        Command::Plan { action } => {
            require_pro(pro)?;
            run_plan_action(action, &store, pro)?;
        }
        Command::Share(input) => {
            require_pro(pro)?;
            let (serve, dishes) = resolve_input(&input, &store, pro)?;
            println!("{}", build_share_message(&PlanData::from_dishes(&serve, &dishes)));
        }
        Command::Import { text, save } => {
            require_pro(pro)?;
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("unable to read plan text from stdin")?;
                    buf
                }
            };
            let Some(data) = parse_plan_from_text(&text) else {
                bail!("could not read a valid plan from that text");
            };
            println!(
                "Imported plan: {} dishes, serve @ {}",
                data.dishes.len(),
                data.serve_time
            );
            print_schedule(&data.serve_time, &compute(&data.serve_time, &data.to_dishes()));
            if let Some(name) = save {
                save_plan(&store, &name, data)?;
            }
        }
        Command::Upgrade { email } => {
            let url = EnvCheckoutGateway.create_session(email.as_deref())?;
            println!("Open this link to complete checkout:\n{url}");
            println!("Then run `hotdish activate` to unlock Pro on this device.");
        }
        Command::Activate => {
            let marker = access::activate(store.path())?;
            println!("Pro unlocked on this device ({}).", marker.display());
        }
    }

    Ok(())
}

fn run_plan_action(action: PlanAction, store: &dyn PlanStore, pro: bool) -> Result<()> {
    match action {
        PlanAction::Save { name, input } => {
            let (serve, dishes) = resolve_input(&input, store, pro)?;
            save_plan(store, &name, PlanData::from_dishes(&serve, &dishes))?;
        }
        PlanAction::List => {
            let plans = store.load();
            if plans.is_empty() {
                println!("No saved plans yet.");
            }
            for plan in &plans {
                println!(
                    "{} — {} dishes · serve @ {}",
                    plan.name,
                    plan.data.dishes.len(),
                    plan.data.serve_time
                );
            }
        }
        PlanAction::Show { name } => {
            let plan = find_plan(store, &name)?;
            print_schedule(
                &plan.data.serve_time,
                &compute(&plan.data.serve_time, &plan.data.to_dishes()),
            );
        }
        PlanAction::Delete { name } => {
            let mut plans = store.load();
            let Some(index) = plans.iter().position(|p| p.name == name) else {
                bail!("no plan named '{name}'");
            };
            plans.remove(index);
            store.save(&plans)?;
            println!("Deleted plan '{name}'.");
        }
    }
    Ok(())
}

fn save_plan(store: &dyn PlanStore, name: &str, data: PlanData) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("name your plan first");
    }
    let mut plans = store.load();
    plans.push(Plan::new(name, data, Local::now()));
    store.save(&plans)?;
    println!("Saved plan '{name}'.");
    Ok(())
}

fn find_plan(store: &dyn PlanStore, name: &str) -> Result<Plan> {
    store
        .load()
        .into_iter()
        .find(|p| p.name == name)
        .with_context(|| format!("no plan named '{name}'"))
}

/// Resolve CLI input to (serve time, dish list): a saved plan, or
/// --dish/--preset entries in the order given.
fn resolve_input(input: &DishInput, store: &dyn PlanStore, pro: bool) -> Result<(String, Vec<Dish>)> {
    if let Some(plan_name) = &input.plan {
        require_pro(pro)?;
        let plan = find_plan(store, plan_name)?;
        return Ok((plan.data.serve_time.clone(), plan.data.to_dishes()));
    }

    let mut dishes = Vec::new();
    for spec in &input.dishes {
        dishes.push(parse_dish_spec(spec, dishes.len()));
    }
    for query in &input.presets {
        let Some((name, prep, cook)) = find_preset(query) else {
            bail!("no preset matching '{query}' (see `hotdish presets`)");
        };
        dishes.push(Dish::new(format!("d{}", dishes.len() + 1), name, prep, cook));
    }
    Ok((input.serve.clone(), dishes))
}

fn require_pro(pro: bool) -> Result<()> {
    if !pro {
        bail!(
            "this feature requires Pro; run `hotdish upgrade`, or unlock a demo with --demo-pro or {}=true",
            access::DEMO_PRO_VAR
        );
    }
    Ok(())
}

fn print_schedule(serve_time: &str, schedule: &[ScheduledDish]) {
    if schedule.is_empty() {
        println!("Add at least one dish with a cook time to see your timeline.");
        return;
    }
    println!("Serve at {serve_time}");
    println!();
    for dish in schedule {
        println!(
            "  {:<28} start {}  finish {}  total {:>3} min (prep {} + cook {})",
            dish.name,
            fmt_clock(dish.start_at),
            fmt_clock(dish.end_at),
            dish.total_minutes,
            dish.prep_minutes,
            dish.cook_minutes
        );
    }
}
