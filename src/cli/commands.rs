use std::sync::Arc;

use crate::{
    config::{Config, ConfigManager},
    core::services::{EntryDraft, EntryService, SummaryService},
    ledger::EntryKind,
    storage::{JsonStorage, StorageBackend},
    utils::{build_info, Clock, SystemClock},
};

use super::{output, CliError};

pub enum LoopControl {
    Continue,
    Exit,
}

/// Everything a command needs: preferences, the store and a clock.
pub struct CliContext {
    pub config: Config,
    pub storage: Box<dyn StorageBackend>,
    pub clock: Arc<dyn Clock>,
}

impl CliContext {
    pub fn from_environment() -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let storage = JsonStorage::with_clock(
            config.data_file(manager.base_dir()),
            Some(config.backup_retention),
            clock.clone(),
        )?;
        Ok(Self {
            config,
            storage: Box::new(storage),
            clock,
        })
    }

    fn symbol(&self) -> &str {
        &self.config.currency_symbol
    }
}

pub fn usage() -> String {
    [
        "Usage: cashflow_cli <command> [args]",
        "",
        "  cycle [YYYY-MM-DD] [--json]               items and balance of the 20th-to-20th cycle",
        "  monthly [YEAR] [--json]                   income/expenses/net per calendar month",
        "  list [--json]                             all recurring, one-off and override entries",
        "  add-recurring <name> <amount> <start>     monthly item, day taken from start date",
        "  add-one-off <name> <amount> <date>        single dated item",
        "  update <id> <recurring|one-off> <name> <amount> <date>",
        "  delete <recurring|one-off> <id>",
        "  override <recurring-id> <date> <amount>   replace one occurrence's amount",
        "  clear-override <recurring-id> <date>",
        "  backups                                   list saved backups, newest first",
        "  restore <backup>",
        "  version",
        "  help",
    ]
    .join("\n")
}

pub fn dispatch(context: &mut CliContext, args: &[String]) -> Result<LoopControl, CliError> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let (json, rest) = split_json_flag(rest);

    match command.as_str() {
        "cycle" => {
            let ledger = context.storage.load()?;
            let cycle = SummaryService::cycle_for_input(
                &ledger,
                optional(&rest, 0),
                context.clock.as_ref(),
            )?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cycle).map_err(to_core)?);
            } else {
                println!("{}", output::render_cycle(&cycle, context.symbol()));
            }
        }
        "monthly" => {
            let ledger = context.storage.load()?;
            let overview = SummaryService::monthly_overview_for_input(
                &ledger,
                optional(&rest, 0),
                context.clock.as_ref(),
            )?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&overview).map_err(to_core)?
                );
            } else {
                println!("{}", output::render_overview(&overview, context.symbol()));
            }
        }
        "list" => {
            let ledger = context.storage.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ledger).map_err(to_core)?);
            } else {
                println!("{}", output::render_ledger(&ledger, context.symbol()));
            }
        }
        "add-recurring" | "add-one-off" => {
            let [name, amount, date] = expect_args::<3>(command, &rest)?;
            let draft = build_draft(command == "add-recurring", name, amount, date)?;
            let mut ledger = context.storage.load()?;
            let id = EntryService::add(&mut ledger, draft)?;
            context.storage.save(&ledger)?;
            println!("Added {id}");
        }
        "update" => {
            let [id, kind, name, amount, date] = expect_args::<5>(command, &rest)?;
            let kind = parse_kind(kind)?;
            let draft = build_draft(kind == EntryKind::Recurring, name, amount, date)?;
            let mut ledger = context.storage.load()?;
            EntryService::update(&mut ledger, id, draft)?;
            context.storage.save(&ledger)?;
            println!("Updated {id}");
        }
        "delete" => {
            let [kind, id] = expect_args::<2>(command, &rest)?;
            let kind = parse_kind(kind)?;
            let mut ledger = context.storage.load()?;
            EntryService::delete(&mut ledger, kind, id)?;
            context.storage.save(&ledger)?;
            println!("Deleted {id}");
        }
        "override" => {
            let [item_id, date, amount] = expect_args::<3>(command, &rest)?;
            let amount = parse_amount(amount)?;
            let mut ledger = context.storage.load()?;
            let id = EntryService::upsert_override(&mut ledger, item_id, date, amount)?;
            context.storage.save(&ledger)?;
            println!("Override {id} set for {item_id} on {date}");
        }
        "clear-override" => {
            let [item_id, date] = expect_args::<2>(command, &rest)?;
            let mut ledger = context.storage.load()?;
            if EntryService::remove_override(&mut ledger, item_id, date)? {
                context.storage.save(&ledger)?;
                println!("Override cleared for {item_id} on {date}");
            } else {
                println!("No override for {item_id} on {date}");
            }
        }
        "backups" => {
            let backups = context.storage.list_backups()?;
            if backups.is_empty() {
                println!("No backups yet.");
            }
            for name in backups {
                println!("{name}");
            }
        }
        "restore" => {
            let [name] = expect_args::<1>(command, &rest)?;
            let ledger = context.storage.restore(name)?;
            println!(
                "Restored {name}: {} recurring, {} one-off, {} overrides",
                ledger.recurring.len(),
                ledger.one_offs.len(),
                ledger.overrides.len()
            );
        }
        "version" => println!("{}", build_info::current().summary()),
        "help" | "--help" | "-h" => println!("{}", usage()),
        "exit" | "quit" => return Ok(LoopControl::Exit),
        other => {
            return Err(CliError::Command(format!(
                "unknown command `{other}` (try `help`)"
            )))
        }
    }
    Ok(LoopControl::Continue)
}

fn split_json_flag(args: &[String]) -> (bool, Vec<&str>) {
    let json = args.iter().any(|arg| arg == "--json");
    let rest = args
        .iter()
        .filter(|arg| arg.as_str() != "--json")
        .map(String::as_str)
        .collect();
    (json, rest)
}

fn optional<'a>(args: &[&'a str], idx: usize) -> Option<&'a str> {
    args.get(idx).copied()
}

fn expect_args<'a, const N: usize>(
    command: &str,
    args: &[&'a str],
) -> Result<[&'a str; N], CliError> {
    <[&str; N]>::try_from(args).map_err(|_| {
        CliError::Input(format!(
            "`{command}` expects {N} argument(s), got {}",
            args.len()
        ))
    })
}

fn build_draft(
    recurring: bool,
    name: &str,
    amount: &str,
    date: &str,
) -> Result<EntryDraft, CliError> {
    let amount = parse_amount(amount)?;
    Ok(if recurring {
        EntryDraft::Recurring {
            name: name.to_string(),
            amount,
            start_date: date.to_string(),
        }
    } else {
        EntryDraft::OneOff {
            name: name.to_string(),
            amount,
            date: date.to_string(),
        }
    })
}

fn parse_amount(raw: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| CliError::Input(format!("`{raw}` is not an amount")))
}

fn parse_kind(raw: &str) -> Result<EntryKind, CliError> {
    EntryKind::parse(raw)
        .ok_or_else(|| CliError::Input(format!("`{raw}` is not `recurring` or `one-off`")))
}

fn to_core(err: serde_json::Error) -> CliError {
    CliError::Core(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::FixedClock;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> CliContext {
        let clock: Arc<dyn Clock> =
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2025, 1, 25).unwrap()));
        let storage =
            JsonStorage::with_clock(temp.path().join("finance.json"), Some(2), clock.clone())
                .expect("storage");
        CliContext {
            config: Config::default(),
            storage: Box::new(storage),
            clock,
        }
    }

    fn run(context: &mut CliContext, line: &str) -> Result<LoopControl, CliError> {
        let args = shell_words::split(line).expect("split");
        dispatch(context, &args)
    }

    #[test]
    fn add_commands_persist_items() {
        let temp = TempDir::new().expect("temp dir");
        let mut ctx = context(&temp);
        run(&mut ctx, "add-recurring \"Rent\" -1000 2025-01-01").expect("add recurring");
        run(&mut ctx, "add-one-off Bonus 500 2025-02-10").expect("add one-off");

        let ledger = ctx.storage.load().expect("load");
        assert_eq!(ledger.recurring.len(), 1);
        assert_eq!(ledger.one_offs.len(), 1);
        run(&mut ctx, "cycle --json").expect("cycle");
    }

    #[test]
    fn wrong_arity_is_input_error() {
        let temp = TempDir::new().expect("temp dir");
        let mut ctx = context(&temp);
        let err = run(&mut ctx, "add-one-off Bonus").err().expect("arity");
        assert!(matches!(err, CliError::Input(_)));
        let err = run(&mut ctx, "add-one-off Bonus lots 2025-01-01")
            .err()
            .expect("amount");
        assert!(matches!(err, CliError::Input(_)));
    }

    #[test]
    fn unknown_command_and_exit() {
        let temp = TempDir::new().expect("temp dir");
        let mut ctx = context(&temp);
        assert!(matches!(run(&mut ctx, "frobnicate"), Err(CliError::Command(_))));
        assert!(matches!(run(&mut ctx, "exit"), Ok(LoopControl::Exit)));
    }

    #[test]
    fn bad_cycle_date_surfaces_validation() {
        let temp = TempDir::new().expect("temp dir");
        let mut ctx = context(&temp);
        let err = run(&mut ctx, "cycle 2025-13-01").err().expect("bad date");
        assert!(matches!(err, CliError::Core(ref inner) if inner.is_validation()));
    }
}
