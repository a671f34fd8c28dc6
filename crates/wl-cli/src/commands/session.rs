//! Session command: edit a day one command per line.
//!
//! The session holds the UI context the engine deliberately knows nothing
//! about (the selected status). All form validation happens here, before an
//! engine mutation is called: times must be `HH:MM`, types must come from
//! the catalog, and new or edited statuses must end after they start.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use wl_core::catalog;
use wl_core::time::normalize_time;
use wl_core::{Engine, EntryId, EntryPatch, Outcome, minutes_to_time, parse_time};

use crate::Config;
use crate::render::{format_day, format_stats, format_table, format_types};

const HELP: &str = "\
Commands:
  add [type] [start] [end]         add a status (defaults follow the last one)
  edit [id] <field>=<value>...     change type, start or end of a status
  split [id] <time>                split a status in two at <time>
  delete [id]                      remove a status
  select [id]                      select a status (no id clears)
  sort                             re-sort statuses by start time
  draft                            show the proposed next status
  show | list | stats | types      render the day
  help                             show this help
  quit                             end the session
";

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One editing session over an in-memory day.
pub struct Session<'a> {
    engine: Engine,
    selected: Option<EntryId>,
    config: &'a Config,
}

impl<'a> Session<'a> {
    pub fn new(engine: Engine, config: &'a Config) -> Self {
        Self {
            engine,
            selected: None,
            config,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn selected(&self) -> Option<EntryId> {
        self.selected
    }

    /// Runs one command line.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = tokens.collect();
        tracing::debug!(command, ?args, "session command");

        match command {
            "add" => self.add(&args, out)?,
            "edit" => self.edit(&args, out)?,
            "split" => self.split(&args, out)?,
            "delete" | "del" | "rm" => self.delete(&args, out)?,
            "select" => self.select(&args, out)?,
            "sort" => {
                self.engine.sort_by_start();
                writeln!(out, "Sorted {} statuses", self.engine.len())?;
            }
            "draft" => {
                let draft = self.engine.next_entry_defaults();
                writeln!(out, "Next: {} {}-{}", draft.type_id, draft.start, draft.end)?;
            }
            "show" => write!(out, "{}", format_day(&self.engine, self.config))?,
            "list" => write!(out, "{}", format_table(self.engine.entries()))?,
            "stats" => write!(out, "{}", format_stats(&self.engine.aggregates()))?,
            "types" => write!(out, "{}", format_types())?,
            "help" => write!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => bail!("unknown command '{other}' (try 'help')"),
        }

        Ok(Flow::Continue)
    }

    fn add<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        if args.len() > 3 {
            bail!("usage: add [type] [start] [end]");
        }
        let draft = self.engine.next_entry_defaults();

        let type_id = match args.first() {
            Some(type_id) => checked_type(type_id)?,
            None => draft.type_id,
        };
        let start = match args.get(1) {
            Some(start) => normalize_time(start)?,
            None => draft.start,
        };
        let end = match (args.get(2), args.get(1)) {
            (Some(end), _) => normalize_time(end)?,
            // Explicit start without end: keep the default half hour.
            (None, Some(_)) => minutes_to_time(parse_time(&start)? + 30),
            (None, None) => draft.end,
        };
        check_order(&start, &end)?;

        let name = catalog::resolve_type(&type_id).name;
        let id = self.engine.create(type_id, start.clone(), end.clone());
        writeln!(out, "Added status {id}: {start}-{end} {name}")?;
        Ok(())
    }

    fn edit<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        let (id, fields) = match args.split_first() {
            Some((first, rest)) if !first.contains('=') => (parse_id(first)?, rest),
            _ => (self.require_selection()?, args),
        };

        let mut patch = EntryPatch::default();
        for field in fields {
            let Some((key, value)) = field.split_once('=') else {
                bail!("expected key=value, got '{field}'");
            };
            match key {
                "type" => patch.type_id = Some(checked_type(value)?),
                "start" => patch.start = Some(normalize_time(value)?),
                "end" => patch.end = Some(normalize_time(value)?),
                other => bail!("unknown field '{other}' (use type, start or end)"),
            }
        }
        if patch.is_empty() {
            bail!("nothing to edit; use type=, start= or end=");
        }

        if let Some(current) = self.engine.get(id) {
            let start = patch.start.as_deref().unwrap_or(&current.start);
            let end = patch.end.as_deref().unwrap_or(&current.end);
            check_order(start, end)?;
        }

        if self.engine.edit(id, patch) == Outcome::Applied {
            writeln!(out, "Updated status {id}")?;
        }
        Ok(())
    }

    fn split<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        let (id, time) = match args {
            [time] => (self.require_selection()?, *time),
            [id, time] => (parse_id(id)?, *time),
            _ => bail!("usage: split [id] <time>"),
        };
        let time = normalize_time(time)?;

        let new_id = self.engine.split(id, &time)?;
        writeln!(out, "Split status {id} at {time}; new status {new_id}")?;
        Ok(())
    }

    fn delete<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        let id = match args {
            [] => self.require_selection()?,
            [id] => parse_id(id)?,
            _ => bail!("usage: delete [id]"),
        };

        if self.engine.delete(id) == Outcome::Applied {
            if self.selected == Some(id) {
                self.selected = None;
            }
            writeln!(out, "Deleted status {id}")?;
        }
        Ok(())
    }

    fn select<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        match args {
            [] => {
                self.selected = None;
                writeln!(out, "Selection cleared")?;
            }
            [id] => {
                let id = parse_id(id)?;
                let Some(entry) = self.engine.get(id) else {
                    bail!("status {id} not found");
                };
                writeln!(out, "{}", entry.describe())?;
                self.selected = Some(id);
            }
            _ => bail!("usage: select [id]"),
        }
        Ok(())
    }

    fn require_selection(&self) -> Result<EntryId> {
        self.selected
            .context("no status selected; pass an id or run 'select <id>'")
    }
}

fn parse_id(value: &str) -> Result<EntryId> {
    value
        .parse()
        .with_context(|| format!("invalid status id '{value}'"))
}

fn checked_type(type_id: &str) -> Result<String> {
    if catalog::all_types().iter().any(|t| t.id == type_id) {
        Ok(type_id.to_string())
    } else {
        bail!("unknown status type '{type_id}' (run 'types' to list them)")
    }
}

fn check_order(start: &str, end: &str) -> Result<()> {
    if parse_time(end)? <= parse_time(start)? {
        bail!("end time {end} must be after start time {start}");
    }
    Ok(())
}

/// Runs a session, reading commands until EOF or `quit`.
///
/// Command errors are reported on the output and the session continues.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    config: &Config,
    engine: Engine,
) -> Result<()> {
    let mut session = Session::new(engine, config);

    for line in reader.lines() {
        let line = line.context("failed to read command")?;
        match session.execute(&line, writer) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => {
                tracing::debug!(%err, "command failed");
                writeln!(writer, "error: {err:#}")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use insta::assert_snapshot;

    fn config() -> Config {
        Config {
            employee: "Vít Geisselreiter".to_string(),
            day: NaiveDate::from_ymd_opt(2025, 5, 13).unwrap(),
            timeline_width: 20,
            start_with_sample: false,
        }
    }

    fn run_script(engine: Engine, script: &str) -> String {
        let config = config();
        let mut output = Vec::new();
        run(script.as_bytes(), &mut output, &config, engine).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn add_uses_defaults_and_sorts() {
        let output = run_script(
            Engine::new(),
            "add\nadd lekar 06:00 07:00\nadd prestavka 08:30\nlist\n",
        );
        assert_snapshot!(output, @r"
        Added status 1: 08:00-08:30 Práce (Příchod)
        Added status 2: 06:00-07:00 Lékař
        Added status 3: 08:30-09:00 Přestávka
        ID   Status                      Start  End    Duration  Category
        ───  ──────────────────────────  ─────  ─────  ────────  ────────
        2    Lékař                       06:00  07:00  1 hod     non_work
        1    Práce (Příchod)             08:00  08:30  30 min    work
        3    Přestávka                   08:30  09:00  30 min    non_work
        ");
    }

    #[test]
    fn add_rejects_bad_input() {
        let output = run_script(
            Engine::new(),
            "add bogus\nadd prace 9am\nadd prace 10:00 09:00\n",
        );
        assert_snapshot!(output, @r"
        error: unknown status type 'bogus' (run 'types' to list them)
        error: invalid time '9am', expected HH:MM between 00:00 and 23:59
        error: end time 09:00 must be after start time 10:00
        ");
    }

    #[test]
    fn split_selected_status() {
        let output = run_script(
            Engine::sample_day(),
            "select 1\nsplit 05:40\nsplit 05:33\nsplit 1 06:00\n",
        );
        assert_snapshot!(output, @r"
        ⚙️ Příprava na práci
        05:33 - 05:50
        Trvání: 17 min
        Split status 1 at 05:40; new status 11
        error: split time 05:33 must fall strictly between 05:33 and 05:40
        error: split time 06:00 must fall strictly between 05:33 and 05:40
        ");
    }

    #[test]
    fn split_keeps_engine_order_quirk() {
        let config = config();
        let mut session = Session::new(Engine::sample_day(), &config);
        let mut sink = Vec::new();
        session.execute("split 2 06:00", &mut sink).unwrap();

        let last = session.engine().entries().last().unwrap();
        assert_eq!((last.start.as_str(), last.end.as_str()), ("06:00", "06:20"));

        session.execute("sort", &mut sink).unwrap();
        assert_eq!(session.engine().entries()[2].start, "06:00");
    }

    #[test]
    fn edit_and_delete_missing_ids_are_silent() {
        let output = run_script(Engine::sample_day(), "edit 99 type=lekar\ndelete 99\nstats\n");
        assert_snapshot!(output, @r"
        Total time:    9h 57m
        Work time:     9h 27m
        Statuses:      10
        First status:  05:33
        Last status:   15:30
        ");
    }

    #[test]
    fn edit_without_sort_changes_list_order_span() {
        let output = run_script(
            Engine::sample_day(),
            "edit 10 start=05:00 end=05:30\nstats\n",
        );
        assert_snapshot!(output, @r"
        Updated status 10
        Total time:    -3 min
        Work time:     9h 12m
        Statuses:      10
        First status:  05:33
        Last status:   05:30
        ");
    }

    #[test]
    fn edit_uses_selection_and_validates_order() {
        let config = config();
        let mut session = Session::new(Engine::sample_day(), &config);
        let mut sink = Vec::new();

        let err = session.execute("edit type=lekar", &mut sink).unwrap_err();
        assert!(err.to_string().contains("no status selected"));

        session.execute("select 6", &mut sink).unwrap();
        session.execute("edit type=lekar", &mut sink).unwrap();
        assert_eq!(session.engine().get(EntryId::new(6)).unwrap().type_id, "lekar");

        let err = session.execute("edit end=10:00", &mut sink).unwrap_err();
        assert_eq!(err.to_string(), "end time 10:00 must be after start time 10:30");
    }

    #[test]
    fn delete_clears_selection() {
        let config = config();
        let mut session = Session::new(Engine::sample_day(), &config);
        let mut sink = Vec::new();

        session.execute("select 4", &mut sink).unwrap();
        assert_eq!(session.selected(), Some(EntryId::new(4)));
        session.execute("delete", &mut sink).unwrap();
        assert_eq!(session.selected(), None);
        assert_eq!(session.engine().len(), 9);
    }

    #[test]
    fn quit_stops_reading() {
        let output = run_script(Engine::new(), "# a comment\n\nquit\nadd\n");
        assert!(output.is_empty());
    }

    #[test]
    fn unknown_command_reports_error() {
        let output = run_script(Engine::new(), "merge 1 2\n");
        assert_eq!(output, "error: unknown command 'merge' (try 'help')\n");
    }

    #[test]
    fn draft_follows_last_status() {
        let output = run_script(Engine::sample_day(), "draft\n");
        assert_eq!(output, "Next: prace 15:30-16:00\n");
    }
}
