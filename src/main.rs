use std::path::PathBuf;

use carbon_agenda::config::{AgendaConfig, default_config_path};
use carbon_agenda::core::agenda::{AgendaView, Layout, ViewKind};
use carbon_agenda::core::friends::{dedup_friends, sort_by_activity};
use carbon_agenda::core::routine::Routine;
use carbon_agenda::core::snapshot::load_snapshot;
use carbon_agenda::core::stream::StreamCounts;
use chrono::{Local, NaiveDate, Utc};

struct Args {
    config: Option<PathBuf>,
    view: ViewKind,
    date: Option<NaiveDate>,
    compact: bool,
    debug: bool,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut args = Args {
        config: None,
        view: ViewKind::Days,
        date: None,
        compact: false,
        debug: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--view" => args.view = iter.next().unwrap_or_default().parse()?,
            "--date" => args.date = Some(iter.next().unwrap_or_default().parse()?),
            "--compact" => args.compact = true,
            "--debug" => args.debug = true,
            other => return Err(format!("unknown argument '{other}'").into()),
        }
    }
    Ok(args)
}

// Crate targets at info/debug (per toggle), everything else at warn.
fn install_logger() {
    struct FilteredJournal {
        inner: systemd_journal_logger::JournalLog,
    }

    impl log::Log for FilteredJournal {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            if metadata.target().starts_with("carbon_agenda") {
                let max = if carbon_agenda::debug_logging() {
                    log::LevelFilter::Debug
                } else {
                    log::LevelFilter::Info
                };
                metadata.level() <= max
            } else {
                metadata.level() <= log::LevelFilter::Warn
            }
        }
        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                self.inner.log(record);
            }
        }
        fn flush(&self) {
            self.inner.flush();
        }
    }

    match systemd_journal_logger::JournalLog::new() {
        Ok(journal) => {
            let journal = journal.with_syslog_identifier("carbon-agenda".to_string());
            if log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).is_ok() {
                log::set_max_level(log::LevelFilter::Debug);
            }
        }
        Err(e) => eprintln!("journal unavailable, logging disabled: {e}"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config = AgendaConfig::load(&config_path)?;

    carbon_agenda::set_debug_logging(config.debug_logging || args.debug);
    install_logger();

    let now = Local::now();
    let today = args.date.unwrap_or_else(|| now.date_naive());
    let layout = if args.compact { Layout::Compact } else { config.layout };

    let snapshot = load_snapshot(&config.snapshot_path())?;
    let tasks: Vec<_> = snapshot.tasks.iter().map(|r| r.localize(&Local)).collect();

    let view = AgendaView::new(args.view, layout, today)?;
    println!(
        "=== Agenda ({:?}) {} .. {} ===",
        view.kind,
        view.span.start.date(),
        view.span.end.date()
    );
    let active = view.active_column(now.naive_local());
    for (index, column) in view.project(&tasks).iter().enumerate() {
        let marker = if Some(index) == active { "*" } else { " " };
        println!(
            "{} {} ({} left)",
            marker,
            column.bucket.start.date(),
            column.tasks_left()
        );
        for task in &column.tasks {
            let check = if task.completed { "x" } else { " " };
            let pin = if task.pinned { "!" } else { "" };
            println!("    [{}] {}{}", check, pin, task.name);
        }
    }

    let counts = StreamCounts::tally(&tasks, now.naive_local());
    println!(
        "\nBacklog: {}  Upcoming: {}  Unscheduled: {}  Completed: {}",
        counts.backlog, counts.upcoming, counts.unscheduled, counts.completed
    );

    let routine = Routine::build(&snapshot.goals, today);
    println!("\n--- Routine ---");
    for goal in &routine.remaining {
        println!(
            "  {:02}:00 {} ({}%, {} days left)",
            goal.time_of_day,
            goal.name,
            goal.percent_complete(),
            goal.days_left()
        );
    }
    for goal in &routine.finished {
        println!("  ready for a trophy: {}", goal.name);
    }
    if routine.is_done() {
        println!("  All done for today!");
    }

    let friends = dedup_friends(&snapshot.friends);
    if !friends.is_empty() {
        println!("\n--- Friends ({}) ---", friends.len());
        for friend in sort_by_activity(&snapshot.friend_activity, Utc::now()) {
            println!("  {} (last active {})", friend.name, friend.last_active);
        }
    }

    let quota = config.storage_quota();
    println!(
        "\nStorage: {} of {} credits used",
        quota.used(snapshot.storage),
        quota.limit
    );

    Ok(())
}
