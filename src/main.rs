use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use tasklist::{
    is_empty_state, is_overdue, visible_tasks, CreateError, FileStorage, Priority, Tab, Task,
    TaskStore,
};

#[derive(Parser)]
#[command(name = "tasklist", about = "A small persistent task list")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a task
    Add {
        text: String,
        /// Low, Medium or High
        #[arg(long, default_value = "Low")]
        priority: Priority,
        /// Due date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        due: Option<String>,
    },
    /// Show one tab of the list
    List {
        #[arg(long, value_enum, default_value_t = TabArg::Pending)]
        tab: TabArg,
    },
    /// Mark a task as done
    Done { id: i64 },
    /// Mark a task as pending again
    Undone { id: i64 },
    /// Delete a task
    Rm { id: i64 },
    /// Delete every task
    Clear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TabArg {
    Pending,
    Done,
}

impl From<TabArg> for Tab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Pending => Tab::Pending,
            TabArg::Done => Tab::Done,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut store = TaskStore::load(FileStorage::open_default()?);

    match cli.command {
        Command::Add {
            text,
            priority,
            due,
        } => match store.create(&text, priority, due.as_deref()) {
            Ok(task) => println!("Added [#{}] {}", task.id, task.text),
            Err(CreateError::EmptyText) => println!("Nothing to add: task text is empty"),
        },
        Command::List { tab } => render(store.all(), tab.into()),
        Command::Done { id } => store.toggle_done(id, true),
        Command::Undone { id } => store.toggle_done(id, false),
        Command::Rm { id } => store.delete_by_id(id),
        Command::Clear => store.clear_all(),
    }

    Ok(())
}

fn render(tasks: &[Task], tab: Tab) {
    if is_empty_state(tasks, tab) {
        println!("No pending tasks");
        return;
    }
    let now = Local::now();
    for task in visible_tasks(tasks, tab) {
        let mark = if task.done { "x" } else { " " };
        let due = match task.due_date.as_deref() {
            Some(d) => format!(" due {d}"),
            None => String::new(),
        };
        let overdue = if is_overdue(task, now) { " OVERDUE" } else { "" };
        println!(
            "[{mark}] [#{}] {} ({}){due}{overdue}",
            task.id, task.text, task.priority
        );
    }
}
