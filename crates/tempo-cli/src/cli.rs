use clap::{Parser, Subcommand, ValueEnum};
use tempo_core::models::{HabitLogStatus, RepeatType, TaskPriority, TaskStatus};

/// A fast personal productivity CLI: tasks, recurring occurrences, tags, and habits
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks
    List(ListCommand),
    /// Show the agenda for a day, week, or month
    Agenda(AgendaCommand),
    /// Mark a task occurrence as completed
    Done(DoneCommand),
    /// Reopen a completed task occurrence
    Reopen(ReopenCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Manage tags
    Tag(TagCommand),
    /// Manage habits
    Habit(HabitCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The description of the task
    #[clap(short, long)]
    pub description: Option<String>,
    /// The due date of the task (e.g., '2024-03-10', 'tomorrow', 'next friday')
    #[clap(long)]
    pub due: Option<String>,
    /// Time of day for the task (e.g., '9:00 AM', '14:30')
    #[clap(long)]
    pub at: Option<String>,
    /// Tag to attach to the task
    #[clap(short, long)]
    pub tag: Option<String>,
    /// The priority of the task
    #[clap(long, value_enum)]
    pub priority: Option<PriorityArg>,
    /// Repeat cadence (daily, weekly, monthly)
    #[clap(long, value_enum)]
    pub every: Option<CadenceArg>,
    /// Cadence multiplier, e.g. 2 with --every daily means every other day
    #[clap(long, requires = "every")]
    pub interval: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Only show tasks with this status
    #[clap(long, value_enum)]
    pub status: Option<StatusArg>,
    /// Only show tasks with this tag
    #[clap(long)]
    pub tag: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct AgendaCommand {
    /// Date anchoring the agenda (e.g., 'today', '2024-03-10')
    #[clap(default_value = "today")]
    pub date: String,
    /// Show the week containing the date
    #[clap(long, conflicts_with = "month")]
    pub week: bool,
    /// Show the month containing the date
    #[clap(long)]
    pub month: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task (short hex prefix accepted)
    pub id: String,
    /// Which occurrence date to mark, defaults to today (recurring tasks)
    #[clap(long)]
    pub on: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ReopenCommand {
    /// The ID of the task (short hex prefix accepted)
    pub id: String,
    /// Which occurrence date to reopen, defaults to today (recurring tasks)
    #[clap(long)]
    pub on: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,

    #[arg(long)]
    pub due: Option<String>,
    #[arg(long, conflicts_with = "due")]
    pub due_clear: bool,

    #[arg(long)]
    pub at: Option<String>,
    #[arg(long, conflicts_with = "at")]
    pub at_clear: bool,

    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,

    #[arg(long)]
    pub tag: Option<String>,
    #[arg(long, conflicts_with = "tag")]
    pub tag_clear: bool,

    /// Change the repeat cadence
    #[arg(long, value_enum)]
    pub every: Option<CadenceArg>,
    /// Remove recurrence (convert to a one-time task)
    #[arg(long, conflicts_with = "every")]
    pub every_clear: bool,

    #[arg(long)]
    pub interval: Option<i64>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TagCommand {
    #[command(subcommand)]
    pub command: TagSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TagSubcommand {
    /// Add a new tag
    Add(AddTagCommand),
    /// List tags
    List,
    /// Delete a tag
    Delete(DeleteTagCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddTagCommand {
    /// The name of the tag
    pub name: String,
    /// Display color as a hex string
    #[arg(long, default_value = "#6b7280")]
    pub color: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteTagCommand {
    /// The name of the tag to delete
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct HabitCommand {
    #[command(subcommand)]
    pub command: HabitSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum HabitSubcommand {
    /// Add a new habit
    Add(AddHabitCommand),
    /// List habits
    List(ListHabitsCommand),
    /// Log today's (or a given day's) outcome for a habit
    Log(LogHabitCommand),
    /// Pause a habit
    Pause(HabitNameCommand),
    /// Resume a paused habit
    Resume(HabitNameCommand),
    /// Delete a habit and its logs
    Delete(DeleteHabitCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddHabitCommand {
    /// The name of the habit
    pub name: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// How often the habit repeats
    #[arg(long, value_enum, default_value_t = CadenceArg::Daily)]
    pub every: CadenceArg,
    /// Days of week for weekly habits (e.g., 'mon,wed,fri')
    #[arg(long)]
    pub on: Option<String>,
    /// Preferred time of day (e.g., '7:30', '9:00 PM')
    #[arg(long)]
    pub at: Option<String>,
    /// Tag to attach to the habit
    #[arg(short, long)]
    pub tag: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListHabitsCommand {
    /// Include paused habits
    #[arg(long)]
    pub all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LogHabitCommand {
    /// The name of the habit
    pub name: String,
    /// Outcome to record
    #[arg(long, value_enum, default_value_t = HabitLogArg::Completed)]
    pub status: HabitLogArg,
    /// Which day to log, defaults to today
    #[arg(long)]
    pub on: Option<String>,
    /// Free-form note attached to the entry
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct HabitNameCommand {
    /// The name of the habit
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteHabitCommand {
    /// The name of the habit to delete
    pub name: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

/// Task priority accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for TaskPriority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => TaskPriority::Low,
            PriorityArg::Medium => TaskPriority::Medium,
            PriorityArg::High => TaskPriority::High,
        }
    }
}

/// Task status accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Pending,
    Completed,
    Cancelled,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => TaskStatus::Pending,
            StatusArg::Completed => TaskStatus::Completed,
            StatusArg::Cancelled => TaskStatus::Cancelled,
        }
    }
}

/// Repeat cadence accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceArg {
    /// Every day
    Daily,
    /// Every week (same day)
    Weekly,
    /// Every month (same date)
    Monthly,
}

impl From<CadenceArg> for RepeatType {
    fn from(arg: CadenceArg) -> Self {
        match arg {
            CadenceArg::Daily => RepeatType::Daily,
            CadenceArg::Weekly => RepeatType::Weekly,
            CadenceArg::Monthly => RepeatType::Monthly,
        }
    }
}

impl std::fmt::Display for CadenceArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CadenceArg::Daily => write!(f, "daily"),
            CadenceArg::Weekly => write!(f, "weekly"),
            CadenceArg::Monthly => write!(f, "monthly"),
        }
    }
}

/// Habit log outcome accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitLogArg {
    Completed,
    Skipped,
    Failed,
}

impl From<HabitLogArg> for HabitLogStatus {
    fn from(arg: HabitLogArg) -> Self {
        match arg {
            HabitLogArg::Completed => HabitLogStatus::Completed,
            HabitLogArg::Skipped => HabitLogStatus::Skipped,
            HabitLogArg::Failed => HabitLogStatus::Failed,
        }
    }
}

impl std::fmt::Display for HabitLogArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HabitLogArg::Completed => write!(f, "completed"),
            HabitLogArg::Skipped => write!(f, "skipped"),
            HabitLogArg::Failed => write!(f, "failed"),
        }
    }
}
