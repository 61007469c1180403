//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "labsql")]
#[command(about = "Load exam rooms and students into SQLite and query them", long_about = None)]
pub(crate) struct Cli {
    /// Database file (defaults to the saved setting, then db/lab1.db)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// How CSV input is read.
#[derive(Args, Clone)]
pub(crate) struct CsvArgs {
    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Treat the first row as data instead of a header
    #[arg(long)]
    pub no_header: bool,

    /// Text encoding of the room CSV (any WHATWG label, e.g. gbk)
    #[arg(long, default_value = "gbk")]
    pub rooms_encoding: String,

    /// Text encoding of the student CSV
    #[arg(long, default_value = "utf-8")]
    pub students_encoding: String,
}

/// Output options shared by query commands.
#[derive(Args, Clone)]
pub(crate) struct OutputArgs {
    /// Only return these columns (e.g., id,name,seat)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create tables and load room and student CSV files
    Import {
        /// Room CSV (kdno, kcno, ccno, kdname, exptime, papername)
        #[arg(long, default_value = "data/room.csv")]
        rooms: PathBuf,

        /// Student CSV (registno, name, kdno, kcno, ccno, seat)
        #[arg(long, default_value = "data/student.csv")]
        students: PathBuf,

        #[command(flatten)]
        csv: CsvArgs,
    },

    /// Select rows equal to the given field values
    Query {
        #[command(subcommand)]
        table: QueryTable,
    },

    /// Print the generated CREATE TABLE statements
    Schema,

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum QueryTable {
    /// Query exam rooms
    Room {
        #[arg(long)]
        kdno: Option<String>,
        #[arg(long)]
        kcno: Option<String>,
        #[arg(long)]
        ccno: Option<String>,
        #[arg(long)]
        kdname: Option<String>,
        /// Exam time, e.g. "2004-06-10 13:40"
        #[arg(long)]
        exptime: Option<String>,
        #[arg(long)]
        papername: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Query students
    Student {
        #[arg(long)]
        registno: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        kdno: Option<String>,
        #[arg(long)]
        kcno: Option<String>,
        #[arg(long)]
        ccno: Option<String>,
        #[arg(long)]
        seat: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the current settings
    Show,

    /// Print the settings file path
    Path,

    /// Save the default database path
    SetDatabase {
        /// Database file to use when --database is not given
        path: PathBuf,
    },

    /// Forget the saved database path
    ClearDatabase,
}
