use anyhow::Result;
use clap::{Parser, Subcommand};
use plumb::areas::repository::Repository;
use plumb::artifacts::objects::object_type::ObjectType;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "plumb",
    version,
    about = "A content-addressable object store speaking the git on-disk format",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(short, long, help = "Log debug output to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the metadata directory in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Compute an object id and optionally store the object",
        long_about = "This command hashes a file as an object of the given type. \
        With -w the object is also written to the object store."
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object store")]
        write: bool,
        #[arg(short = 't', long = "type", default_value = "blob", help = "The object type")]
        object_type: ObjectType,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "cat-file", about = "Print the payload of an object")]
    CatFile {
        #[arg(index = 1, help = "The expected object type")]
        object_type: ObjectType,
        #[arg(index = 2, help = "The object name")]
        object: String,
    },
    #[command(name = "ls-tree", about = "List the contents of a tree")]
    LsTree {
        #[arg(short, long, help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1, help = "A tree, or a commit or tag leading to one")]
        tree: String,
    },
    #[command(name = "write-tree", about = "Store the index as trees and print the root id")]
    WriteTree,
    #[command(name = "rev-parse", about = "Resolve a name to a single object id")]
    RevParse {
        #[arg(short = 't', long = "type", help = "Peel the object to this type")]
        object_type: Option<ObjectType>,
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "ls-files", about = "List the staged files")]
    LsFiles {
        #[arg(short, long, help = "Show every recorded field of each entry")]
        verbose: bool,
    },
    #[command(name = "show-ref", about = "List references and the ids they point at")]
    ShowRef,
    #[command(name = "check-ignore", about = "Print the paths excluded by ignore rules")]
    CheckIgnore {
        #[arg(index = 1, required = true)]
        paths: Vec<String>,
    },
    #[command(name = "add", about = "Stage files for the next commit")]
    Add {
        #[arg(index = 1, required = true)]
        paths: Vec<String>,
    },
    #[command(name = "rm", about = "Unstage files and remove them from the working tree")]
    Rm {
        #[arg(long, help = "Only remove the paths from the index")]
        cached: bool,
        #[arg(index = 1, required = true)]
        paths: Vec<String>,
    },
    #[command(
        name = "status",
        about = "Show staged, unstaged and untracked changes",
        long_about = "This command compares the tree of HEAD with the index, \
        and the index with the working tree. Files that are neither staged \
        nor ignored are listed as untracked."
    )]
    Status,
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the index as a commit on top of HEAD \
        and advances the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Print commit ancestry as a Graphviz digraph")]
    Log {
        #[arg(index = 1, default_value = "HEAD")]
        commit: String,
    },
    #[command(
        name = "checkout",
        about = "Write the tree of a commit into an empty directory"
    )]
    Checkout {
        #[arg(index = 1)]
        commit: String,
        #[arg(index = 2)]
        directory: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init { path } => {
            let path = path.as_deref().map_or_else(|| pwd.clone(), |path| pwd.join(path));
            Repository::new(&path, Box::new(std::io::stdout()))?.init()?
        }
        Commands::HashObject {
            write,
            object_type,
            file,
        } => {
            // hashing without -w works outside of a repository
            let repository = match Repository::discover(&pwd, Box::new(std::io::stdout())) {
                Ok(repository) => repository,
                Err(_) => Repository::new(&pwd, Box::new(std::io::stdout()))?,
            };
            repository.hash_object(&pwd.join(file), *object_type, *write)?
        }
        Commands::CatFile {
            object_type,
            object,
        } => open(&pwd)?.cat_file(*object_type, object)?,
        Commands::LsTree { recursive, tree } => open(&pwd)?.ls_tree(tree, *recursive)?,
        Commands::WriteTree => open(&pwd)?.write_tree()?,
        Commands::RevParse { object_type, name } => open(&pwd)?.rev_parse(name, *object_type)?,
        Commands::LsFiles { verbose } => open(&pwd)?.ls_files(*verbose)?,
        Commands::ShowRef => open(&pwd)?.show_ref()?,
        Commands::CheckIgnore { paths } => open(&pwd)?.check_ignore(&pwd, paths)?,
        Commands::Add { paths } => open(&pwd)?.add(&pwd, paths)?,
        Commands::Rm { cached, paths } => open(&pwd)?.rm(&pwd, paths, *cached)?,
        Commands::Status => open(&pwd)?.status()?,
        Commands::Commit { message } => open(&pwd)?.commit(message)?,
        Commands::Log { commit } => open(&pwd)?.log(commit)?,
        Commands::Checkout { commit, directory } => {
            open(&pwd)?.checkout(commit, &pwd.join(directory))?
        }
    }

    Ok(())
}

fn open(pwd: &Path) -> Result<Repository> {
    Ok(Repository::discover(pwd, Box::new(std::io::stdout()))?)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("plumb=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plumb=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
