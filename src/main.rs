use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use satsu::{
    DEFAULT_ENTRY,
    error::{Diagnostic, ImportError, Span},
    interpreter::{
        analyzer::analyze,
        evaluator::{HostTable, execute},
        lexer::lex,
        module::{FileSystem, Module, ModuleSet, SourceLoader},
        parser::parse,
    },
};
use simple_logger::SimpleLogger;

/// Pipeline stage to stop after.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Target {
    /// Print the tokens of the root file.
    Lex,
    /// Print the syntax tree of the root file.
    Parse,
    /// Print the resolved module set.
    Import,
    /// Type-check the program and report success.
    Sema,
    /// Run the program.
    Exec,
}

/// satsu is a small statically typed scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The root source file.
    file: PathBuf,

    /// Directory searched for imported modules. May be given several times;
    /// directories are searched in the order given.
    #[arg(short = 'm', long = "module-path", value_name = "DIR")]
    module_paths: Vec<PathBuf>,

    /// Stage to stop after.
    #[arg(short, long, value_enum, default_value_t = Target::Exec)]
    target: Target,

    /// Name of the function to start at.
    #[arg(short, long, default_value = DEFAULT_ENTRY)]
    entry: String,

    /// Log pipeline progress.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = SimpleLogger::new().with_level(level).without_timestamps().init() {
        eprintln!("failed to set up logging: {e}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprint!("{message}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the pipeline up to the requested stage.
///
/// # Returns
/// The rendered diagnostic on failure.
fn run(args: &Args) -> Result<(), String> {
    let name = args.file.display().to_string();
    let source = FileSystem.load(&args.file).map_err(|e| {
                                                let error = ImportError::Unreadable { path:   name.clone(),
                                                                                      reason: e.to_string(), };
                                                format!("{}\n", Diagnostic::new(Span::default(), error))
                                            })?;
    let render = |diagnostic: &Diagnostic| diagnostic.render(&name, &source);

    if args.target == Target::Lex {
        let tokens = lex(&source).map_err(|e| render(&e))?;
        print!("{}", tokens.dump());
        return Ok(());
    }
    if args.target == Target::Parse {
        let tokens = lex(&source).map_err(|e| render(&e))?;
        let ast = parse(&tokens).map_err(|e| render(&e))?;
        print!("{}", ast.dump(&tokens));
        return Ok(());
    }

    let file_id = FileSystem.identify(&args.file).unwrap_or_default();
    let root = Module::build(name.clone(), file_id, source.clone()).map_err(|e| render(&e))?;
    let mut modules = ModuleSet::new(root);
    modules.resolve_with(&args.module_paths, &FileSystem)
           .map_err(|e| modules.render(&e))?;
    let render = |diagnostic: &Diagnostic| modules.render(diagnostic);

    match args.target {
        Target::Import => {
            print!("{}", modules.dump());
            Ok(())
        },
        Target::Sema => {
            analyze(&modules).map_err(|e| render(&e))?;
            println!("{name}: ok");
            Ok(())
        },
        _ => {
            analyze(&modules).map_err(|e| render(&e))?;
            execute(&modules, &HostTable::base(), &args.entry).map_err(|e| render(&e))
        },
    }
}
