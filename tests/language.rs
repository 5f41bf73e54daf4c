use std::{cell::RefCell, fs, path::Path, rc::Rc};

use satsu::{
    DEFAULT_ENTRY,
    ast::PrimType,
    error::{ErrorKind, ImportError},
    interpreter::{
        evaluator::{HostTable, execute},
        value::Value,
    },
    load_program, run_source,
};
use walkdir::WalkDir;

const PROGRAMS: &str = "tests/programs";
const LIBRARY: &str = "tests/programs/lib";

/// A host whose `print` collects standard output instead of writing it.
fn capturing_host() -> (HostTable, Rc<RefCell<String>>) {
    let output = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&output);

    let mut host = HostTable::new();
    host.register("print", PrimType::Void, &[PrimType::Int, PrimType::String], move |_, args| {
            if args[0].as_int() == 1 {
                sink.borrow_mut().push_str(&args[1].as_str());
            }
            Value::Void
        })
        .unwrap();

    (host, output)
}

fn run_program(path: &Path) -> String {
    let modules =
        load_program(path, &[LIBRARY]).unwrap_or_else(|e| panic!("{} failed to load: {e}", path.display()));
    let (host, output) = capturing_host();

    if let Err(e) = execute(&modules, &host, DEFAULT_ENTRY) {
        panic!("{} failed to start: {e}", path.display());
    }
    output.take()
}

#[test]
fn sample_programs_produce_expected_output() {
    let mut count = 0;

    for entry in WalkDir::new(PROGRAMS).max_depth(1)
                                       .into_iter()
                                       .filter_map(Result::ok)
                                       .filter(|e| e.path().extension().is_some_and(|ext| ext == "ssu"))
    {
        let path = entry.path();
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });

        count += 1;
        assert_eq!(run_program(path), expected, "output of {path:?} differs");
    }

    assert!(count > 0, "No programs found in {PROGRAMS}");
}

#[test]
fn library_modules_check_on_their_own() {
    for entry in WalkDir::new(LIBRARY).into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "ssu"))
    {
        if let Err(e) = load_program(entry.path(), &[LIBRARY]) {
            panic!("{:?} was rejected: {e}", entry.path());
        }
    }
}

fn assert_success(src: &str) {
    let (host, _) = capturing_host();
    if let Err(e) = run_source(src.as_bytes(), &host, DEFAULT_ENTRY) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str, stage: &str) {
    let (host, _) = capturing_host();
    match run_source(src.as_bytes(), &host, DEFAULT_ENTRY) {
        Ok(()) => panic!("Script succeeded but was expected to fail"),
        Err(e) => assert_eq!(e.error.stage(), stage, "unexpected failure: {e}"),
    }
}

#[test]
fn empty_entry_runs() {
    assert_success("func void start() {}");
    assert_success("func void start() { return; }");
    assert_success("// comment only before\nfunc void start() {} // and after");
}

#[test]
fn every_stage_can_fail() {
    assert_failure("func void start() { # }", "lex");
    assert_failure("func void start() { var int x = 1 }", "parse");
    assert_failure("import anything; func void start() {}", "import");
    assert_failure("func void start() { var int x = \"no\"; }", "semantic");
    assert_failure("func void begin() {}", "startup");
}

#[test]
fn first_error_wins() {
    assert_failure("func void start() { x = 1; y = 2; } func void start() {}", "semantic");

    let (host, _) = capturing_host();
    let error = run_source(b"func void start() { a = 1; b = 2; }", &host, DEFAULT_ENTRY).unwrap_err();
    assert_eq!(error.message(), "unknown symbol 'a'");
}

#[test]
fn nothing_runs_when_startup_fails() {
    let (host, output) = capturing_host();
    let source = b"func void helper() { system void print(int, string)(1, \"ran\"); }
                   func int start() { helper(); return 0; }";

    assert!(run_source(source, &host, DEFAULT_ENTRY).is_err());
    assert!(output.borrow().is_empty());
}

#[test]
fn output_to_other_descriptors_is_not_captured() {
    let (host, output) = capturing_host();
    let source = b"func void start() {
                       system void print(int, string)(2, \"err\");
                       system void print(int, string)(1, \"out\");
                   }";

    run_source(source, &host, DEFAULT_ENTRY).unwrap();
    assert_eq!(*output.borrow(), "out");
}

#[test]
fn diagnostics_render_the_offending_line() {
    let source = "func void start() {\n\tvar int x = true;\n}";
    let (host, _) = capturing_host();
    let error = run_source(source.as_bytes(), &host, DEFAULT_ENTRY).unwrap_err();

    assert_eq!(error.render("demo.ssu", source.as_bytes()),
               "demo.ssu:2: semantic error: expected int, found bool\n 2 |   var int x = true;\n   \
                |               ^~~~\n");
}

#[test]
fn missing_root_file_is_reported() {
    let error = load_program("tests/programs/does_not_exist.ssu", &[LIBRARY]).unwrap_err();

    assert!(matches!(error.error, ErrorKind::Import(ImportError::Unreadable { .. })));
}

#[test]
fn imports_need_a_search_path() {
    let error = load_program(Path::new(PROGRAMS).join("fizzbuzz.ssu"), &[] as &[&str]).unwrap_err();

    assert_eq!(error.module, Some(0));
    assert!(matches!(error.error, ErrorKind::Import(ImportError::Unresolved { searched: 0, .. })));
}

#[test]
fn add_and_print() {
    let (host, output) = capturing_host();
    let source = b"func int add(int a, int b) { return a + b; }
                   func void start() {
                       var int r = add(2, 3);
                       system void print(int, string)(1, \"five is \" + string(r));
                   }";

    run_source(source, &host, DEFAULT_ENTRY).unwrap();
    assert_eq!(*output.borrow(), "five is 5");
}

#[test]
fn precedence_in_practice() {
    let (host, output) = capturing_host();
    let source = b"func void start() {
                       var int a = 0;
                       var int b = 0;
                       a = b = 3;
                       system void print(int, string)(1, string(1 + 2 * 3) + \" \" + string(a + b));
                   }";

    run_source(source, &host, DEFAULT_ENTRY).unwrap();
    assert_eq!(*output.borrow(), "7 6");
}

#[test]
fn break_stops_after_three_iterations() {
    let (host, output) = capturing_host();
    let source = b"func void start() {
                       for (var int i = 0; i < 5; i += 1) {
                           if (i == 3) { break; }
                           system void print(int, string)(1, string(i));
                       }
                   }";

    run_source(source, &host, DEFAULT_ENTRY).unwrap();
    assert_eq!(*output.borrow(), "012");
}
