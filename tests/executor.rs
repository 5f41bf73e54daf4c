use std::{cell::RefCell, rc::Rc};

use satsu::{
    DEFAULT_ENTRY,
    ast::PrimType,
    error::{Diagnostic, ErrorKind, HostError, StartupError},
    interpreter::{evaluator::HostTable, value::Value},
    run_source,
};

/// Helpers every test program can call. `show` writes a line to the
/// captured output.
const PRELUDE: &str = "
func void show(string s) { system void emit(string)(s + \"\\n\"); }
func void showi(int n) { show(string(n)); }
func void showr(real r) { show(string(r)); }
func void showb(bool b) { show(string(b)); }
";

fn capture(mut host: HostTable) -> (HostTable, Rc<RefCell<Vec<u8>>>) {
    let output = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&output);
    host.register("emit", PrimType::Void, &[PrimType::String], move |_, args| {
            sink.borrow_mut().extend_from_slice(args[0].as_bytes());
            Value::Void
        })
        .unwrap();
    (host, output)
}

/// Runs a program given as raw bytes and returns the exact bytes it showed.
fn run_raw(host: HostTable, source: &[u8], entry: &str) -> Result<Vec<u8>, Diagnostic> {
    let (host, output) = capture(host);
    let mut program = PRELUDE.as_bytes().to_vec();
    program.extend_from_slice(source);
    run_source(&program, &host, entry)?;
    Ok(output.take())
}

fn run_with(host: HostTable, source: &str, entry: &str) -> Result<String, Diagnostic> {
    let bytes = run_raw(host, source.as_bytes(), entry)?;
    Ok(String::from_utf8(bytes).unwrap_or_else(|e| panic!("output is not UTF-8: {e}")))
}

/// Runs `start` in a program and returns everything it showed.
fn run(source: &str) -> String {
    run_with(HostTable::new(), source, DEFAULT_ENTRY).unwrap_or_else(|e| panic!("run failed: {e}"))
}

/// Runs statements as the body of `start`.
fn run_body(statements: &str) -> String {
    run(&format!("func void start() {{ {statements} }}"))
}

fn startup_error(source: &str, entry: &str) -> StartupError {
    match run_with(HostTable::new(), source, entry) {
        Err(Diagnostic { error: ErrorKind::Startup(error), .. }) => error,
        Err(other) => panic!("expected a startup error, got {other}"),
        Ok(_) => panic!("program started but was expected to fail"),
    }
}

#[test]
fn integer_arithmetic() {
    assert_eq!(run_body("showi(2 + 3 * 4); showi(7 / 2); showi(-7 / 2); showi(-7 % 3); showi(10 - 2 - 3);"),
               "14\n3\n-3\n-1\n5\n");
}

#[test]
fn integer_overflow_wraps() {
    assert_eq!(run_body("var int big = 9223372036854775807; showi(big + 1); showi(big * 2);"),
               "-9223372036854775808\n-2\n");
}

#[test]
fn division_by_zero_yields_zero_and_continues() {
    assert_eq!(run_body("var int zero = 0; showi(5 / zero); showi(5 % zero); show(\"after\");"),
               "0\n0\nafter\n");
}

#[test]
fn real_arithmetic() {
    assert_eq!(run_body("showr(1.5 * 2.0); showr(7.0 / 2.0); showr(-0.25); showr(7.5 % 2.0);"),
               "3.000000\n3.500000\n-0.250000\n1.500000\n");
}

#[test]
fn strings_concatenate_and_compare() {
    assert_eq!(run_body("var string s = \"ab\" + \"cd\"; show(s); showb(\"abc\" < \"abd\"); \
                         showb(s == \"abcd\"); showb(\"b\" <= \"a\");"),
               "abcd\ntrue\ntrue\nfalse\n");
}

#[test]
fn escapes_in_string_literals() {
    assert_eq!(run_body("show(\"a\\tb\\\\c\\\"d\");"), "a\tb\\c\"d\n");
}

#[test]
fn logical_operators_evaluate_both_sides() {
    let source = "func bool touch(string s) { show(s); return true; }
                  func void start() {
                      var bool a = false && touch(\"and\");
                      var bool b = true || touch(\"or\");
                      var bool c = true ^^ touch(\"xor\");
                      showb(a); showb(b); showb(c);
                  }";
    assert_eq!(run(source), "and\nor\nxor\nfalse\ntrue\nfalse\n");
}

#[test]
fn ternary_evaluates_selected_branch_only() {
    let source = "func int pick(int n) { showi(n); return n; }
                  func void start() {
                      var int x = true ? pick(1) : pick(2);
                      var int y = false ? pick(3) : pick(4);
                      showi(x + y);
                  }";
    assert_eq!(run(source), "1\n4\n5\n");
}

#[test]
fn assignment_yields_stored_value() {
    assert_eq!(run_body("var int a = 0; var int b = 0; a = b = 5; showi(a + b);
                         showi(a += 3); a *= 2; showi(a); a -= 1; a /= 3; showi(a); a %= 3; showi(a);"),
               "10\n8\n16\n5\n2\n");
}

#[test]
fn compound_assignment_on_strings_and_reals() {
    assert_eq!(run_body("var string s = \"a\"; s += \"b\"; s += s; show(s);
                         var real r = 1.0; r /= 4.0; showr(r);"),
               "abab\n0.250000\n");
}

#[test]
fn if_else_chains() {
    let source = "func string size(int n) {
                      if (n < 10) return \"small\";
                      else if (n < 100) return \"medium\";
                      else return \"large\";
                  }
                  func void start() { show(size(5)); show(size(50)); show(size(500)); }";
    assert_eq!(run(source), "small\nmedium\nlarge\n");
}

#[test]
fn while_loop_with_break() {
    assert_eq!(run_body("var int i = 0; while (true) { i += 1; if (i > 3) { break; } showi(i); }
                         showi(i);"),
               "1\n2\n3\n4\n");
}

#[test]
fn for_loop_continue_runs_increment() {
    assert_eq!(run_body("for (var int i = 0; i < 6; i += 1) {
                             if (i == 2) { continue; }
                             if (i == 4) { break; }
                             showi(i);
                         }"),
               "0\n1\n3\n");
}

#[test]
fn for_loop_variable_is_scoped_to_the_loop() {
    assert_eq!(run_body("var int total = 0;
                         for (var int i = 1; i <= 4; i += 1) total += i;
                         var int i = 100;
                         showi(total + i);"),
               "110\n");
}

#[test]
fn break_leaves_only_the_inner_loop() {
    assert_eq!(run_body("for (var int i = 0; i < 3; i += 1) {
                             var int j = 0;
                             while (true) { if (j == i) { break; } j += 1; }
                             showi(j);
                         }"),
               "0\n1\n2\n");
}

#[test]
fn return_from_inside_loops() {
    let source = "func int find(int target) {
                      for (var int i = 0; i < 100; i += 1) {
                          while (true) { if (i == target) { return i * 10; } break; }
                      }
                      return -1;
                  }
                  func void start() { showi(find(7)); showi(find(500)); }";
    assert_eq!(run(source), "70\n-1\n");
}

#[test]
fn recursion() {
    let source = "func int fib(int n) { if (n < 2) { return n; } return fib(n - 1) + fib(n - 2); }
                  func int fact(int n) { return n <= 1 ? 1 : n * fact(n - 1); }
                  func void start() { showi(fib(15)); showi(fact(10)); }";
    assert_eq!(run(source), "610\n3628800\n");
}

#[test]
fn arguments_are_passed_by_value() {
    let source = "func void bump(int n) { n += 1; showi(n); }
                  func void start() { var int x = 1; bump(x); showi(x); }";
    assert_eq!(run(source), "2\n1\n");
}

#[test]
fn arguments_are_evaluated_left_to_right() {
    let source = "func int tick(int n) { showi(n); return n; }
                  func int sub(int a, int b) { return a - b; }
                  func void start() { showi(sub(tick(5), tick(3))); }";
    assert_eq!(run(source), "5\n3\n2\n");
}

#[test]
fn shadowed_local_is_restored() {
    assert_eq!(run_body("var int x = 1; { var int x = 2; x += 1; showi(x); } showi(x);"),
               "3\n1\n");
}

#[test]
fn loop_body_locals_are_fresh_each_iteration() {
    assert_eq!(run_body("for (var int i = 0; i < 3; i += 1) { var int seen = 0; seen += i; showi(seen); }"),
               "0\n1\n2\n");
}

#[test]
fn missing_return_yields_default() {
    let source = "func int number() {}
                  func string text() {}
                  func real fraction() {}
                  func bool flag() {}
                  func void start() { showi(number()); show(text()); showr(fraction()); showb(flag()); }";
    assert_eq!(run(source), "0\n\n0.000000\nfalse\n");
}

#[test]
fn casts() {
    assert_eq!(run_body("showi(int(3.9)); showi(int(-3.9)); show(string(2.5)); showi(int(\"0x1f\"));
                         showi(int(\"  12abc\")); showi(int(\"017\")); showr(real(\"2.5e1x\"));
                         showi(int(true)); showr(real(3)); show(string(false)); showb(bool(0));
                         showb(bool(-2)); showi(int(\"nope\"));"),
               "3\n-3\n2.500000\n31\n12\n15\n25.000000\n1\n3.000000\nfalse\nfalse\ntrue\n0\n");
}

#[test]
fn string_index_and_substring() {
    assert_eq!(run_body("var string s = \"hello\";
                         show(s.(1)); show(s.(1, 3)); show(s.(3, 1)); show(s.(-5, 100));
                         show(s.(2, 2)); show(s.(10)); show(s.(-1));"),
               "e\nel\nel\nhello\n\n\n\n");
}

#[test]
fn access_works_on_bytes() {
    assert_eq!(run_body("var string s = \"\u{e9}!\"; show(s.(0) + s.(1, 2)); show(s.(2)); show(s.(0, 2));"),
               "\u{e9}\n!\n\u{e9}\n");

    let source = b"func void start() { var string s = \"a\xffb\"; show(s.(1)); show(s.(0, 3)); }";
    assert_eq!(run_raw(HostTable::new(), source, DEFAULT_ENTRY).unwrap(),
               b"\xff\na\xffb\n");
}

#[test]
fn missing_entry_is_a_startup_error() {
    assert_eq!(startup_error("func void begin() {}", DEFAULT_ENTRY),
               StartupError::MissingEntry { name: DEFAULT_ENTRY.to_string() });
}

#[test]
fn entry_must_return_void() {
    assert_eq!(startup_error("func int start() { return 1; }", DEFAULT_ENTRY),
               StartupError::EntryReturnsValue { name:  "start".to_string(),
                                                 found: PrimType::Int, });
}

#[test]
fn entry_must_not_take_arguments() {
    assert_eq!(startup_error("func void start(int a, int b) {}", DEFAULT_ENTRY),
               StartupError::EntryTakesArguments { name:  "start".to_string(),
                                                   count: 2, });
}

#[test]
fn custom_entry() {
    let output = run_with(HostTable::new(), "func void main() { show(\"main\"); }", "main").unwrap();
    assert_eq!(output, "main\n");
}

#[test]
fn host_functions_see_caller_locals() {
    let mut host = HostTable::new();
    host.register("set_rc", PrimType::Void, &[], |context, _| {
            context.set_local("__rc", Value::Int(42));
            Value::Void
        })
        .unwrap();

    let source = "func void start() {
                      var int __rc = 0;
                      system void set_rc()();
                      showi(__rc);
                      { var string __rc = \"kept\"; system void set_rc()(); show(__rc); }
                  }";
    assert_eq!(run_with(host, source, DEFAULT_ENTRY).unwrap(), "42\nkept\n");
}

#[test]
fn host_values_flow_back() {
    let mut host = HostTable::new();
    host.register("join", PrimType::String, &[PrimType::String, PrimType::Int], |_, args| {
            Value::from(args[0].as_str().repeat(usize::try_from(args[1].as_int()).unwrap_or(0)))
        })
        .unwrap();

    let source = "func void start() { show(system string join(string, int)(\"ab\", 3)); }";
    assert_eq!(run_with(host, source, DEFAULT_ENTRY).unwrap(), "ababab\n");
}

#[test]
fn rejected_host_call_evaluates_no_arguments() {
    let source = "func void start() {
                      var int n = 0;
                      system void emit(string, int)(\"x\", n = 5);
                      showi(n);
                      system void emit(int)(n = 7);
                      showi(n);
                      system void emit(string)(string(n = 9));
                      showi(n);
                  }";
    assert_eq!(run_with(HostTable::new(), source, DEFAULT_ENTRY).unwrap(), "0\n0\n99\n");
}

#[test]
fn mismatched_host_call_yields_default() {
    let source = "func void start() {
                      showi(system int missing(int)(1));
                      showi(system int emit(string)(\"skipped\"));
                      show(system string emit(int)(1));
                      show(\"done\");
                  }";
    assert_eq!(run_with(HostTable::new(), source, DEFAULT_ENTRY).unwrap(), "0\n0\n\ndone\n");
}

#[test]
fn host_table_registration_rules() {
    let mut host = HostTable::new();
    host.register("f", PrimType::Void, &[], |_, _| Value::Void).unwrap();

    assert!(matches!(host.register("f", PrimType::Int, &[], |_, _| Value::Int(0)),
                     Err(HostError::DuplicateName { .. })));
    assert!(matches!(host.register("g", PrimType::Void, &[PrimType::Int; 7], |_, _| Value::Void),
                     Err(HostError::TooManyArguments { count: 7, .. })));
    assert!(matches!(host.register("h", PrimType::Void, &[PrimType::Int, PrimType::Void], |_, _| {
                                       Value::Void
                                   }),
                     Err(HostError::InvalidArgumentType { position: 2, .. })));
    assert!(host.register("six", PrimType::Void, &[PrimType::Int; 6], |_, _| Value::Void).is_ok());
    assert_eq!(host.len(), 2);
}

#[test]
fn base_table_holds_the_standard_functions() {
    let host = HostTable::base();

    assert_eq!(host.len(), 3);
    for name in ["print", "readln", "shell"] {
        assert!(host.find(name).is_some(), "{name} is missing");
    }
    assert_eq!(host.find("readln").map(|f| f.return_type), Some(PrimType::String));
}

#[cfg(unix)]
#[test]
fn shell_reports_status_and_output() {
    let source = "func void start() {
                      var int __rc = -1;
                      var string __out = \"\";
                      var string result = system string shell(string)(\"printf hi; exit 3\");
                      show(result); showi(__rc); show(__out);
                  }";
    assert_eq!(run_with(HostTable::base(), source, DEFAULT_ENTRY).unwrap(), "hi\n3\nhi\n");
}
