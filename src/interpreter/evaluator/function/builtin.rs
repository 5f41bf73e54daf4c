use std::io::{BufRead, Write};

use crate::interpreter::{evaluator::host::HostContext, value::Value};

/// Writes text to standard output (fd 1) or standard error (fd 2).
///
/// Other descriptors are logged and ignored. Nothing is appended to the
/// text.
///
/// Signature: `system void print(int, string)`
pub fn print(_: &mut HostContext<'_>, args: &[Value]) -> Value {
    let [fd, text] = args else {
        return Value::Void;
    };
    let text = text.as_bytes();

    let written = match fd.as_int() {
        1 => {
            let mut out = std::io::stdout().lock();
            out.write_all(text).and_then(|()| out.flush())
        },
        2 => std::io::stderr().lock().write_all(text),
        other => {
            log::warn!("print: unsupported file descriptor {other}");
            Ok(())
        },
    };
    if let Err(error) = written {
        log::warn!("print: {error}");
    }

    Value::Void
}

/// Reads one line from standard input (fd 0), without its line break.
///
/// Other descriptors, end of input and read failures yield `""`.
///
/// Signature: `system string readln(int)`
pub fn readln(_: &mut HostContext<'_>, args: &[Value]) -> Value {
    let fd = args.first().map_or(0, Value::as_int);
    if fd != 0 {
        log::warn!("readln: unsupported file descriptor {fd}");
        return Value::String(Vec::new());
    }

    let mut line = Vec::new();
    if let Err(error) = std::io::stdin().lock().read_until(b'\n', &mut line) {
        log::warn!("readln: {error}");
        return Value::String(Vec::new());
    }
    let trimmed = line.strip_suffix(b"\n").unwrap_or(&line);
    let trimmed = trimmed.strip_suffix(b"\r").unwrap_or(trimmed);

    Value::from(trimmed)
}

/// Runs a command through `sh -c` and returns its standard output.
///
/// The exit status is stored in the caller's `__rc` local and the output in
/// its `__out` local, for each of them that exists with type `int` and
/// `string` respectively. A command that cannot be started yields `""` and
/// status `-1`; one killed by a signal has status `-1` too.
///
/// Signature: `system string shell(string)`
pub fn shell(context: &mut HostContext<'_>, args: &[Value]) -> Value {
    let command = args.first().map(Value::as_str).unwrap_or_default();

    let (output, status) = match std::process::Command::new("sh").arg("-c").arg(&*command).output() {
        Ok(output) => (output.stdout, output.status.code().unwrap_or(-1)),
        Err(error) => {
            log::warn!("shell: failed to run '{command}': {error}");
            (Vec::new(), -1)
        },
    };

    context.set_local("__rc", Value::Int(i64::from(status)));
    context.set_local("__out", Value::String(output.clone()));
    Value::String(output)
}
