use std::io::{self, Write};

/// Writes to stdout, treating a broken pipe as success so `copera ... |
/// head` exits cleanly instead of panicking mid-write.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    tolerate_broken_pipe(stdout.write_all(text.as_bytes()))?;
    tolerate_broken_pipe(stdout.flush())
}

fn tolerate_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
