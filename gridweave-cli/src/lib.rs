pub mod render;
pub mod words;

use std::io::Write;
use std::time::Instant;

/// Runs the given operation, printing `<label> ... <elapsed>s` around it.
pub fn timed<T>(label: &str, operation: impl FnOnce() -> T) -> T {
    print!("{label} ... ");
    let _ = std::io::stdout().flush();
    let start = Instant::now();
    let result = operation();
    println!("{:.2}s", start.elapsed().as_secs_f64());
    result
}
