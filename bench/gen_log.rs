use std::env;
use std::io::{self, BufWriter, Write};

/// Emit a synthetic benchmark log: every system × query run with `trials`
/// samples, interleaved with the kind of chatter real binaries print.
///
/// Usage: `gen_log [QUERIES] [TRIALS]` (defaults 1000 and 5).
fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let queries: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1_000);
    let trials: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5);

    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(1 << 20, stdout.lock());

    // Deterministic LCG so generated logs are comparable across machines.
    let mut rng: u64 = 42;
    let mut next = |bound: u64| {
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
        (rng >> 32) % bound
    };

    for q in 0..queries {
        for system in ["jq", "rumble", "ours"] {
            writeln!(out, "Running case={system} query=q{q}")?;
            for _ in 0..trials {
                match system {
                    "ours" => {
                        writeln!(out, "Load Time: {}ms", 100 + next(50))?;
                        writeln!(out, "Query Time: {}ms", 10 + next(20))?;
                    }
                    "rumble" => writeln!(out, "Elapsed time: {} ms", 2_000 + next(500))?,
                    _ => writeln!(out, "[ExecTime] {}", 1_000 + next(300))?,
                }
                writeln!(out, "{{\"key1\": \"A\", \"total\": {}}}", next(10_000))?;
            }
        }
    }
    out.flush()
}
