//! Human-readable progress and solution reporting (component H). The search
//! engine itself never formats text directly; it calls back into a `Reporter`
//! so that the parallel engine can serialize output across threads and the
//! test suite can plug in a silent reporter instead.

use std::io::Write;
use std::time::Instant;

use parking_lot::Mutex;

use crate::context::SearchContext;
use crate::instance::Instance;

/// Receives callbacks from the search as it runs. Implementations must be
/// `Sync` since several worker threads may call into the same reporter.
pub trait Reporter: Sync {
    fn on_progress(&self, ctx: &SearchContext);
    fn on_solution(&self, ctx: &SearchContext, instance: &Instance);
}

/// A reporter that discards everything; used by tests and whenever
/// `--progress-report`/`--print-solutions` are both left off.
#[derive(Debug, Default)]
pub struct NullReporter;
impl Reporter for NullReporter {
    fn on_progress(&self, _ctx: &SearchContext) {}
    fn on_solution(&self, _ctx: &SearchContext, _instance: &Instance) {}
}

/// Prints progress and solution lines to stdout, serializing concurrent writers
/// behind a mutex so lines from different threads never interleave.
pub struct ConsoleReporter {
    start: Instant,
    out: Mutex<std::io::Stdout>,
}

impl ConsoleReporter {
    pub fn new(start: Instant) -> Self {
        ConsoleReporter { start, out: Mutex::new(std::io::stdout()) }
    }
}

impl Reporter for ConsoleReporter {
    fn on_progress(&self, ctx: &SearchContext) {
        let line = format_progress_line(ctx, self.start.elapsed().as_secs_f64());
        let mut out = self.out.lock();
        let _ = writeln!(out, "{line}");
    }

    fn on_solution(&self, ctx: &SearchContext, instance: &Instance) {
        let mut out = self.out.lock();
        let _ = writeln!(out, "Found solution at level {} after {} nodes", ctx.level, ctx.nodes);
        for &option in &ctx.chosen_options {
            let names: Vec<&str> = instance.option_items(option.id()).iter().map(|&i| instance.item_name(i)).collect();
            let _ = writeln!(out, "  {}", names.join(" "));
        }
    }
}

/// Encodes one `(child_num, num_children)` pair as the two-character base-62
/// token the progress line format calls for. Each character is substituted
/// independently with `*` when its value doesn't fit in a single base-62
/// digit (i.e. is `>= 62`), so the result is always exactly two characters.
fn encode_token(child_num: usize, num_children: usize) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut s = String::with_capacity(2);
    s.push(if child_num < 62 { DIGITS[child_num] as char } else { '*' });
    s.push(if num_children < 62 { DIGITS[num_children] as char } else { '*' });
    s
}

/// Formats one progress line: `Explored <nodes> nodes, found <solutions>
/// solutions, elapsed <t>s.` followed by up to 44 two-character tokens, one per
/// level with more than one child.
pub fn format_progress_line(ctx: &SearchContext, elapsed_secs: f64) -> String {
    let mut line = format!(
        "Explored {} nodes, found {} solutions, elapsed {:.3}s.",
        ctx.nodes, ctx.solutions, elapsed_secs
    );

    let mut tokens = 0usize;
    for level in 0..ctx.level {
        if tokens >= 44 {
            break;
        }
        if ctx.num_children[level] > 1 {
            line.push(' ');
            line.push_str(&encode_token(ctx.child_num[level], ctx.num_children[level]));
            tokens += 1;
        }
    }
    line
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_progress {
    use super::*;
    use crate::instance::Instance;

    fn instance() -> Instance {
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        Instance::try_new(3, 3, names, vec![vec![0], vec![1], vec![2]]).unwrap()
    }

    #[test]
    fn encode_token_uses_base62_digits() {
        assert_eq!(encode_token(0, 1), "01");
        assert_eq!(encode_token(9, 10), "9a");
        assert_eq!(encode_token(35, 36), "zA");
        assert_eq!(encode_token(61, 61), "ZZ");
    }

    #[test]
    fn encode_token_falls_back_to_star_per_character_when_out_of_range() {
        assert_eq!(encode_token(62, 3), "*3");
        assert_eq!(encode_token(3, 100), "3*");
        assert_eq!(encode_token(62, 100), "**");
    }

    #[test]
    fn progress_line_has_the_expected_prefix() {
        let inst = instance();
        let ctx = SearchContext::new_root(&inst, 0);
        let line = format_progress_line(&ctx, 1.5);
        assert!(line.starts_with("Explored 0 nodes, found 0 solutions, elapsed 1.500s."));
    }

    #[test]
    fn progress_line_skips_levels_with_a_single_child() {
        let inst = instance();
        let mut ctx = SearchContext::new_root(&inst, 0);
        ctx.level = 2;
        ctx.num_children[0] = 1;
        ctx.child_num[0] = 0;
        ctx.num_children[1] = 3;
        ctx.child_num[1] = 2;

        let line = format_progress_line(&ctx, 0.0);
        let tokens_part = line.split("elapsed 0.000s.").nth(1).unwrap().trim();
        assert_eq!(tokens_part, "23");
    }
}
