use std::io::{self, BufRead, Write};

use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romsift_lib::{Ambiguity, Decision, Disambiguator};

/// Asks on the terminal which file matches a missing release.
///
/// Invalid answers are re-asked; end of input or a terminal error means
/// "skip all".
pub(crate) struct ConsolePrompt {
    pb: ProgressBar,
}

impl ConsolePrompt {
    pub(crate) fn new(pb: ProgressBar) -> Self {
        Self { pb }
    }
}

impl Disambiguator for ConsolePrompt {
    fn choose(&mut self, ambiguity: &Ambiguity<'_>) -> Decision {
        self.pb.suspend(|| {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            ask(ambiguity, &mut input, &mut io::stdout()).unwrap_or_else(|e| {
                log::warn!("Prompt failed, skipping remaining questions: {e}");
                Decision::SkipAll
            })
        })
    }
}

/// Run the question/answer loop until a valid decision is read.
pub(crate) fn ask(
    ambiguity: &Ambiguity<'_>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Decision> {
    let candidates = ambiguity.candidates;
    let other = candidates.len() + 1;
    let skip = candidates.len() + 2;
    let skip_all = candidates.len() + 3;

    writeln!(out)?;
    writeln!(
        out,
        "The following ROM was not found: {}",
        ambiguity.missing.if_supports_color(Stdout, |t| t.cyan())
    )?;
    writeln!(out, "All versions of this game:")?;
    for clone in ambiguity.clones {
        writeln!(out, "  {clone}")?;
    }
    writeln!(out, "Which file in your collection matches it? It will be renamed.")?;
    for (i, candidate) in candidates.iter().enumerate() {
        writeln!(out, "  {}) {candidate}", i + 1)?;
    }
    writeln!(out, "  {other}) OTHER")?;
    writeln!(out, "  {skip}) SKIP")?;
    writeln!(out, "  {skip_all}) SKIP ALL")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(Decision::SkipAll);
        };
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=candidates.len()).contains(&n) => return Ok(Decision::Candidate(n - 1)),
            Ok(n) if n == other => {
                writeln!(
                    out,
                    "Enter the exact file name (with extension unless it is .zip), or SKIP:"
                )?;
                out.flush()?;
                let Some(name) = read_line(input)? else {
                    return Ok(Decision::SkipAll);
                };
                let name = name.trim();
                if name.is_empty() || name == "SKIP" {
                    return Ok(Decision::Skip);
                }
                return Ok(Decision::Literal(name.to_string()));
            }
            Ok(n) if n == skip => return Ok(Decision::Skip),
            Ok(n) if n == skip_all => return Ok(Decision::SkipAll),
            _ => writeln!(out, "Please enter a number from 1 to {skip_all}.")?,
        }
    }
}

/// One line of input, or `None` at end of input.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    match input.read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}
