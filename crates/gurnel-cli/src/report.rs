/// Plain-text rendering of a [`StatsReport`].
use gurnel_core::analysis::{StatsReport, WordStat};
use std::io::{self, Write};

/// Date layout in the cadence line, e.g. `Mar 7 2024`.
const SINCE_FORMAT: &str = "%b %-d %Y";

/// Write `report` to `out`, listing up to `top` words per ranking section.
pub fn render<W: Write>(report: &StatsReport, top: usize, out: &mut W) -> io::Result<()> {
    if report.is_empty() {
        return writeln!(out, "No entries found");
    }

    if let Some(cadence) = &report.cadence {
        writeln!(
            out,
            "{:.2}% of days journaled since {}",
            cadence.percent(),
            cadence.since.format(SINCE_FORMAT)
        )?;
    }
    writeln!(out, "Total word count: {}", report.stats.total_words)?;
    writeln!(out, "Average word count: {:.1}", report.stats.average_words())?;

    let Some(ranking) = &report.ranking else {
        return Ok(());
    };
    if top == 0 {
        return Ok(());
    }

    let frequent = ranking.unusually_frequent(top);
    writeln!(out)?;
    writeln!(out, "Top {} unusually frequent words:", frequent.len())?;
    write_words(out, frequent.iter())?;

    let infrequent: Vec<&WordStat> = ranking.unusually_infrequent(top).collect();
    writeln!(out)?;
    writeln!(out, "Top {} unusually infrequent words:", infrequent.len())?;
    write_words(out, infrequent.into_iter())
}

/// One `word  score` line per stat, words padded to the widest in the section.
fn write_words<'a, W, I>(out: &mut W, words: I) -> io::Result<()>
where
    W: Write,
    I: Iterator<Item = &'a WordStat> + Clone,
{
    let width = words
        .clone()
        .map(|s| s.word.chars().count())
        .max()
        .unwrap_or(0);
    for stat in words {
        writeln!(out, "{:<width$}  {:.1}X", stat.word.as_str(), stat.score)?;
    }
    Ok(())
}
