//! Tick label selection.
//!
//! When a gauge has more segments than it has room for labels, only a subset
//! of boundaries is labeled. The boundary count is divided by the smallest
//! whole stride that fits the limit, and labels go to the boundaries nearest
//! to evenly spaced positions. Both ends of the arc stay labeled.

use crate::error::Result;
use crate::format::ValueFormat;
use crate::scale::{build_ticks, Scale, ScaleBuilder, Tick};

/// Number of label intervals to show for `segment_count` segments.
///
/// `None` means unbounded. With a limit `m` below the segment count `n`,
/// the result is `n / ceil(n / m)` rounded down: never more than `m`, and
/// never less than half of it.
///
/// ```
/// use speedometer::ticks::select_label_count;
///
/// assert_eq!(select_label_count(None, 1000), 1000);
/// assert_eq!(select_label_count(Some(10), 1000), 10);
/// assert_eq!(select_label_count(Some(4), 6), 3);
/// assert_eq!(select_label_count(Some(10), 11), 5);
/// assert_eq!(select_label_count(Some(0), 5), 0);
/// ```
#[must_use]
pub fn select_label_count(max_labels: Option<u32>, segment_count: u32) -> u32 {
    let n = segment_count;
    let m = match max_labels {
        Some(m) if m < n => m,
        _ => return n,
    };
    if m == 0 {
        return 0;
    }
    n / n.div_ceil(m)
}

/// Labeled ticks for `scale`, reduced to at most `max_labels` intervals.
///
/// When the reduced count divides the segment count, equal-width scales are
/// rebuilt with it on the same arc. Otherwise, and always for custom stops,
/// the existing boundaries are labeled in place with [`label_ticks`].
pub fn select_labels(
    scale: &Scale,
    max_labels: Option<u32>,
    format: &ValueFormat,
) -> Result<Vec<Tick>> {
    let segments = scale.segment_count();
    let effective = select_label_count(max_labels, segments);
    if effective == 0 {
        return Ok(Vec::new());
    }

    if scale.has_custom_stops() || segments % effective != 0 {
        let mut ticks = build_ticks(scale);
        label_ticks(&mut ticks, effective, format);
        return Ok(ticks.into_iter().filter(|t| t.label.is_some()).collect());
    }

    let reduced = ScaleBuilder::new(scale.range())
        .segments(effective)
        .arc(scale.arc())
        .build()?;
    let mut ticks = build_ticks(&reduced);
    for tick in &mut ticks {
        tick.label = Some(format.format(tick.value));
    }
    Ok(ticks)
}

/// Label `effective + 1` evenly spread ticks of a full tick list in place.
///
/// Tick `i * segments / effective` (rounded to nearest) is labeled for each
/// `i` in `0..=effective`, so the first and last ticks always are. An
/// `effective` above the segment count labels every tick. Ticks that are
/// not selected have their label cleared.
pub fn label_ticks(ticks: &mut [Tick], effective: u32, format: &ValueFormat) {
    for tick in ticks.iter_mut() {
        tick.label = None;
    }

    let segments = ticks.len().saturating_sub(1) as u64;
    let k = u64::from(effective).min(segments);
    if k == 0 {
        return;
    }

    for i in 0..=k {
        let index = (2 * i * segments + k) / (2 * k);
        if let Some(tick) = ticks.get_mut(index as usize) {
            tick.label = Some(format.format(tick.value));
        }
    }
}
