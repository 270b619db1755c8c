use crate::common::F32ArrayExt;
use crate::contour::cents;

/// Groups a smoothed frame pitch track into notes.
///
/// Each contiguous run of voiced frames becomes one note, the median of
/// the run. A frame further than `threshold_cents` (strictly) from the
/// median of the current run starts a new run. An unvoiced frame ends it.
pub fn group_notes(frames: &[Option<f32>], threshold_cents: f64) -> Vec<f32> {
    let mut notes = Vec::new();
    let mut run: Vec<f32> = Vec::new();

    for frame in frames.iter() {
        match *frame {
            None => close_run(&mut run, &mut notes),
            Some(frequency) => {
                if let Some(run_median) = run.median() {
                    let interval = cents(run_median as f64, frequency as f64);
                    if interval.abs() > threshold_cents {
                        close_run(&mut run, &mut notes);
                    }
                }
                run.push(frequency);
            }
        }
    }
    close_run(&mut run, &mut notes);

    notes
}

fn close_run(run: &mut Vec<f32>, notes: &mut Vec<f32>) {
    if let Some(note) = run.median() {
        notes.push(note);
    }
    run.clear();
}
