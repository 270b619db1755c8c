//! Query by humming. Finds the melodies in a collection of MIDI files that best
//! match a hummed or sung recording.
//!
//! Both the recording and the reference melodies are reduced to a melodic
//! contour, a sequence of up (`U`), down (`D`) and same (`S`) steps also known as
//! [Parsons code](https://en.wikipedia.org/wiki/Parsons_code). Reference melodies
//! are then ranked by the [edit distance](https://en.wikipedia.org/wiki/Levenshtein_distance)
//! between their contour and the contour of the recording.
//!
//! * Reference melodies are read from Standard MIDI Files, using the key numbers
//! of their note-on events.
//! * Notes are extracted from the recording using the MPM (McLeod Pitch Method)
//! [pitch](https://en.wikipedia.org/wiki/Pitch_%28music%29) detection algorithm described in the paper
//! [A smarter way to find pitch](http://www.cs.otago.ac.nz/tartini/papers/A_Smarter_Way_to_Find_Pitch.pdf)
//! by Philip McLeod and Geoff Wyvill, followed by median smoothing and grouping
//! of stable frames into notes.
//!
//! # Examples
//!
//! ```
//! use micro_hum::{Catalog, Ranker, RankerConfig};
//! use micro_hum::contour::encode_exact;
//!
//! let mut catalog = Catalog::new();
//! catalog.insert("ode_to_joy.mid", encode_exact(&[64, 64, 65, 67, 67, 65, 64, 62])).unwrap();
//! catalog.insert("frere_jacques.mid", encode_exact(&[60, 62, 64, 60, 60, 62, 64, 60])).unwrap();
//!
//! let ranker = Ranker::new(catalog, RankerConfig::default());
//! let query = encode_exact(&[52, 52, 53, 55, 55, 53, 52, 50]);
//! let matches = ranker.rank(&query);
//! assert_eq!(matches[0].id, "ode_to_joy.mid");
//! assert_eq!(matches[0].distance, 0);
//! ```
//!
//! Recordings are processed with a [QueryPipeline]:
//!
//! ```no_run
//! use micro_hum::{MpmNoteExtractor, QueryPipeline};
//! use micro_hum::contour::ThresholdEncoder;
//!
//! let mut pipeline = QueryPipeline::new(MpmNoteExtractor::default(), ThresholdEncoder::default());
//! let contour = pipeline.process_file("hum.wav".as_ref())?;
//! println!("{}", contour);
//! # Ok::<(), micro_hum::HumError>(())
//! ```

pub mod audio;
pub mod catalog;
pub mod common;
pub mod config;
pub mod contour;
pub mod distance;
pub mod error;
pub mod midi;
pub mod mpm;
pub mod pitch;
pub mod query;
pub mod ranker;

pub use catalog::{Catalog, CatalogBuilder, CatalogEntry, CatalogReport};
pub use config::{CatalogConfig, GroupingConfig, RankerConfig, TrackerConfig};
pub use contour::{Contour, Step};
pub use distance::{contour_distance, edit_distance};
pub use error::{HumError, Result};
pub use pitch::{MpmNoteExtractor, NoteExtractor};
pub use query::QueryPipeline;
pub use ranker::{MatchResult, Ranker};
