pub mod hash;
pub mod ner;
pub mod scrub;

pub use hash::{hash_id, mask_email};
pub use ner::{EntityLabel, EntityRecognizer, EntitySpan, HeuristicRecognizer};
pub use scrub::Scrubber;
