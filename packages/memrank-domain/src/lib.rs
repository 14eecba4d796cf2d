pub mod compact;
pub mod record;
pub mod segment;
pub mod similarity;

pub use compact::{build_compact_query, extract_core_question};
pub use record::{LinkRecord, MemoryId, MemoryRecord};
pub use segment::{FragmentSegmenter, NoopSegmenter, UnicodeSegmenter};
pub use similarity::{QueryEmbeddings, SimilarityTable, cosine_similarity, lookup_similarity};
