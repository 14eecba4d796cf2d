use unicode_segmentation::UnicodeSegmentation;

/// Word-segmentation collaborator used for sub-fragment expansion. The
/// engine keeps the plain token regardless, so an implementation that
/// returns nothing only reduces recall, never correctness.
pub trait FragmentSegmenter {
	fn segment(&self, token: &str) -> Vec<String>;
}

/// Splits along UAX #29 word boundaries. Handles mixed-script tokens
/// (e.g. latin substrings embedded in CJK text) without a dictionary.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeSegmenter;
impl FragmentSegmenter for UnicodeSegmenter {
	fn segment(&self, token: &str) -> Vec<String> {
		token.unicode_words().map(|word| word.to_lowercase()).collect()
	}
}

/// Segmenter-unavailable fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSegmenter;
impl FragmentSegmenter for NoopSegmenter {
	fn segment(&self, _token: &str) -> Vec<String> {
		Vec::new()
	}
}
