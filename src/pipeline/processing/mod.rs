// Pipeline processing: renaming, coercion, country resolution and enrichment

pub mod country;
pub mod enrich;
pub mod normalize;
