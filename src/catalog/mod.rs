pub mod similarity;
pub mod store;
pub mod title;

pub use similarity::SimilarityIndex;
pub use store::{Catalog, CatalogError, RECOMMENDATION_COUNT};
pub use title::capitalize;
