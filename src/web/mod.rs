pub mod aggregation;
pub mod discovery;
pub mod handlers;
pub mod home;
pub mod route;
pub mod search_box;
pub mod sources;
pub mod view;

pub use aggregation::{genre_line, genre_names, select_trailer, top_cast, Primary, ResultAggregator};
pub use discovery::{DiscoveryCommand, DiscoveryFlow, DiscoveryRequest, GenreSelection, GridState};
pub use handlers::*;
pub use home::HomePage;
pub use route::Route;
pub use search_box::SearchBox;
pub use sources::Collaborators;
pub use view::{DetailPage, DetailStatus};
