pub mod ids;
pub mod nav;
pub mod route;

pub use ids::{IdKey, clear_ids, get_ids, save_ids};
pub use nav::{Direction, NavPolicy, Step, step};
pub use route::{encode_query, parse_query};
