//! Client for the AgMarknet price-reporting portal.
//!
//! The portal only exposes its data through ASP.NET WebForms pages, so every
//! lookup is a GET-then-POST round trip that carries session cookies and the
//! hidden anti-forgery fields between the two requests.

mod client;
mod errors;
mod query;
mod session;
pub mod table;
pub mod tokens;
pub mod types;
mod user_agent;

pub use self::client::{PortalClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::query::{
    ArchiveQuery, FormQuery, TrendsQuery, ARCHIVE_PATH, PORTAL_DATE_FORMAT, TRENDS_PATH,
};
pub use self::session::FormSession;
pub use self::table::TableLayout;
pub use self::tokens::TokenBundle;
pub use self::types::PriceRecord;
